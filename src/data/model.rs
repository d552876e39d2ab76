use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Band – one of the five photometric filters
// ---------------------------------------------------------------------------

/// A photometric filter band, in wavelength order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    U,
    G,
    R,
    I,
    Z,
}

impl Band {
    pub const ALL: [Band; 5] = [Band::U, Band::G, Band::R, Band::I, Band::Z];

    /// Single-letter filter symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Band::U => "u",
            Band::G => "g",
            Band::R => "r",
            Band::I => "i",
            Band::Z => "z",
        }
    }

    /// Human-readable filter name used in labels and messages.
    pub fn filter_name(self) -> &'static str {
        match self {
            Band::U => "Ultraviolet",
            Band::G => "Green",
            Band::R => "Red",
            Band::I => "Near Infrared",
            Band::Z => "Infrared",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ---------------------------------------------------------------------------
// PhotometricRecord – one submitted measurement
// ---------------------------------------------------------------------------

/// Raw photometric measurement of a single object, as entered in the form
/// or read from one catalogue row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotometricRecord {
    pub ra: f64,
    pub dec: f64,
    pub u: f64,
    pub g: f64,
    pub r: f64,
    pub i: f64,
    pub z: f64,
    pub redshift: f64,
    pub extinction_u: f64,
    pub extinction_g: f64,
    pub extinction_r: f64,
    pub extinction_i: f64,
    pub extinction_z: f64,
}

impl PhotometricRecord {
    /// Field names in input column order.
    pub const FIELD_NAMES: [&'static str; 13] = [
        "ra",
        "dec",
        "u",
        "g",
        "r",
        "i",
        "z",
        "redshift",
        "extinction_u",
        "extinction_g",
        "extinction_r",
        "extinction_i",
        "extinction_z",
    ];

    /// Build a record from values in [`Self::FIELD_NAMES`] order.
    pub fn from_values(v: [f64; 13]) -> Self {
        Self {
            ra: v[0],
            dec: v[1],
            u: v[2],
            g: v[3],
            r: v[4],
            i: v[5],
            z: v[6],
            redshift: v[7],
            extinction_u: v[8],
            extinction_g: v[9],
            extinction_r: v[10],
            extinction_i: v[11],
            extinction_z: v[12],
        }
    }

    /// All thirteen values in [`Self::FIELD_NAMES`] order.
    pub fn values(&self) -> [f64; 13] {
        [
            self.ra,
            self.dec,
            self.u,
            self.g,
            self.r,
            self.i,
            self.z,
            self.redshift,
            self.extinction_u,
            self.extinction_g,
            self.extinction_r,
            self.extinction_i,
            self.extinction_z,
        ]
    }

    pub fn magnitude(&self, band: Band) -> f64 {
        self.magnitudes()[band.index()]
    }

    pub fn extinction(&self, band: Band) -> f64 {
        self.extinctions()[band.index()]
    }

    /// Raw magnitudes in band order.
    pub fn magnitudes(&self) -> [f64; 5] {
        [self.u, self.g, self.r, self.i, self.z]
    }

    /// Extinction corrections in band order.
    pub fn extinctions(&self) -> [f64; 5] {
        [
            self.extinction_u,
            self.extinction_g,
            self.extinction_r,
            self.extinction_i,
            self.extinction_z,
        ]
    }

    /// Mutable access for form widgets.
    pub fn magnitude_mut(&mut self, band: Band) -> &mut f64 {
        match band {
            Band::U => &mut self.u,
            Band::G => &mut self.g,
            Band::R => &mut self.r,
            Band::I => &mut self.i,
            Band::Z => &mut self.z,
        }
    }

    pub fn extinction_mut(&mut self, band: Band) -> &mut f64 {
        match band {
            Band::U => &mut self.extinction_u,
            Band::G => &mut self.extinction_g,
            Band::R => &mut self.extinction_r,
            Band::I => &mut self.extinction_i,
            Band::Z => &mut self.extinction_z,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived features
// ---------------------------------------------------------------------------

/// Extinction-corrected magnitudes, one per band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedMagnitudes(pub [f64; 5]);

impl CorrectedMagnitudes {
    pub fn get(&self, band: Band) -> f64 {
        self.0[band.index()]
    }
}

/// Differences of adjacent corrected magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorIndices {
    pub u_g: f64,
    pub g_r: f64,
    pub r_i: f64,
    pub i_z: f64,
}

/// Named column of the derived feature table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    Ra,
    Dec,
    Redshift,
    Corrected(Band),
    UG,
    GR,
    RI,
    IZ,
}

impl FeatureColumn {
    /// Canonical column order produced by the preprocessing step.
    pub const CANONICAL: [FeatureColumn; 12] = [
        FeatureColumn::Ra,
        FeatureColumn::Dec,
        FeatureColumn::Redshift,
        FeatureColumn::Corrected(Band::U),
        FeatureColumn::Corrected(Band::G),
        FeatureColumn::Corrected(Band::R),
        FeatureColumn::Corrected(Band::I),
        FeatureColumn::Corrected(Band::Z),
        FeatureColumn::UG,
        FeatureColumn::GR,
        FeatureColumn::RI,
        FeatureColumn::IZ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FeatureColumn::Ra => "ra",
            FeatureColumn::Dec => "dec",
            FeatureColumn::Redshift => "redshift",
            FeatureColumn::Corrected(Band::U) => "u_corrected",
            FeatureColumn::Corrected(Band::G) => "g_corrected",
            FeatureColumn::Corrected(Band::R) => "r_corrected",
            FeatureColumn::Corrected(Band::I) => "i_corrected",
            FeatureColumn::Corrected(Band::Z) => "z_corrected",
            FeatureColumn::UG => "u-g",
            FeatureColumn::GR => "g-r",
            FeatureColumn::RI => "r-i",
            FeatureColumn::IZ => "i-z",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::CANONICAL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Feature vector handed to the classifier. Raw magnitudes and extinctions
/// only survive through `corrected` and `colors`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatureVector {
    pub ra: f64,
    pub dec: f64,
    pub redshift: f64,
    pub corrected: CorrectedMagnitudes,
    pub colors: ColorIndices,
}

impl DerivedFeatureVector {
    pub fn value(&self, column: FeatureColumn) -> f64 {
        match column {
            FeatureColumn::Ra => self.ra,
            FeatureColumn::Dec => self.dec,
            FeatureColumn::Redshift => self.redshift,
            FeatureColumn::Corrected(band) => self.corrected.get(band),
            FeatureColumn::UG => self.colors.u_g,
            FeatureColumn::GR => self.colors.g_r,
            FeatureColumn::RI => self.colors.r_i,
            FeatureColumn::IZ => self.colors.i_z,
        }
    }

    /// Values in [`FeatureColumn::CANONICAL`] order.
    pub fn to_canonical_row(&self) -> Vec<f64> {
        FeatureColumn::CANONICAL
            .iter()
            .map(|c| self.value(*c))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Classification output
// ---------------------------------------------------------------------------

/// Predicted object category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassificationLabel {
    Galaxy,
    Quasar,
    Star,
}

impl ClassificationLabel {
    /// Labels indexed by the classifier's class index.
    pub const ALL: [ClassificationLabel; 3] = [
        ClassificationLabel::Galaxy,
        ClassificationLabel::Quasar,
        ClassificationLabel::Star,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationLabel::Galaxy => "Galaxy",
            ClassificationLabel::Quasar => "Quasar",
            ClassificationLabel::Star => "Star",
        }
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus the class probabilities it was picked from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: ClassificationLabel,
    /// Probability per class, indexed like [`ClassificationLabel::ALL`].
    pub probabilities: [f64; 3],
}

impl Classification {
    /// Probability of the predicted label.
    pub fn confidence(&self) -> f64 {
        self.probabilities[self.label as usize]
    }
}
