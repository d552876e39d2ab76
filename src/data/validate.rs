use thiserror::Error;

use super::model::{Band, PhotometricRecord};

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Reason a photometric record was rejected before classification.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: All input values cannot be zero.")]
    AllZero,

    #[error("Invalid input: All filter magnitudes (u, g, r, i, z) cannot be zero at the same time.")]
    MagnitudesAllZero,

    #[error(
        "Invalid input: All extinction values (extinction_u, extinction_g, extinction_r, \
         extinction_i, extinction_z) cannot be zero at the same time."
    )]
    ExtinctionsAllZero,

    #[error("Invalid input: Both Right Ascension (ra) and Declination (dec) cannot be zero together.")]
    CoordinatesZero,

    #[error("Invalid input: Right Ascension (ra) must be between 0 and 360 degrees.")]
    RaOutOfRange,

    #[error("Invalid input: Declination (dec) must be between -90 and 90 degrees.")]
    DecOutOfRange,

    #[error(
        "Invalid input: {} filter ({}) magnitude must be between -30 and 30.",
        filter_name(.0),
        symbol(.0)
    )]
    MagnitudeOutOfRange(Band),

    #[error("Invalid input: Redshift must be a positive value.")]
    NegativeRedshift,

    #[error("Invalid input: Extinction ({}) must be between 0 and 1.", symbol(.0))]
    ExtinctionOutOfRange(Band),
}

impl ValidationError {
    /// Names of the record fields the rule looked at.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::AllZero => PhotometricRecord::FIELD_NAMES.to_vec(),
            ValidationError::MagnitudesAllZero => vec!["u", "g", "r", "i", "z"],
            ValidationError::ExtinctionsAllZero => vec![
                "extinction_u",
                "extinction_g",
                "extinction_r",
                "extinction_i",
                "extinction_z",
            ],
            ValidationError::CoordinatesZero => vec!["ra", "dec"],
            ValidationError::RaOutOfRange => vec!["ra"],
            ValidationError::DecOutOfRange => vec!["dec"],
            ValidationError::MagnitudeOutOfRange(band) => vec![band.symbol()],
            ValidationError::NegativeRedshift => vec!["redshift"],
            ValidationError::ExtinctionOutOfRange(band) => vec![extinction_field(*band)],
        }
    }
}

fn filter_name(band: &Band) -> &'static str {
    band.filter_name()
}

fn symbol(band: &Band) -> &'static str {
    band.symbol()
}

fn extinction_field(band: Band) -> &'static str {
    match band {
        Band::U => "extinction_u",
        Band::G => "extinction_g",
        Band::R => "extinction_r",
        Band::I => "extinction_i",
        Band::Z => "extinction_z",
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

const RA_RANGE: std::ops::Range<f64> = 0.0..360.0;
const DEC_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
const MAGNITUDE_RANGE: std::ops::RangeInclusive<f64> = -30.0..=30.0;
const REDSHIFT_RANGE: std::ops::RangeFrom<f64> = 0.0..;
const EXTINCTION_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1.0;

fn all_zero(values: &[f64]) -> bool {
    values.iter().all(|&v| v == 0.0)
}

/// Check a record against the plausibility rules.
///
/// Rules are evaluated in a fixed order and the first failure is returned:
/// degenerate all-zero groups first, then per-field ranges. NaN never
/// satisfies a range, so it is rejected by the first range rule that sees it.
pub fn validate(record: &PhotometricRecord) -> Result<(), ValidationError> {
    if all_zero(&record.values()) {
        return Err(ValidationError::AllZero);
    }
    if all_zero(&record.magnitudes()) {
        return Err(ValidationError::MagnitudesAllZero);
    }
    if all_zero(&record.extinctions()) {
        return Err(ValidationError::ExtinctionsAllZero);
    }
    if record.ra == 0.0 && record.dec == 0.0 {
        return Err(ValidationError::CoordinatesZero);
    }

    if !RA_RANGE.contains(&record.ra) {
        return Err(ValidationError::RaOutOfRange);
    }
    if !DEC_RANGE.contains(&record.dec) {
        return Err(ValidationError::DecOutOfRange);
    }
    if let Some(band) = Band::ALL
        .into_iter()
        .find(|&b| !MAGNITUDE_RANGE.contains(&record.magnitude(b)))
    {
        return Err(ValidationError::MagnitudeOutOfRange(band));
    }
    if !REDSHIFT_RANGE.contains(&record.redshift) {
        return Err(ValidationError::NegativeRedshift);
    }
    if let Some(band) = Band::ALL
        .into_iter()
        .find(|&b| !EXTINCTION_RANGE.contains(&record.extinction(b)))
    {
        return Err(ValidationError::ExtinctionOutOfRange(band));
    }

    Ok(())
}
