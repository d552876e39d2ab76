use super::model::{
    Band, ColorIndices, CorrectedMagnitudes, DerivedFeatureVector, PhotometricRecord,
};

// ---------------------------------------------------------------------------
// Feature derivation
// ---------------------------------------------------------------------------

/// Subtract each band's extinction from its raw magnitude.
pub fn corrected_magnitudes(record: &PhotometricRecord) -> CorrectedMagnitudes {
    CorrectedMagnitudes(Band::ALL.map(|b| record.magnitude(b) - record.extinction(b)))
}

/// Adjacent-band differences of corrected magnitudes (bluer minus redder).
pub fn color_indices(corrected: &CorrectedMagnitudes) -> ColorIndices {
    ColorIndices {
        u_g: corrected.get(Band::U) - corrected.get(Band::G),
        g_r: corrected.get(Band::G) - corrected.get(Band::R),
        r_i: corrected.get(Band::R) - corrected.get(Band::I),
        i_z: corrected.get(Band::I) - corrected.get(Band::Z),
    }
}

/// Derive the classifier's feature vector from a raw record.
///
/// Pure arithmetic: never fails, even on records the validator would
/// reject. Callers are expected to validate first.
pub fn transform(record: &PhotometricRecord) -> DerivedFeatureVector {
    let corrected = corrected_magnitudes(record);
    let colors = color_indices(&corrected);
    DerivedFeatureVector {
        ra: record.ra,
        dec: record.dec,
        redshift: record.redshift,
        corrected,
        colors,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::array::uniform5;
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::FeatureColumn;

    fn scenario() -> PhotometricRecord {
        PhotometricRecord {
            ra: 180.0,
            dec: 0.0,
            u: 19.0,
            g: 18.5,
            r: 18.0,
            i: 17.8,
            z: 17.6,
            redshift: 0.05,
            extinction_u: 0.1,
            extinction_g: 0.08,
            extinction_r: 0.06,
            extinction_i: 0.05,
            extinction_z: 0.04,
        }
    }

    #[test]
    fn test_scenario_values() {
        let v = transform(&scenario());
        assert_eq!(v.ra, 180.0);
        assert_eq!(v.dec, 0.0);
        assert_eq!(v.redshift, 0.05);

        // Bit-exact against the same subtraction order.
        assert_eq!(v.corrected.get(Band::U), 19.0 - 0.1);
        assert_eq!(v.corrected.get(Band::G), 18.5 - 0.08);
        assert_eq!(v.colors.u_g, (19.0 - 0.1) - (18.5 - 0.08));
        assert_eq!(v.colors.i_z, (17.8 - 0.05) - (17.6 - 0.04));

        assert_abs_diff_eq!(v.corrected.get(Band::U), 18.9, epsilon = 1e-12);
        assert_abs_diff_eq!(v.corrected.get(Band::G), 18.42, epsilon = 1e-12);
        assert_abs_diff_eq!(v.colors.u_g, 0.48, epsilon = 1e-12);
        assert_abs_diff_eq!(v.colors.g_r, 0.48, epsilon = 1e-12);
        assert_abs_diff_eq!(v.colors.r_i, 0.19, epsilon = 1e-12);
        assert_abs_diff_eq!(v.colors.i_z, 0.19, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let rec = scenario();
        let a = transform(&rec);
        let b = transform(&rec);
        assert_eq!(a, b);
        assert_eq!(
            a.to_canonical_row().iter().map(|x| x.to_bits()).collect::<Vec<_>>(),
            b.to_canonical_row().iter().map(|x| x.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_corrected_plus_extinction_recovers_raw() {
        let rec = scenario();
        let corrected = corrected_magnitudes(&rec);
        for band in Band::ALL {
            assert_abs_diff_eq!(
                corrected.get(band) + rec.extinction(band),
                rec.magnitude(band),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_colors_are_adjacent_differences() {
        let v = transform(&scenario());
        let c = v.corrected;
        assert_eq!(v.colors.u_g, c.get(Band::U) - c.get(Band::G));
        assert_eq!(v.colors.g_r, c.get(Band::G) - c.get(Band::R));
        assert_eq!(v.colors.r_i, c.get(Band::R) - c.get(Band::I));
        assert_eq!(v.colors.i_z, c.get(Band::I) - c.get(Band::Z));
    }

    #[test]
    fn test_canonical_row_order() {
        let v = transform(&scenario());
        let row = v.to_canonical_row();
        assert_eq!(row.len(), 12);
        assert_eq!(row[0], v.ra);
        assert_eq!(row[1], v.dec);
        assert_eq!(row[2], v.redshift);
        assert_eq!(row[3], v.corrected.get(Band::U));
        assert_eq!(row[7], v.corrected.get(Band::Z));
        assert_eq!(row[8], v.colors.u_g);
        assert_eq!(row[11], v.colors.i_z);
        assert_eq!(v.value(FeatureColumn::GR), v.colors.g_r);
    }

    #[test]
    fn test_out_of_range_input_does_not_panic() {
        let rec = PhotometricRecord {
            ra: 1e300,
            u: f64::NAN,
            g: f64::INFINITY,
            extinction_z: -5.0,
            ..scenario()
        };
        let v = transform(&rec);
        assert!(v.colors.u_g.is_nan());
        assert_eq!(v.corrected.get(Band::Z), 17.6 + 5.0);
    }

    fn arb_record() -> impl Strategy<Value = PhotometricRecord> {
        (
            0.0..360.0f64,
            -90.0..=90.0f64,
            uniform5(-30.0..=30.0f64),
            0.0..20.0f64,
            uniform5(0.0..=1.0f64),
        )
            .prop_map(|(ra, dec, mags, redshift, ext)| {
                let mut rec = PhotometricRecord {
                    ra,
                    dec,
                    redshift,
                    ..PhotometricRecord::default()
                };
                for (k, band) in Band::ALL.into_iter().enumerate() {
                    *rec.magnitude_mut(band) = mags[k];
                    *rec.extinction_mut(band) = ext[k];
                }
                rec
            })
    }

    proptest! {
        #[test]
        fn prop_transform_is_deterministic(rec in arb_record()) {
            let bits = |v: DerivedFeatureVector| {
                v.to_canonical_row().into_iter().map(f64::to_bits).collect::<Vec<_>>()
            };
            let a = bits(transform(&rec));
            let b = bits(transform(&rec));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_corrected_plus_extinction_is_raw(rec in arb_record()) {
            let corrected = corrected_magnitudes(&rec);
            for band in Band::ALL {
                let back = corrected.get(band) + rec.extinction(band);
                prop_assert!((back - rec.magnitude(band)).abs() < 1e-12, "band {}", band);
            }
        }

        #[test]
        fn prop_colors_are_adjacent_differences(rec in arb_record()) {
            let v = transform(&rec);
            let c = v.corrected;
            let pairs = [
                (v.colors.u_g, Band::U, Band::G),
                (v.colors.g_r, Band::G, Band::R),
                (v.colors.r_i, Band::R, Band::I),
                (v.colors.i_z, Band::I, Band::Z),
            ];
            for (color, bluer, redder) in pairs {
                prop_assert_eq!(color, c.get(bluer) - c.get(redder));
            }
        }
    }
}
