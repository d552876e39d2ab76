use std::collections::BTreeMap;

use crate::classifier::ClassifierAdapter;
use crate::data::model::{
    Classification, ClassificationLabel, DerivedFeatureVector, PhotometricRecord,
};
use crate::data::transform::transform;
use crate::data::validate::{validate, ValidationError};

// ---------------------------------------------------------------------------
// Single record: validate → transform → classify
// ---------------------------------------------------------------------------

/// Validate and transform a record; the classifier is not consulted.
pub fn prepare(record: &PhotometricRecord) -> Result<DerivedFeatureVector, ValidationError> {
    validate(record)?;
    Ok(transform(record))
}

/// Run one record through the full pipeline.
pub fn classify_record(
    record: &PhotometricRecord,
    adapter: &ClassifierAdapter,
) -> Result<Classification, ValidationError> {
    let vector = prepare(record)?;
    Ok(adapter.classify(&vector))
}

// ---------------------------------------------------------------------------
// Catalogue: many records at once
// ---------------------------------------------------------------------------

/// One catalogue row and what the pipeline made of it.
#[derive(Debug, Clone)]
pub struct CatalogueRow {
    pub record: PhotometricRecord,
    /// Present only when the record passed validation.
    pub features: Option<DerivedFeatureVector>,
    pub outcome: Result<Classification, ValidationError>,
}

impl CatalogueRow {
    pub fn label(&self) -> Option<ClassificationLabel> {
        self.outcome.as_ref().ok().map(|c| c.label)
    }
}

/// Classify every record; rejected rows keep their validation error.
pub fn classify_catalogue(
    records: &[PhotometricRecord],
    adapter: &ClassifierAdapter,
) -> Vec<CatalogueRow> {
    records
        .iter()
        .map(|record| match prepare(record) {
            Ok(vector) => CatalogueRow {
                record: *record,
                features: Some(vector),
                outcome: Ok(adapter.classify(&vector)),
            },
            Err(e) => CatalogueRow {
                record: *record,
                features: None,
                outcome: Err(e),
            },
        })
        .collect()
}

/// Per-label counts over a classified catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueSummary {
    pub per_label: BTreeMap<ClassificationLabel, usize>,
    pub rejected: usize,
}

impl CatalogueSummary {
    pub fn from_rows(rows: &[CatalogueRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            match row.label() {
                Some(label) => *summary.per_label.entry(label).or_default() += 1,
                None => summary.rejected += 1,
            }
        }
        summary
    }

    pub fn classified(&self) -> usize {
        self.per_label.values().sum()
    }

    pub fn count(&self, label: ClassificationLabel) -> usize {
        self.per_label.get(&label).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ModelArtifact;

    /// Quasar when redshift > 0.5, otherwise star when u-g > 1, else galaxy.
    const MODEL: &str = r#"{
        "format_version": 1,
        "feature_names": ["redshift", "u-g"],
        "estimator": {
            "kind": "random_forest",
            "trees": [{
                "children_left":  [1, 3, -1, -1, -1],
                "children_right": [2, 4, -1, -1, -1],
                "feature":        [0, 1, -2, -2, -2],
                "threshold":      [0.5, 1.0, -2.0, -2.0, -2.0],
                "value": [[1, 1, 1], [1, 0, 1], [0, 1, 0], [1, 0, 0], [0, 0, 1]]
            }]
        }
    }"#;

    fn adapter() -> ClassifierAdapter {
        ClassifierAdapter::from_artifact(ModelArtifact::from_json(MODEL).unwrap()).unwrap()
    }

    fn record(redshift: f64, u: f64) -> PhotometricRecord {
        PhotometricRecord {
            ra: 150.0,
            dec: 2.0,
            u,
            g: 18.0,
            r: 17.5,
            i: 17.3,
            z: 17.2,
            redshift,
            extinction_u: 0.05,
            extinction_g: 0.04,
            extinction_r: 0.03,
            extinction_i: 0.02,
            extinction_z: 0.01,
        }
    }

    #[test]
    fn test_classify_record() {
        let a = adapter();
        assert_eq!(
            classify_record(&record(1.2, 18.5), &a).unwrap().label,
            ClassificationLabel::Quasar
        );
        assert_eq!(
            classify_record(&record(0.0, 20.0), &a).unwrap().label,
            ClassificationLabel::Star
        );
        assert_eq!(
            classify_record(&record(0.1, 18.3), &a).unwrap().label,
            ClassificationLabel::Galaxy
        );
    }

    #[test]
    fn test_invalid_record_never_reaches_classifier() {
        let a = adapter();
        let err = classify_record(&PhotometricRecord::default(), &a).unwrap_err();
        assert_eq!(err, ValidationError::AllZero);

        let bad_ra = PhotometricRecord {
            ra: 400.0,
            ..record(0.1, 18.3)
        };
        assert_eq!(
            classify_record(&bad_ra, &a).unwrap_err(),
            ValidationError::RaOutOfRange
        );
    }

    #[test]
    fn test_catalogue_summary() {
        let a = adapter();
        let records = vec![
            record(1.2, 18.5),
            record(2.0, 18.5),
            record(0.0, 20.0),
            PhotometricRecord::default(),
        ];
        let rows = classify_catalogue(&records, &a);
        assert_eq!(rows.len(), 4);
        assert!(rows[3].features.is_none());
        assert_eq!(rows[3].label(), None);

        let summary = CatalogueSummary::from_rows(&rows);
        assert_eq!(summary.count(ClassificationLabel::Quasar), 2);
        assert_eq!(summary.count(ClassificationLabel::Star), 1);
        assert_eq!(summary.count(ClassificationLabel::Galaxy), 0);
        assert_eq!(summary.classified(), 3);
        assert_eq!(summary.rejected, 1);
    }
}
