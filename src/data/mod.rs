/// Data layer: photometric types, validation, feature derivation, loading.
///
/// Architecture:
/// ```text
///  form input / .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<PhotometricRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  plausibility rules, first failure wins
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  extinction correction + colour indices
///   └───────────┘
///        │
///        ▼
///   DerivedFeatureVector → classifier
/// ```

pub mod loader;
pub mod model;
pub mod transform;
pub mod validate;
