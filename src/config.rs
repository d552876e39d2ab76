//! Startup configuration read from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Artifact used when `CELESTIAL_MODEL_PATH` is not set.
pub const DEFAULT_MODEL_PATH: &str = "assets/demo_classifier.json";

/// Application configuration resolved once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Classifier artifact loaded at startup.
    pub model_path: PathBuf,
    /// Initial window size in logical points.
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            window_size: [1200.0, 800.0],
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `CELESTIAL_MODEL_PATH` (optional, default: `assets/demo_classifier.json`)
    /// - `CELESTIAL_WINDOW_WIDTH` (optional, default: 1200)
    /// - `CELESTIAL_WINDOW_HEIGHT` (optional, default: 800)
    ///
    /// # Errors
    /// Returns an error if a window dimension is set but is not a positive number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let model_path = lookup("CELESTIAL_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);
        let width = parse_dimension(&lookup, "CELESTIAL_WINDOW_WIDTH", defaults.window_size[0])?;
        let height =
            parse_dimension(&lookup, "CELESTIAL_WINDOW_HEIGHT", defaults.window_size[1])?;
        Ok(Self {
            model_path,
            window_size: [width, height],
        })
    }
}

fn parse_dimension(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: f32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a number, got '{raw}'"))?;
    anyhow::ensure!(value > 0.0, "{key} must be positive, got {value}");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("CELESTIAL_MODEL_PATH", "/opt/models/sdss.json"),
            ("CELESTIAL_WINDOW_WIDTH", "1600"),
            ("CELESTIAL_WINDOW_HEIGHT", " 900 "),
        ]))
        .unwrap();
        assert_eq!(cfg.model_path, PathBuf::from("/opt/models/sdss.json"));
        assert_eq!(cfg.window_size, [1600.0, 900.0]);
    }

    #[test]
    fn test_invalid_dimension() {
        let err = AppConfig::from_lookup(lookup(&[("CELESTIAL_WINDOW_WIDTH", "wide")]))
            .unwrap_err();
        assert!(err.to_string().contains("CELESTIAL_WINDOW_WIDTH"));

        let err = AppConfig::from_lookup(lookup(&[("CELESTIAL_WINDOW_HEIGHT", "-5")]))
            .unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }
}
