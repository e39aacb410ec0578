//! Input and configuration validation.
//!
//! The calculators assume validated inputs. Range checks live here, behind the
//! [`Validate`] trait, so every caller applies the same bounds before handing
//! numbers over.

use std::path::Path;

use thiserror::Error;

use crate::config::{AdsConfig, Config, MetricsConfig, ObservabilityConfig};

/// Validation error for inputs and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: String, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    #[error("Missing required field: {field}")]
    Missing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable inputs and configuration sections.
pub trait Validate {
    /// Validate this value.
    fn validate(&self) -> ValidationResult<()>;
}

/// Accumulates field checks and reports all failures at once.
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<ValidationError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `value > 0`.
    pub fn positive(mut self, field: &str, value: f64) -> Self {
        if !value.is_finite() {
            self.errors.push(ValidationError::NotFinite {
                field: field.into(),
            });
        } else if value <= 0.0 {
            self.errors.push(ValidationError::NotPositive {
                field: field.into(),
                value,
            });
        }
        self
    }

    /// Require `value >= 0`.
    pub fn non_negative(mut self, field: &str, value: f64) -> Self {
        if !value.is_finite() {
            self.errors.push(ValidationError::NotFinite {
                field: field.into(),
            });
        } else if value < 0.0 {
            self.errors.push(ValidationError::Negative {
                field: field.into(),
                value,
            });
        }
        self
    }

    /// Require `min <= value <= max`.
    pub fn in_range(mut self, field: &str, value: f64, min: f64, max: f64) -> Self {
        if !value.is_finite() {
            self.errors.push(ValidationError::NotFinite {
                field: field.into(),
            });
        } else if value < min || value > max {
            self.errors.push(ValidationError::OutOfRange {
                field: field.into(),
                value,
                min,
                max,
            });
        }
        self
    }

    /// Require a percentage expressed on the 0-100 scale.
    pub fn percent(self, field: &str, value: f64) -> Self {
        self.in_range(field, value, 0.0, 100.0)
    }

    /// Require non-blank text.
    pub fn not_blank(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Missing {
                field: field.into(),
            });
        }
        self
    }

    /// Push an arbitrary failure when `ok` is false.
    pub fn ensure(mut self, ok: bool, field: &str, reason: impl Into<String>) -> Self {
        if !ok {
            self.errors.push(ValidationError::InvalidValue {
                field: field.into(),
                reason: reason.into(),
            });
        }
        self
    }

    /// Collapse into a single result.
    pub fn finish(mut self) -> ValidationResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ValidationError::Multiple(self.errors)),
        }
    }
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }
        if let Err(e) = self.metrics.validate() {
            errors.push(e);
        }
        if let Err(e) = self.ads.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }

    /// Load from `path` (or the default location), apply `LTVBOOST_*`
    /// overrides and validate the result.
    pub fn load_and_validate(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides();
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
        Ok(config)
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}

impl Validate for MetricsConfig {
    fn validate(&self) -> ValidationResult<()> {
        Checks::new()
            .positive("metrics.creative_assumed_aov", self.creative_assumed_aov)
            .in_range(
                "metrics.max_ad_spend_share",
                self.max_ad_spend_share,
                f64::MIN_POSITIVE,
                1.0,
            )
            .ensure(
                self.top_creatives > 0,
                "metrics.top_creatives",
                "must be at least 1",
            )
            .finish()
    }
}

impl Validate for AdsConfig {
    fn validate(&self) -> ValidationResult<()> {
        self.scaling_factors
            .iter()
            .fold(Checks::new(), |checks, factor| {
                checks.positive("ads.scaling_factors", *factor)
            })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test_case(0.0 => false ; "zero")]
    #[test_case(-1.0 => false ; "negative")]
    #[test_case(f64::NAN => false ; "nan")]
    #[test_case(0.01 => true ; "small positive")]
    fn test_positive_check(value: f64) -> bool {
        Checks::new().positive("aov", value).finish().is_ok()
    }

    #[test_case(0.0 => true ; "lower bound")]
    #[test_case(100.0 => true ; "upper bound")]
    #[test_case(100.5 => false ; "above")]
    #[test_case(-0.1 => false ; "below")]
    fn test_percent_check(value: f64) -> bool {
        Checks::new().percent("repeat_rate", value).finish().is_ok()
    }

    #[test]
    fn test_blank_text_is_missing() {
        let err = Checks::new().not_blank("niche", "   ").finish().unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                field: "niche".into()
            }
        );
    }

    #[test]
    fn test_multiple_errors_are_collected() {
        let err = Checks::new()
            .positive("aov", 0.0)
            .percent("repeat_rate", 120.0)
            .finish()
            .unwrap_err();
        match err {
            ValidationError::Multiple(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.observability.log_format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_metrics_config() {
        let mut config = Config::default();
        config.metrics.creative_assumed_aov = 0.0;
        config.metrics.max_ad_spend_share = 1.5;
        assert!(matches!(
            config.metrics.validate(),
            Err(ValidationError::Multiple(_))
        ));
    }

    #[test]
    fn test_load_and_validate_reads_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "metrics": { "top_creatives": 5 } }"#).unwrap();

        let config = Config::load_and_validate(Some(&path)).unwrap();
        assert_eq!(config.metrics.top_creatives, 5);
    }

    #[test]
    fn test_load_and_validate_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "metrics": { "max_ad_spend_share": 2.0 } }"#).unwrap();

        let err = Config::load_and_validate(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_invalid_scaling_factor() {
        let mut config = Config::default();
        config.ads.scaling_factors = vec![1.1, 0.0];
        assert!(config.ads.validate().is_err());
    }
}
