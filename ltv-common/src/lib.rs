//! LTV Common - Shared configuration, errors, logging and validation.
//!
//! This crate provides:
//! - Configuration types and loading
//! - Error types and handling utilities
//! - Logging setup
//! - Validation trait and field checks used on calculator inputs

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{AdsConfig, Config, MetricsConfig, ObservabilityConfig};
pub use error::{Error, Result, ResultExt};
pub use validation::{Checks, Validate, ValidationError, ValidationResult};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result, ResultExt};
    pub use crate::logging::init_logging;
    pub use crate::validation::{Checks, Validate, ValidationError};
}
