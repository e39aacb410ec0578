#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::too_many_lines
)]

//! Library half of the `ltvboost` binary: command definitions, handlers and
//! terminal rendering.

pub use ltv_common;
pub use ltv_metrics;

pub mod commands;
pub mod output;

pub use commands::{run, Commands, StoreArgs};
pub use output::OutputFormat;
