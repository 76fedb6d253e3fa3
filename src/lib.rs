//! Shared library for `CijferMeester`
//! Contains the grade statistics engine and the layers the CLI builds on

pub mod core;
pub mod logger;

pub use crate::core::{book, config, get_version, models, report, stats, store};
