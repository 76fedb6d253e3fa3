//! Core module for common functionality across all targets

pub mod book;
pub mod config;
pub mod models;
pub mod report;
pub mod stats;
pub mod store;

/// Returns the current version of the `CijferMeester` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
