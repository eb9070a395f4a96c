//! Municipal fiscal peer comparison.
//!
//! The [`comparison`] engine works on a read-only [`dataset::Dataset`] snapshot; the remaining
//! modules carry configuration, telemetry, and error plumbing for the service that hosts it.

pub mod comparison;
pub mod config;
pub mod dataset;
pub mod error;
pub mod telemetry;
