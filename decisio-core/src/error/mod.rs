//! Error handling types for the decisio engine.
//!
//! This module is intentionally dependency-light and shared across crates.

mod conversions;
pub mod types;

pub use types::*;
