//! IDE feature tests
//!
//! Tests for:
//! - Folding ranges
//! - Diagnostics
//! - The cached analysis host

pub mod tests_analysis;
pub mod tests_diagnostics;
pub mod tests_folding;
