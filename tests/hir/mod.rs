//! Navigation tests
//!
//! Tests for:
//! - Overload-aware implementation lookup
//! - Declaration lookup from implementation headers
//! - Receiver classes and module files

pub mod tests_navigation;
