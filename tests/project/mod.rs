//! Project layout tests
//!
//! Tests for:
//! - Redirection file lookup (project-local and global)
//! - Sections, compile modes and macros
//! - Includes and include cycles
//! - File lookup through search paths

pub mod tests_redirection;
