//! Parser tests
//!
//! Tests for:
//! - Program structure (PROGRAM/MEMBER, MAP, procedures, routines)
//! - Data declarations (GROUP, QUEUE, FILE, WINDOW)
//! - Statements and expression precedence
//! - Error recovery and error codes
//! - Preprocessing ahead of parsing

pub mod tests_declarations;
pub mod tests_preprocess;
pub mod tests_recovery;
pub mod tests_statements;
