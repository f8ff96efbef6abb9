//! Parser error handling
//!
//! - Categorized error codes for filtering and documentation
//! - Context-aware error messages and recovery sets
//! - Hints for common mistakes
//! - Related span tracking (e.g. "opened here" for unclosed structures)

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{RelatedInfo, Severity, SyntaxError, context_message};
