//! Symbol navigation over Clarion sources.
//!
//! Works line by line on raw text, so it can search files that are not
//! open and have never been parsed.
//!
//! ## Key Types
//!
//! - [`MethodSignature`]: parameter kinds that tell overloads apart
//! - [`SymbolResolver`]: implementation and declaration lookup
//! - [`ImplementationQuery`]: what to look for, from a call or a prototype
//!
//! ## Flow
//!
//! ```text
//! CallSite::at(line, col)        ← cursor on `SELF.Method(a, b)`
//!     │
//!     ▼
//! receiver_class(text, line)     ← SELF / PARENT / variable → class
//!     │
//!     ▼
//! class_module + candidate_files ← MODULE('x.clw') via redirection
//!     │
//!     ▼
//! find_implementation            ← `Class.Method PROCEDURE(...)`
//! ```

mod resolve;
mod signature;
pub mod text_utils;

pub use resolve::{
    CallSite, ImplementationQuery, Location, SourceText, SymbolResolver, class_module,
    receiver_class,
};
pub use signature::{
    HeaderMatch, MethodSignature, match_method_header, match_prototype, match_procedure_header,
};
