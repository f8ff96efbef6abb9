//! Project layout: redirection files and the search paths they define.

mod config;
mod error;
pub mod redirection;
mod resolver;

pub use config::{DEFAULT_REDIRECTION_FILE, RedirectionConfig};
pub use error::RedirectionError;
pub use redirection::{RedirectionLine, expand_macros, mask_matches, parse_redirection, section_applies};
pub use resolver::{RedirectionResolver, RedirectionTable};
