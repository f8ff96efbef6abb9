//! Resolver configuration.

use indexmap::IndexMap;

/// Default name of the redirection file.
pub const DEFAULT_REDIRECTION_FILE: &str = "Clarion100.red";

/// Settings that drive redirection file lookup and macro expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectionConfig {
    /// Installation binary directory; holds the global redirection file and
    /// is the value of `%BIN%`
    pub bin_dir: Option<String>,
    /// File name looked up in the project directory, then in `bin_dir`;
    /// the value of `%REDNAME%`
    pub redirection_file: String,
    /// Active build configuration (`Debug`, `Release`, ...)
    pub compile_mode: Option<String>,
    /// Extra macros, keyed by upper-cased name
    pub macros: IndexMap<String, String>,
}

impl Default for RedirectionConfig {
    fn default() -> Self {
        Self {
            bin_dir: None,
            redirection_file: DEFAULT_REDIRECTION_FILE.to_string(),
            compile_mode: None,
            macros: IndexMap::new(),
        }
    }
}

impl RedirectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bin_dir(mut self, dir: impl Into<String>) -> Self {
        self.bin_dir = Some(dir.into());
        self
    }

    pub fn with_redirection_file(mut self, name: impl Into<String>) -> Self {
        self.redirection_file = name.into();
        self
    }

    pub fn with_compile_mode(mut self, mode: impl Into<String>) -> Self {
        self.compile_mode = Some(mode.into());
        self
    }

    pub fn with_macro(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.macros
            .insert(name.as_ref().to_ascii_uppercase(), value.into());
        self
    }

    /// Value of a `%NAME%` macro, compared case-insensitively.
    pub fn macro_value(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case("BIN") {
            return self.bin_dir.as_deref();
        }
        if name.eq_ignore_ascii_case("REDNAME") {
            return Some(&self.redirection_file);
        }
        self.macros
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }
}
