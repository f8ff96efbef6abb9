//! Documents handed in by the host.

use std::fmt;
use std::sync::Arc;

use super::LineIndex;

/// Identity of a document (URI or path), cheap to clone and hash.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// A versioned snapshot of a document's text.
///
/// Owned by the host (editor session); the analysis layer only reads it.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    id: DocumentId,
    version: i32,
    text: Arc<str>,
}

impl SourceBuffer {
    pub fn new(id: impl Into<DocumentId>, version: i32, text: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            version,
            text: text.into(),
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Build a line index over the current text.
    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text)
    }

    /// A new snapshot of the same document with the next version number.
    pub fn with_text(&self, text: impl Into<Arc<str>>) -> Self {
        Self {
            id: self.id.clone(),
            version: self.version + 1,
            text: text.into(),
        }
    }
}
