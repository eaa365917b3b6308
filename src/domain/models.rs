use std::fmt;
use std::path::PathBuf;

/// Metadata attached to a hash or publisher on the store.
///
/// Keys are free-form; values are whatever JSON the producer put there.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashKind {
    Hash,
    Text,
    File,
    Publisher,
}

impl HashKind {
    pub fn label(self) -> &'static str {
        match self {
            HashKind::Hash => "hash",
            HashKind::Text => "text",
            HashKind::File => "file",
            HashKind::Publisher => "publisher",
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one CLI input.
///
/// `digest` is a SHA-256 hex digest computed locally, except for
/// [`HashKind::Hash`] where it is the user's string taken verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashRecord {
    pub kind: HashKind,
    pub digest: String,
}

/// Per-invocation flags threaded into the batch processor.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub details: bool,
    pub assume_yes: bool,
    pub publisher_scope: Option<String>,
    pub meta_files: Vec<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub ok: bool,
}
