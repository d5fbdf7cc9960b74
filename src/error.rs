//! Error taxonomy for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the content pipeline.
///
/// A malformed date is deliberately not an error: date normalization falls
/// back to the raw front-matter string instead of failing (see
/// [`crate::content::normalize_date`]).
#[derive(Debug, Error)]
pub enum Error {
    /// No document in the content store matches the requested id.
    #[error("post not found: {0}")]
    PostNotFound(String),

    /// A document could not be read. Nothing in the pipeline catches this;
    /// one unreadable document aborts the whole batch load.
    #[error("failed to read {path:?}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Front-matter failed to parse. Like read failures, this aborts the
    /// batch rather than skipping the document.
    #[error("invalid front-matter in {path:?}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
