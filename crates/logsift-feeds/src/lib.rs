//! logsift-feeds — hit source adapters for logsift.
//!
//! A source materialises a finite list of raw hits before extraction begins,
//! or fails outright. The search backend itself is not part of this crate:
//! anything that can hand over an already-fetched response plugs in through
//! [`ResponseSource`] or its own [`HitSource`] impl.

pub mod file;
pub mod response;

pub use file::FileSource;
pub use response::ResponseSource;

use logsift_core::Hit;
use std::path::PathBuf;

/// Run-level failures while obtaining hits. Both abort the run before any
/// extraction happens.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("hit source {path} could not be read: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed hit document: {0}")]
    Malformed(String),
}

/// Trait implemented by each hit source.
pub trait HitSource: Send + Sync {
    /// Human-readable description for logs.
    fn name(&self) -> String;

    /// Materialise every hit.
    fn fetch(&self) -> Result<Vec<Hit>, SourceError>;
}

/// Pull the `hits.hits` array out of a search response.
pub fn response_hits(response: &serde_json::Value) -> Option<&Vec<Hit>> {
    response
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(serde_json::Value::as_array)
}
