//! File source — reads hits from a saved search response or an NDJSON dump.
//!
//! Two file-level formats are tried in order:
//!
//! 1. one JSON document: a search response with a `hits.hits` array (or a
//!    single bare hit carrying `_source`);
//! 2. newline-delimited JSON, one hit per line, attempted only when the file
//!    does not parse as a single document.
//!
//! Bytes that are not valid UTF-8 are replaced rather than rejected.

use crate::{response_hits, HitSource, SourceError};
use logsift_core::Hit;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HitSource for FileSource {
    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<Hit>, SourceError> {
        let bytes = std::fs::read(&self.path).map_err(|source| SourceError::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let hits = parse_hits(&text)?;
        info!(path = %self.path.display(), hits = hits.len(), "hits loaded from file");
        Ok(hits)
    }
}

/// Parse file contents into hits using the document → NDJSON fallback.
pub fn parse_hits(text: &str) -> Result<Vec<Hit>, SourceError> {
    match serde_json::from_str::<Value>(text) {
        Ok(doc) => hits_from_document(doc),
        Err(e) => {
            debug!(error = %e, "not a single JSON document; trying NDJSON");
            parse_ndjson(text)
        }
    }
}

fn hits_from_document(mut doc: Value) -> Result<Vec<Hit>, SourceError> {
    if response_hits(&doc).is_some() {
        let hits = doc
            .pointer_mut("/hits/hits")
            .map(Value::take)
            .and_then(|v| match v {
                Value::Array(hits) => Some(hits),
                _ => None,
            })
            .unwrap_or_default();
        debug!(hits = hits.len(), "search response document");
        return Ok(hits);
    }
    if doc.get("_source").is_some() {
        return Ok(vec![doc]);
    }
    Err(SourceError::Malformed(
        "document has no hits.hits array".to_string(),
    ))
}

/// One hit per non-blank line; unparsable lines are skipped.
pub fn parse_ndjson(text: &str) -> Result<Vec<Hit>, SourceError> {
    let mut hits = Vec::new();
    let mut skipped = 0usize;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(hit) => hits.push(hit),
            Err(e) => {
                skipped += 1;
                debug!(line = lineno + 1, error = %e, "skipping unparsable NDJSON line");
            }
        }
    }

    if hits.is_empty() {
        return Err(SourceError::Malformed(
            "no valid JSON records found".to_string(),
        ));
    }
    info!(hits = hits.len(), skipped, "parsed NDJSON hits");
    Ok(hits)
}
