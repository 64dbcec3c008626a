//! In-memory source over an already-fetched search response.

use crate::{response_hits, HitSource, SourceError};
use logsift_core::Hit;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ResponseSource {
    response: Value,
}

impl ResponseSource {
    pub fn new(response: Value) -> Self {
        Self { response }
    }
}

impl HitSource for ResponseSource {
    fn name(&self) -> String {
        "search-response".to_string()
    }

    fn fetch(&self) -> Result<Vec<Hit>, SourceError> {
        let hits = response_hits(&self.response)
            .cloned()
            .ok_or_else(|| SourceError::Malformed("response has no hits.hits array".to_string()))?;
        debug!(hits = hits.len(), "hits taken from response");
        Ok(hits)
    }
}
