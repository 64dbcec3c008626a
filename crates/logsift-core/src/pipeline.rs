//! Batch pipeline — fans extraction out over blocking worker tasks.
//!
//! Hits are split into contiguous chunks, each chunk is extracted on
//! `spawn_blocking`, and the handles are awaited in spawn order, so the output
//! order always equals the input order. Nothing is written until every chunk
//! has come back.

use crate::extract::extract_all;
use crate::types::{Hit, Record};
use tracing::debug;

/// Below this many hits per worker the spawn overhead is not worth it.
const MIN_CHUNK: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("extraction worker failed: {0}")]
    Worker(String),
}

/// Extract `hits` using up to `workers` blocking tasks. `workers <= 1`, or a
/// batch too small to split, runs inline on the caller's task.
pub async fn extract_parallel(hits: Vec<Hit>, workers: usize) -> Result<Vec<Record>, PipelineError> {
    if workers <= 1 || hits.len() <= MIN_CHUNK {
        return Ok(extract_all(&hits));
    }

    let total = hits.len();
    let chunk_size = total.div_ceil(workers).max(MIN_CHUNK);
    let mut handles = Vec::with_capacity(total.div_ceil(chunk_size));
    let mut remaining = hits.into_iter();
    loop {
        let chunk: Vec<Hit> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        handles.push(tokio::task::spawn_blocking(move || extract_all(&chunk)));
    }
    debug!(total, chunks = handles.len(), chunk_size, "extraction fanned out");

    let mut records = Vec::with_capacity(total);
    for handle in handles {
        let chunk = handle
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))?;
        records.extend(chunk);
    }
    Ok(records)
}
