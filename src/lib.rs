//! logsift — extract and normalise security-log search hits into CSV.
//!
//! The binary is a thin shell around [`run`]: pull every hit from a
//! [`HitSource`], extract one record per hit, then write the table once the
//! full column set is known.
//!
//! # Architecture
//!
//! ```text
//! HitSource ──► pipeline (extract per hit) ──► export (CSV, atomic persist)
//! ```
//!
//! Source and write failures abort the run; a hit that cannot be decoded only
//! loses its message-derived fields.

use logsift_core::config::Config;
use logsift_core::export::{self, ExportError};
use logsift_core::pipeline::{self, PipelineError};
use logsift_feeds::{HitSource, SourceError};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub hits: usize,
    pub columns: usize,
    pub output: PathBuf,
}

/// Fetch, extract and write. Nothing is written unless every hit was
/// extracted.
pub async fn run(source: &dyn HitSource, config: &Config) -> Result<RunSummary, RunError> {
    info!(source = %source.name(), "fetching hits");
    let hits = source.fetch()?;
    let total = hits.len();
    info!(hits = total, workers = config.run.workers, "extracting records");

    let records = pipeline::extract_parallel(hits, config.run.workers).await?;
    let columns = export::columns(&records).len();

    info!(
        records = records.len(),
        columns,
        path = %config.output.path.display(),
        "saving records"
    );
    export::write_csv_file(&records, &config.output.path, config.output.export_options())?;

    Ok(RunSummary {
        hits: total,
        columns,
        output: config.output.path.clone(),
    })
}
