//! logsift-core — extraction engine for logsift.
//!
//! This crate turns raw search hits into flat, lower-cased records and writes
//! them out as a priority-ordered table. Each stage is a public module so the
//! integration harnesses and benches can drive it directly.
//!
//! # Architecture
//!
//! ```text
//! Hit ──► extract ──┬─► decoder ──► normalizer ──► xml
//!                   └─► fields (dictionary resolution)
//!
//! Vec<Record> ──► export (column union, CSV)
//! ```
//!
//! Extraction is a pure function of one hit. Records are buffered for the
//! whole run because column order depends on the union of every key.

pub mod cleaner;
pub mod config;
pub mod decoder;
pub mod export;
pub mod extract;
pub mod fields;
pub mod literal;
pub mod normalizer;
pub mod pipeline;
pub mod types;
pub mod xml;

pub use export::{ExportError, ExportOptions, Table};
pub use extract::{extract, extract_all};
pub use types::{Hit, Record};
