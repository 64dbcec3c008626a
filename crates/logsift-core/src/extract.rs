//! Record Extractor — flattens one search hit into a [`Record`].
//!
//! Every step is optional: a missing or malformed sub-structure simply
//! contributes no fields. Extraction never fails.
//!
//! ```text
//! _id, _index                  → _id, _index
//! _source.@timestamp/@version  → @timestamp, @version
//! _source.agent.*              → agent_<key>
//! _source.log.file.*           → log_file_<key>
//! _source.log_type             → log_type
//! _source.message              → decoder → normalizer → xml → dictionary
//! ```

use crate::decoder::{self, Fields};
use crate::fields::{source_keys, FIELDS};
use crate::normalizer::normalize;
use crate::types::{Hit, Record};
use crate::xml::extract_xml;
use serde_json::Value;
use tracing::{debug, trace};

const HIT_METADATA: &[&str] = &["_id", "_index"];
const ENVELOPE_METADATA: &[&str] = &["@timestamp", "@version"];

/// Extract one record from a raw hit.
pub fn extract(hit: &Hit) -> Record {
    let mut record = Record::new();

    for key in HIT_METADATA {
        if let Some(v) = hit.get(key) {
            record.insert(key, v.clone());
        }
    }

    let Some(source) = hit.get("_source").and_then(Value::as_object) else {
        trace!("hit has no _source object");
        return record;
    };

    for key in ENVELOPE_METADATA {
        if let Some(v) = source.get(*key) {
            record.insert(key, v.clone());
        }
    }

    flatten_into(&mut record, "agent", source.get("agent"));
    flatten_into(
        &mut record,
        "log_file",
        source.get("log").and_then(|log| log.get("file")),
    );

    if let Some(v) = source.get("log_type") {
        record.insert("log_type", v.clone());
    }

    if let Some(message) = source.get("message").and_then(Value::as_str) {
        let fields = message_fields(message);
        resolve_dictionary(&mut record, &fields);
        for (key, value) in fields {
            record.insert_if_absent(key, value);
        }
    }

    let id = hit.get("_id").and_then(Value::as_str).unwrap_or("-");
    debug!(
        id,
        fields = record.len(),
        "hit extracted"
    );
    record
}

/// Extract every hit, preserving input order.
pub fn extract_all(hits: &[Hit]) -> Vec<Record> {
    hits.iter().map(extract).collect()
}

/// Decode and normalise a message, then fold in any embedded event XML.
/// Message-derived keys win over XML-derived ones.
pub fn message_fields(message: &str) -> Fields {
    let mut fields = normalize(decoder::decode(message));

    let xml = fields
        .get("eventxml")
        .and_then(Value::as_str)
        .map(extract_xml)
        .unwrap_or_default();
    for (key, value) in xml {
        fields.entry(key).or_insert(Value::String(value));
    }

    fields
}

/// Populate dictionary fields from the first matching source spelling.
fn resolve_dictionary(record: &mut Record, fields: &Fields) {
    for name in FIELDS {
        if let Some(value) = source_keys(name).find_map(|key| fields.get(&key)) {
            record.insert(name, value.clone());
        }
    }
}

/// Copy the members of an object-valued sub-mapping as `<prefix>_<key>`.
fn flatten_into(record: &mut Record, prefix: &str, sub: Option<&Value>) {
    let Some(map) = sub.and_then(Value::as_object) else {
        return;
    };
    for (key, value) in map {
        record.insert(format!("{prefix}_{key}"), value.clone());
    }
}
