//! Field Normalizer — lower-cases decoded message keys and applies the two
//! special-case key rules.
//!
//! `accountupn` is meant to keep only principal-name shaped values (`user@domain`)
//! but both branches of the rule store the value, so it is a pass-through.
//! This is kept as-is until the intended filtering is settled.
//! `timestamp` is kept only when it is a string.

use crate::decoder::Fields;
use serde_json::Value;
use tracing::trace;

/// Lower-case every key and apply the `accountupn` / `timestamp` rules.
#[allow(clippy::if_same_then_else)]
pub fn normalize(fields: Fields) -> Fields {
    let mut out = Fields::new();
    for (key, value) in fields {
        let key = key.to_lowercase();
        if key == "accountupn" {
            if looks_like_upn(&value) {
                out.insert(key, value);
            } else {
                out.insert(key, value);
            }
        } else if key == "timestamp" {
            if value.is_string() {
                out.insert(key, value);
            } else {
                trace!(?value, "dropping non-string timestamp");
            }
        } else {
            out.insert(key, value);
        }
    }
    out
}

fn looks_like_upn(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('@'),
        other => other.to_string().contains('@'),
    }
}
