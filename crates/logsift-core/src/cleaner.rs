//! Value Cleaner — normalises one raw cell value to a clean string.
//!
//! Brace and bracket characters are stripped before trimming so that a second
//! pass has nothing left to change (`clean_str` is idempotent).

use phf::phf_set;
use serde_json::Value;

/// Placeholder tokens that mean "no value". Compared case-insensitively.
static PLACEHOLDERS: phf::Set<&'static str> = phf_set! {
    "not available",
    "na",
    "none",
    "-",
    "unknown",
};

/// Clean a JSON value. `Null` is the missing marker and maps to `""`;
/// structured values are cleaned from their compact JSON text.
pub fn clean(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => clean_str(s),
        other => clean_str(&other.to_string()),
    }
}

/// Clean a string: drop `{ } [ ]`, trim, and blank out placeholders.
pub fn clean_str(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '[' | ']'))
        .collect();
    let trimmed = stripped.trim();
    if is_placeholder(trimmed) {
        return String::new();
    }
    trimmed.to_string()
}

/// Whether `s` is one of the placeholder tokens, in any letter-casing.
pub fn is_placeholder(s: &str) -> bool {
    PLACEHOLDERS.contains(s.to_lowercase().as_str())
}
