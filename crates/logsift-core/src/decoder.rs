//! Message Decoder — turns one raw `message` string into a field map.
//!
//! Producers ship the same logical fields in several textual encodings, so
//! decoding is an ordered chain of independent strategies:
//!
//! 1. strict JSON object
//! 2. Python literal dict (`str(dict)` output)
//! 3. `key=value, key=value}` regex scan
//!
//! The first strategy that yields a non-empty map wins. Whatever wins, the raw
//! text is also scanned for an `EventProperties=[...]` span whose pairs land
//! under `eventprop_<key>`. All keys in the result are lower-case.

use crate::literal;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

/// Decoded message fields, keyed by lower-case name.
pub type Fields = Map<String, Value>;

/// `key=value` token, terminated by `, `, `}` or end of text.
static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)=([^,]+?)(?:,\s|\}|$)").expect("static regex"));

static EVENT_PROPERTIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"EventProperties=\[(.*?)\]").expect("static regex"));

/// `key=value` token inside an `EventProperties=[...]` span.
static EVENT_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)=([^,]+?)(?:,\s|\]|$)").expect("static regex"));

/// Which strategy produced a decoded map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Json,
    PythonLiteral,
    KeyValue,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Json => write!(f, "json"),
            Strategy::PythonLiteral => write!(f, "python-literal"),
            Strategy::KeyValue => write!(f, "key-value"),
        }
    }
}

type StrategyFn = fn(&str) -> Option<Fields>;

/// Strategies in the order they are tried.
const STRATEGIES: &[(Strategy, StrategyFn)] = &[
    (Strategy::Json, strict_json),
    (Strategy::PythonLiteral, python_literal),
    (Strategy::KeyValue, key_value),
];

/// Decode a raw message. Never fails: an undecodable message yields whatever
/// `EventProperties` pairs could be recovered, possibly nothing.
pub fn decode(raw: &str) -> Fields {
    decode_with(raw).1
}

/// Like [`decode`], also reporting the winning strategy (`None` when every
/// strategy came up empty).
pub fn decode_with(raw: &str) -> (Option<Strategy>, Fields) {
    let mut winner = None;
    let mut fields = Fields::new();

    for (strategy, parse) in STRATEGIES {
        if let Some(found) = parse(raw) {
            winner = Some(*strategy);
            fields = found;
            break;
        }
    }

    match winner {
        Some(strategy) => debug!(%strategy, fields = fields.len(), "message decoded"),
        None => debug!(
            message = %truncate(raw, 200),
            "message undecodable by any strategy"
        ),
    }

    let mut fields = lowercase_keys(fields);
    merge_event_properties(raw, &mut fields);
    (winner, fields)
}

/// Strategy 1: the message is a JSON object.
pub fn strict_json(raw: &str) -> Option<Fields> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

/// Strategy 2: the message is a Python dict literal.
pub fn python_literal(raw: &str) -> Option<Fields> {
    literal::parse_dict(raw).ok().filter(|map| !map.is_empty())
}

/// Strategy 3: scan for `key=value` tokens. Values are trimmed and a
/// `not available` value becomes null.
pub fn key_value(raw: &str) -> Option<Fields> {
    let mut fields = Fields::new();
    for caps in KEY_VALUE.captures_iter(raw) {
        let value = caps[2].trim();
        let value = if value.eq_ignore_ascii_case("not available") {
            Value::Null
        } else {
            Value::String(value.to_string())
        };
        fields.insert(caps[1].to_lowercase(), value);
    }
    (!fields.is_empty()).then_some(fields)
}

/// Pairs inside the first `EventProperties=[...]` span of `raw`.
pub fn event_properties(raw: &str) -> Vec<(String, String)> {
    let Some(span) = EVENT_PROPERTIES.captures(raw) else {
        return Vec::new();
    };
    EVENT_PROPERTY
        .captures_iter(&span[1])
        .map(|caps| (caps[1].to_lowercase(), caps[2].trim().to_string()))
        .collect()
}

fn merge_event_properties(raw: &str, fields: &mut Fields) {
    for (key, value) in event_properties(raw) {
        fields.insert(format!("eventprop_{key}"), Value::String(value));
    }
}

/// Keys that collide once lower-cased keep the value that came last in the
/// message.
fn lowercase_keys(fields: Fields) -> Fields {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect()
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
