//! XML Sub-Extractor — pulls fields out of an embedded Windows event XML
//! fragment (`eventxml`).
//!
//! The fragment is frequently truncated or not well-formed by the time it
//! reaches us, so extraction is pattern based rather than a full XML parse.
//! `<Data Name='X'>v</Data>` elements become `eventdata_x`; a fixed table of
//! `<System>` attributes becomes `system_<name>`. The two prefixes are
//! disjoint so the passes never collide.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static DATA_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<Data Name=['"]([^'"]+)['"]>([^<]+)</Data>"#).expect("static regex")
});

/// `(name, pattern)`; the first capture group is the value.
const SYSTEM_PATTERNS: &[(&str, &str)] = &[
    ("provider_name", r#"<Provider Name=['"]([^'"]+)['"]"#),
    ("provider_guid", r#"<Provider[^>]*Guid=['"]\{([^}]+)\}['"]"#),
    ("event_id", r"<EventID[^>]*>(\d+)</EventID>"),
    ("version", r"<Version>(\d+)</Version>"),
    ("level", r"<Level>(\d+)</Level>"),
    ("task", r"<Task>(\d+)</Task>"),
    ("opcode", r"<Opcode>(\d+)</Opcode>"),
    ("keywords", r"<Keywords>(0x[0-9a-fA-F]+)</Keywords>"),
    ("computer", r"<Computer>([^<]+)</Computer>"),
    ("channel", r"<Channel>([^<]+)</Channel>"),
    ("time_created", r#"<TimeCreated SystemTime=['"]([^'"]+)['"]"#),
    ("event_record_id", r"<EventRecordID>(\d+)</EventRecordID>"),
    ("process_id", r#"<Execution ProcessID=['"](\d+)['"]"#),
    ("thread_id", r#"<Execution[^>]*ThreadID=['"](\d+)['"]"#),
    ("correlation_activity_id", r#"<Correlation ActivityID=['"]\{([^}]+)\}['"]"#),
];

static SYSTEM_REGEXES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SYSTEM_PATTERNS
        .iter()
        .map(|(name, pattern)| (*name, Regex::new(pattern).expect("static regex")))
        .collect()
});

/// Extract `eventdata_*` and `system_*` fields from an event XML fragment.
pub fn extract_xml(xml: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    for caps in DATA_ELEMENT.captures_iter(xml) {
        out.insert(
            format!("eventdata_{}", caps[1].to_lowercase()),
            caps[2].to_string(),
        );
    }

    for (name, re) in SYSTEM_REGEXES.iter() {
        if let Some(caps) = re.captures(xml) {
            out.insert(format!("system_{name}"), caps[1].to_string());
        }
    }

    out
}
