//! Domain-specific assertion macros for logsift harnesses.
//!
//! These wrap plain `assert!`s with failure messages that say which record
//! field was wrong and what the record actually held.

use logsift_core::Record;

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a `Record` has a field with an expected value.
///
/// ```rust
/// assert_has_field!(record, "incidentid", "1");
/// ```
#[macro_export]
macro_rules! assert_has_field {
    ($record:expr, $key:expr, $value:expr) => {{
        let record: &logsift_core::Record = &$record;
        let key: &str = $key;
        let expected = serde_json::json!($value);
        match record.get(key) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_has_field! failed:\n  record[{:?}]\n  expected: {}\n  actual:   {}",
                key, expected, actual
            ),
            None => panic!(
                "assert_has_field! failed: field {:?} not found in record.\n  Available fields: {:?}",
                key,
                record.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a `Record` does not contain a field.
#[macro_export]
macro_rules! assert_field_absent {
    ($record:expr, $key:expr) => {{
        let record: &logsift_core::Record = &$record;
        let key: &str = $key;
        if let Some(actual) = record.get(key) {
            panic!(
                "assert_field_absent! failed: field {:?} present with value {}",
                key, actual
            );
        }
    }};
}

/// Assert that every key of a record is lower-case.
pub fn assert_lowercase_keys(record: &Record) {
    for key in record.keys() {
        assert_eq!(key, &key.to_lowercase(), "record key {key:?} is not lower-case");
    }
}

// ---------------------------------------------------------------------------
// CSV helpers
// ---------------------------------------------------------------------------

/// Parse CSV text into `(header, rows)`.
pub fn read_csv(text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let header = reader
        .headers()
        .expect("csv header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("csv row").iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

/// Cell lookup by column name.
pub fn cell<'a>(header: &[String], row: &'a [String], column: &str) -> &'a str {
    let idx = header
        .iter()
        .position(|h| h == column)
        .unwrap_or_else(|| panic!("column {column:?} not in header {header:?}"));
    &row[idx]
}
