//! Static message corpora and event fragments used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative `message`
//! strings in one encoding, so harnesses can assert which decoding strategy
//! picks them up without building inputs at test time.

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Messages that are strict JSON objects.
pub const CORPUS_JSON: &[&str] = &[
    r#"{"IncidentId": "1", "Timestamp": "2024-01-01T00:00:00"}"#,
    r#"{"AlertId": "da637", "AlertTitle": "Suspicious PowerShell", "Category": "Execution", "MitreTechniques": ["T1059.001"]}"#,
    r#"{"EntityType": "Ip", "EvidenceRole": "Related", "IpAddress": "10.0.0.7", "CountryCode": "US"}"#,
    r#"{"DeviceId": "d-1", "DeviceName": "WS-01", "OSFamily": "Windows", "OSVersion": 10}"#,
    r#"{"event_channel": "Security", "eventdata_accountname": "alice"}"#,
];

/// Messages produced by Python's `str(dict)`.
pub const CORPUS_PYTHON_LITERAL: &[&str] = &[
    "{'IncidentId': '7', 'Severity': 'High', 'Entities': [{'Type': 'ip'}]}",
    "{'AlertTitle': 'Suspicious logon', 'Ack': False, 'Score': 0.75, 'Owner': None}",
    "{'AccountUpn': 'alice@corp.example', 'Roles': ('Admin', 'User'),}",
    "{u'FileName': u'cmd.exe', 'FolderPath': r'C:\\Windows\\System32'}",
];

/// Messages only the `key=value` scan can read.
pub const CORPUS_KEY_VALUE: &[&str] = &[
    "{IncidentId=42, Title=Brute force, Severity=High}",
    "key1=foo, key2=bar}",
    "{DeviceName=WS-01, AccountUpn=Not Available, Channel=Security}",
    "EventID=4625, Channel=Security",
];

/// Messages no strategy can read.
pub const CORPUS_UNSTRUCTURED: &[&str] = &[
    "foo bar baz",
    "",
    "{}",
    "[]",
    "2024-01-15 10:00:01 ERROR Failed to connect to database after 3 retries",
    "{'unterminated': 'dict'",
];

/// A complete Security 4624 event as Windows renders it.
pub const EVENT_4624_XML: &str = "<Event xmlns='http://schemas.microsoft.com/win/2004/08/events/event'>\
<System><Provider Name='Microsoft-Windows-Security-Auditing' Guid='{54849625-5478-4994-A5BA-3E3B0328C30D}'/>\
<EventID>4624</EventID><Version>2</Version><Level>0</Level><Task>12544</Task><Opcode>0</Opcode>\
<Keywords>0x8020000000000000</Keywords><TimeCreated SystemTime='2024-01-15T10:00:00.000000Z'/>\
<EventRecordID>123456</EventRecordID><Correlation ActivityID='{A1B2C3D4-0000-0000-0000-000000000000}'/>\
<Execution ProcessID='636' ThreadID='4520'/><Channel>Security</Channel><Computer>DC01.corp.example</Computer>\
</System><EventData><Data Name='TargetUserName'>alice</Data><Data Name='LogonType'>3</Data>\
<Data Name='IpAddress'>10.0.0.7</Data></EventData></Event>";

/// The same event cut off mid-way through `EventData`.
pub const EVENT_TRUNCATED_XML: &str = "<Event><System><EventID>4688</EventID><Channel>Security</Channel>\
</System><EventData><Data Name='NewProcessName'>C:\\Windows\\System32\\cmd.exe</Data><Data Name='Comm";

/// Generate `n` hits whose JSON messages cycle through a few field shapes.
pub fn synthetic_hits(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let message = match i % 3 {
                0 => format!(r#"{{"IncidentId": "{i}", "DeviceName": "WS-{:02}"}}"#, i % 17),
                1 => format!("{{'AlertId': 'a-{i}', 'Category': 'Discovery'}}"),
                _ => format!("{{Channel=Security, EventID={}}}", 4600 + i % 50),
            };
            serde_json::json!({
                "_id": format!("hit-{i}"),
                "_index": "alerts-2024.01",
                "_source": {"@timestamp": "2024-01-15T10:00:00Z", "message": message}
            })
        })
        .collect()
}

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture input");
    path
}
