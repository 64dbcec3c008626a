//! Field Dictionary — the ordered catalogue of known output fields.
//!
//! Catalogue order is column priority: the tabular writer emits these first,
//! in this order, before any other observed key. [`FIELD_PRIORITY`] mirrors
//! [`FIELDS`] as a compile-time perfect hash so lookups stay O(1) on the hot
//! path; the two are kept in lockstep by a unit test.

use phf::phf_map;

/// Known output fields, highest priority first.
pub const FIELDS: &[&str] = &[
    // Incident / alert identity
    "id",
    "orgid",
    "incidentid",
    "alertid",
    "timestamp",
    // Detection
    "detectorid",
    "alerttitle",
    "category",
    "mitretechniques",
    "incidentgrade",
    "actiongrouped",
    "actiongranular",
    // Evidence
    "entitytype",
    "evidencerole",
    "deviceid",
    "sha256",
    "ipaddress",
    "url",
    // Account
    "accountsid",
    "accountupn",
    "accountobjectid",
    "accountname",
    // Device / mail / registry
    "devicename",
    "networkmessageid",
    "emailclusterid",
    "registrykey",
    "registryvaluename",
    "registryvaluedata",
    // Application
    "applicationid",
    "applicationname",
    "oauthapplicationid",
    // Threat / file / resource
    "threatfamily",
    "filename",
    "folderpath",
    "resourceidname",
    "resourcetype",
    "roles",
    // Platform
    "osfamily",
    "osversion",
    "antispamdirection",
    // Verdict
    "suspicionlevel",
    "lastverdict",
    // Geo
    "countrycode",
    "state",
    "city",
    // Windows event
    "eventid",
    "eventtype",
    "channel",
    "source",
    "guid",
    "datatype",
    // Seen in generated sample data
    "macaddress",
    "powershellhash",
    "index",
];

/// Field name → position in [`FIELDS`].
pub static FIELD_PRIORITY: phf::Map<&'static str, usize> = phf_map! {
    // Incident / alert identity
    "id" => 0,
    "orgid" => 1,
    "incidentid" => 2,
    "alertid" => 3,
    "timestamp" => 4,
    // Detection
    "detectorid" => 5,
    "alerttitle" => 6,
    "category" => 7,
    "mitretechniques" => 8,
    "incidentgrade" => 9,
    "actiongrouped" => 10,
    "actiongranular" => 11,
    // Evidence
    "entitytype" => 12,
    "evidencerole" => 13,
    "deviceid" => 14,
    "sha256" => 15,
    "ipaddress" => 16,
    "url" => 17,
    // Account
    "accountsid" => 18,
    "accountupn" => 19,
    "accountobjectid" => 20,
    "accountname" => 21,
    // Device / mail / registry
    "devicename" => 22,
    "networkmessageid" => 23,
    "emailclusterid" => 24,
    "registrykey" => 25,
    "registryvaluename" => 26,
    "registryvaluedata" => 27,
    // Application
    "applicationid" => 28,
    "applicationname" => 29,
    "oauthapplicationid" => 30,
    // Threat / file / resource
    "threatfamily" => 31,
    "filename" => 32,
    "folderpath" => 33,
    "resourceidname" => 34,
    "resourcetype" => 35,
    "roles" => 36,
    // Platform
    "osfamily" => 37,
    "osversion" => 38,
    "antispamdirection" => 39,
    // Verdict
    "suspicionlevel" => 40,
    "lastverdict" => 41,
    // Geo
    "countrycode" => 42,
    "state" => 43,
    "city" => 44,
    // Windows event
    "eventid" => 45,
    "eventtype" => 46,
    "channel" => 47,
    "source" => 48,
    "guid" => 49,
    "datatype" => 50,
    // Seen in generated sample data
    "macaddress" => 51,
    "powershellhash" => 52,
    "index" => 53,
};

/// Spellings under which a dictionary field may appear in a decoded message,
/// tried in order. The empty prefix is the bare name.
pub const SOURCE_PREFIXES: &[&str] = &["", "event_", "eventdata_"];

/// Catalogue position of `name`, if it is a known field.
pub fn priority(name: &str) -> Option<usize> {
    FIELD_PRIORITY.get(name).copied()
}

pub fn is_known(name: &str) -> bool {
    FIELD_PRIORITY.contains_key(name)
}

/// Candidate message keys for a dictionary field, in resolution order.
pub fn source_keys(name: &str) -> impl Iterator<Item = String> + '_ {
    SOURCE_PREFIXES.iter().map(move |prefix| format!("{prefix}{name}"))
}
