//! Wire types for the server-produced diagnostics payload.
//!
//! Field names follow the producer's JSON keys (`debugLog`, `mwVersion`,
//! `gitRevision`, ...). Optional VCS fields arrive as `false` when absent, so
//! they go through `false_as_none`.

#![allow(missing_docs)]

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Complete instrumentation snapshot for one page view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsPayload {
    #[serde(rename = "log")]
    pub log_entries: Vec<LogEntry>,
    pub queries: Vec<QueryRecord>,
    #[serde(rename = "debugLog")]
    pub legacy_log_lines: Vec<String>,
    pub request: RequestInfo,
    #[serde(rename = "includes")]
    pub included_resources: Vec<IncludedResource>,
    /// Opaque to the panel; handed to the profile renderer as-is.
    #[serde(rename = "profile")]
    pub profile_trace: serde_json::Value,
    #[serde(flatten)]
    pub environment: Environment,
}

/// Severity of a console entry.
///
/// Unrecognised producer strings are kept so the row can still carry a
/// `mw-debug-console-<type>` class hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogKind {
    Log,
    Warning,
    Deprecated,
    Unknown(String),
}

impl LogKind {
    /// Human label for the console's first column.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Log => "Log",
            Self::Warning => "Warning",
            Self::Deprecated => "Deprecated",
            Self::Unknown(_) => "Unknown",
        }
    }

    /// The producer's type string.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Log => "log",
            Self::Warning => "warn",
            Self::Deprecated => "deprecated",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for LogKind {
    fn from(raw: &str) -> Self {
        match raw {
            "log" => Self::Log,
            "warn" => Self::Warning,
            "deprecated" => Self::Deprecated,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Serialize for LogKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for LogKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// One console line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: LogKind,
    /// Trusted markup produced by the instrumentation layer.
    #[serde(rename = "msg")]
    pub message: String,
    pub caller: String,
}

/// One executed query, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub sql: String,
    #[serde(rename = "time")]
    pub elapsed_seconds: f64,
    #[serde(rename = "function")]
    pub caller_function: String,
}

/// Request line plus header and parameter maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: OrderedPairs,
    #[serde(default)]
    pub params: OrderedPairs,
}

/// One included file/resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedResource {
    pub name: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

/// Environment banner fields shown in the summary bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(rename = "mwVersion")]
    pub product_version: String,
    #[serde(
        rename = "gitRevision",
        default,
        deserialize_with = "false_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub vcs_revision: Option<String>,
    #[serde(
        rename = "gitViewUrl",
        default,
        deserialize_with = "false_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub vcs_view_url: Option<String>,
    #[serde(
        rename = "gitBranch",
        default,
        deserialize_with = "false_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub vcs_branch: Option<String>,
    #[serde(rename = "phpEngine")]
    pub runtime_engine: String,
    #[serde(rename = "phpVersion")]
    pub runtime_version: String,
    #[serde(rename = "time")]
    pub wall_time_seconds: f64,
    #[serde(rename = "memory")]
    pub memory_bytes: u64,
    #[serde(rename = "memoryPeak")]
    pub peak_memory_bytes: u64,
}

/// String map that keeps the producer's key order.
///
/// Producers that serialise an empty map as `[]` are accepted. Non-string
/// values are kept as their compact JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedPairs(pub Vec<(String, String)>);

impl OrderedPairs {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OrderedPairs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for OrderedPairs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for OrderedPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrderedPairsVisitor)
    }
}

struct OrderedPairsVisitor;

impl<'de> Visitor<'de> for OrderedPairsVisitor {
    type Value = OrderedPairs;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string map or an empty array")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            pairs.push((key, text));
        }
        Ok(OrderedPairs(pairs))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(1, &"an empty array"));
        }
        Ok(OrderedPairs::default())
    }
}

/// Treat `false` and `null` as an absent optional string.
fn false_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        other => Err(de::Error::custom(format!(
            "expected string or false, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_kind_maps_known_and_unknown_types() {
        assert_eq!(LogKind::from("log"), LogKind::Log);
        assert_eq!(LogKind::from("warn"), LogKind::Warning);
        assert_eq!(LogKind::from("deprecated"), LogKind::Deprecated);
        let trace = LogKind::from("trace");
        assert_eq!(trace.label(), "Unknown");
        assert_eq!(trace.as_wire(), "trace");
    }

    #[test]
    fn ordered_pairs_keep_document_order() {
        let pairs: OrderedPairs =
            serde_json::from_str(r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#).unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn ordered_pairs_accept_empty_array() {
        let pairs: OrderedPairs = serde_json::from_str("[]").unwrap();
        assert!(pairs.is_empty());
        assert!(serde_json::from_str::<OrderedPairs>(r#"["x"]"#).is_err());
    }

    #[test]
    fn ordered_pairs_stringify_non_string_values() {
        let pairs: OrderedPairs = serde_json::from_str(r#"{"n": 3, "list": [1, 2]}"#).unwrap();
        assert_eq!(pairs.0[0], ("n".to_string(), "3".to_string()));
        assert_eq!(pairs.0[1], ("list".to_string(), "[1,2]".to_string()));
    }

    #[test]
    fn vcs_fields_accept_false_null_and_missing() {
        let env: Environment = serde_json::from_str(
            r#"{
                "mwVersion": "1.25", "gitRevision": false, "gitViewUrl": null,
                "phpEngine": "PHP", "phpVersion": "5.6", "time": 0.5,
                "memory": 10, "memoryPeak": 20
            }"#,
        )
        .unwrap();
        assert_eq!(env.vcs_revision, None);
        assert_eq!(env.vcs_view_url, None);
        assert_eq!(env.vcs_branch, None);
    }

    #[test]
    fn vcs_field_rejects_true() {
        let result = serde_json::from_str::<Environment>(
            r#"{
                "mwVersion": "1.25", "gitRevision": true,
                "phpEngine": "PHP", "phpVersion": "5.6", "time": 0.5,
                "memory": 10, "memoryPeak": 20
            }"#,
        );
        assert!(result.is_err());
    }
}
