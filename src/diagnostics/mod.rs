//! Read-only typed view over the diagnostics payload.
//!
//! [`DiagnosticsModel`] validates the payload shape once and then only hands
//! out borrowed section data; it never transforms anything.

#![allow(missing_docs)]

pub mod payload;

use std::fs;
use std::path::Path;

use crate::core::errors::{Result, ToolbarError};
use crate::section::SectionId;

pub use payload::{
    DiagnosticsPayload, Environment, IncludedResource, LogEntry, LogKind, OrderedPairs,
    QueryRecord, RequestInfo,
};

/// Top-level keys that must be present for the panel to render.
pub const REQUIRED_FIELDS: [&str; 12] = [
    "log",
    "queries",
    "debugLog",
    "request",
    "includes",
    "profile",
    "mwVersion",
    "phpEngine",
    "phpVersion",
    "time",
    "memory",
    "memoryPeak",
];

/// Owner of the payload for the lifetime of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsModel {
    payload: DiagnosticsPayload,
}

impl DiagnosticsModel {
    /// Wrap an already-typed payload.
    #[must_use]
    pub const fn new(payload: DiagnosticsPayload) -> Self {
        Self { payload }
    }

    /// Validate and wrap a JSON payload.
    ///
    /// Fails with `InvalidPayload` naming the first missing required key, or
    /// describing the first type mismatch.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(ToolbarError::invalid_payload(
                "payload must be a JSON object",
            ));
        };
        if let Some(missing) = REQUIRED_FIELDS
            .iter()
            .find(|field| !object.contains_key(**field))
        {
            return Err(ToolbarError::invalid_payload(format!(
                "missing required field `{missing}`"
            )));
        }
        let payload = serde_json::from_value::<DiagnosticsPayload>(value)
            .map_err(|err| ToolbarError::invalid_payload(err.to_string()))?;
        Ok(Self::new(payload))
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|err| ToolbarError::invalid_payload(err.to_string()))?;
        Self::from_value(value)
    }

    /// Read, parse and validate a payload file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ToolbarError::io(path, source))?;
        Self::from_json_str(&raw)
    }

    /// Length of the section's ordered sequence; `None` for request and profile.
    #[must_use]
    pub fn section_count(&self, id: SectionId) -> Option<usize> {
        match id {
            SectionId::Console => Some(self.payload.log_entries.len()),
            SectionId::Queries => Some(self.payload.queries.len()),
            SectionId::LegacyLog => Some(self.payload.legacy_log_lines.len()),
            SectionId::Includes => Some(self.payload.included_resources.len()),
            SectionId::Request | SectionId::Profile => None,
        }
    }

    #[must_use]
    pub fn log_entries(&self) -> &[LogEntry] {
        &self.payload.log_entries
    }

    #[must_use]
    pub fn queries(&self) -> &[QueryRecord] {
        &self.payload.queries
    }

    #[must_use]
    pub fn legacy_log_lines(&self) -> &[String] {
        &self.payload.legacy_log_lines
    }

    #[must_use]
    pub const fn request(&self) -> &RequestInfo {
        &self.payload.request
    }

    #[must_use]
    pub fn included_resources(&self) -> &[IncludedResource] {
        &self.payload.included_resources
    }

    #[must_use]
    pub const fn profile_trace(&self) -> &serde_json::Value {
        &self.payload.profile_trace
    }

    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.payload.environment
    }
}
