//! DBG-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, ToolbarError>;

/// Top-level error type for the debug toolbar.
#[derive(Debug, Error)]
pub enum ToolbarError {
    #[error("[DBG-1001] invalid diagnostics payload: {details}")]
    InvalidPayload { details: String },

    #[error("[DBG-1002] unknown section id: {id:?}")]
    InvalidSectionId { id: String },

    #[error("[DBG-1101] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[DBG-1102] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[DBG-1103] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[DBG-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ToolbarError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidPayload { .. } => "DBG-1001",
            Self::InvalidSectionId { .. } => "DBG-1002",
            Self::InvalidConfig { .. } => "DBG-1101",
            Self::MissingConfig { .. } => "DBG-1102",
            Self::ConfigParse { .. } => "DBG-1103",
            Self::Io { .. } => "DBG-3002",
        }
    }

    /// Whether the caller supplied bad input (payload or trigger id).
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPayload { .. } | Self::InvalidSectionId { .. }
        )
    }

    /// Convenience constructor for payload shape failures.
    #[must_use]
    pub fn invalid_payload(details: impl Into<String>) -> Self {
        Self::InvalidPayload {
            details: details.into(),
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<toml::de::Error> for ToolbarError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
