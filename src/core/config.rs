//! Configuration system: TOML file + env var overrides + defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, ToolbarError};

/// Full toolbar configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub summary: SummaryConfig,
    pub log: LogConfig,
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

/// Labels and links shown in the summary bar's environment bits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SummaryConfig {
    pub product_name: String,
    pub product_url: String,
    /// Number of leading revision characters shown next to the version.
    pub revision_abbrev_len: usize,
    /// Engine name that gets its own link instead of the default runtime link.
    pub alternate_engine: String,
    pub alternate_engine_url: String,
    pub default_engine: String,
    pub default_engine_url: String,
}

/// Transition log sink settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Primary JSONL path. `None` disables file logging.
    pub jsonl_path: Option<PathBuf>,
    pub fallback_path: Option<PathBuf>,
    pub max_size_bytes: u64,
    pub max_rotated_files: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            product_name: "MediaWiki".to_string(),
            product_url: "//www.mediawiki.org/".to_string(),
            revision_abbrev_len: 7,
            alternate_engine: "HHVM".to_string(),
            alternate_engine_url: "http://hhvm.com/".to_string(),
            default_engine: "PHP".to_string(),
            default_engine_url: "https://php.net/".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            jsonl_path: None,
            fallback_path: None,
            max_size_bytes: 1024 * 1024,
            max_rotated_files: 3,
        }
    }
}

impl Config {
    /// Default configuration path (`$HOME/.config/debug-toolbar/config.toml`).
    #[must_use]
    pub fn default_path() -> PathBuf {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!("[DBG-CONFIG] WARNING: HOME not set, falling back to /tmp");
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        home_dir
            .join(".config")
            .join("debug-toolbar")
            .join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf)
                .map_err(|source| ToolbarError::io(&path_buf, source))?;
            toml::from_str::<Self>(&raw)?
        } else if is_explicit_path {
            return Err(ToolbarError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.config_file = Some(path_buf);
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        set_env_string("DEBUG_TOOLBAR_PRODUCT_NAME", &mut self.summary.product_name);
        set_env_string("DEBUG_TOOLBAR_PRODUCT_URL", &mut self.summary.product_url);
        set_env_usize(
            "DEBUG_TOOLBAR_REVISION_ABBREV_LEN",
            &mut self.summary.revision_abbrev_len,
        )?;
        if let Some(raw) = env_var("DEBUG_TOOLBAR_LOG_PATH") {
            self.log.jsonl_path = Some(PathBuf::from(raw));
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.summary.revision_abbrev_len == 0 {
            return Err(ToolbarError::InvalidConfig {
                details: "summary.revision_abbrev_len must be >= 1".to_string(),
            });
        }
        if self.summary.product_name.trim().is_empty() {
            return Err(ToolbarError::InvalidConfig {
                details: "summary.product_name must not be empty".to_string(),
            });
        }
        if self.log.max_size_bytes == 0 {
            return Err(ToolbarError::InvalidConfig {
                details: "log.max_size_bytes must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn set_env_string(name: &str, slot: &mut String) {
    if let Some(raw) = env_var(name) {
        *slot = raw;
    }
}

fn set_env_usize(name: &str, slot: &mut usize) -> Result<()> {
    if let Some(raw) = env_var(name) {
        *slot = raw.parse::<usize>().map_err(|error| ToolbarError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let cfg: Config = toml::from_str(
            r#"
            [summary]
            product_name = "Wiki Farm"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.summary.product_name, "Wiki Farm");
        assert_eq!(cfg.summary.revision_abbrev_len, 7);
        assert_eq!(cfg.log.max_rotated_files, 3);
    }

    #[test]
    fn zero_revision_length_rejected() {
        let mut cfg = Config::default();
        cfg.summary.revision_abbrev_len = 0;
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.code(), "DBG-1101");
        assert!(err.to_string().contains("revision_abbrev_len"));
    }

    #[test]
    fn zero_log_size_rejected() {
        let mut cfg = Config::default();
        cfg.log.max_size_bytes = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_returns_error_for_explicit_missing_path() {
        let err = Config::load(Some(Path::new("/nonexistent/dbg/config.toml"))).unwrap_err();
        assert!(matches!(err, ToolbarError::MissingConfig { .. }));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[summary]\nrevision_abbrev_len = 10\n[log]\nmax_rotated_files = 1\n",
        )
        .unwrap();
        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.summary.revision_abbrev_len, 10);
        assert_eq!(cfg.log.max_rotated_files, 1);
        assert_eq!(cfg.config_file.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn load_surfaces_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[summary\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code(), "DBG-1103");
    }
}
