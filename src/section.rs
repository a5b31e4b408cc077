//! The fixed set of detail panes and their DOM naming.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, ToolbarError};

/// Prefix shared by every toolbar element id.
pub const ID_PREFIX: &str = "mw-debug-";

/// One of the six detail panes.
///
/// Declaration order is the summary bar's left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    /// Console log entries.
    Console,
    /// Executed queries.
    Queries,
    /// Raw lines of the legacy debug log.
    LegacyLog,
    /// Request method, URL, headers and parameters.
    Request,
    /// Included resources with their sizes.
    Includes,
    /// Profiling trace, rendered by an external collaborator.
    Profile,
}

impl SectionId {
    /// Every section, in summary bar order.
    pub const ALL: [Self; 6] = [
        Self::Console,
        Self::Queries,
        Self::LegacyLog,
        Self::Request,
        Self::Includes,
        Self::Profile,
    ];

    /// Short id used to build element ids and anchors.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Queries => "querylist",
            Self::LegacyLog => "debuglog",
            Self::Request => "request",
            Self::Includes => "includes",
            Self::Profile => "profile",
        }
    }

    /// Trigger label shown in the summary bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Console => "Console",
            Self::Queries => "Queries",
            Self::LegacyLog => "Debug log",
            Self::Request => "Request",
            Self::Includes => "PHP includes",
            Self::Profile => "Profile",
        }
    }

    /// Element id of the summary bar trigger (`mw-debug-querylist`).
    #[must_use]
    pub fn trigger_element_id(self) -> String {
        format!("{ID_PREFIX}{}", self.dom_id())
    }

    /// Element id of the pane container (`mw-debug-pane-querylist`).
    #[must_use]
    pub fn pane_element_id(self) -> String {
        format!("{ID_PREFIX}pane-{}", self.dom_id())
    }

    /// Resolve a short dom id. Unknown ids are a programming error.
    pub fn from_dom_id(id: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.dom_id() == id)
            .ok_or_else(|| ToolbarError::InvalidSectionId { id: id.to_string() })
    }

    /// Resolve a trigger element id such as `mw-debug-console`.
    pub fn from_trigger_element_id(element_id: &str) -> Result<Self> {
        element_id
            .strip_prefix(ID_PREFIX)
            .ok_or_else(|| ToolbarError::InvalidSectionId {
                id: element_id.to_string(),
            })
            .and_then(Self::from_dom_id)
    }
}

impl FromStr for SectionId {
    type Err = ToolbarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_dom_id(s)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_ids_round_trip_for_every_section() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_dom_id(section.dom_id()).unwrap(), section);
        }
    }

    #[test]
    fn element_ids_use_shared_prefix() {
        assert_eq!(SectionId::Queries.trigger_element_id(), "mw-debug-querylist");
        assert_eq!(SectionId::LegacyLog.pane_element_id(), "mw-debug-pane-debuglog");
    }

    #[test]
    fn unknown_dom_id_fails_fast() {
        let err = SectionId::from_dom_id("timeline").unwrap_err();
        assert!(matches!(err, ToolbarError::InvalidSectionId { ref id } if id == "timeline"));
    }

    #[test]
    fn trigger_element_id_requires_prefix() {
        assert_eq!(
            SectionId::from_trigger_element_id("mw-debug-includes").unwrap(),
            SectionId::Includes
        );
        assert!(SectionId::from_trigger_element_id("includes").is_err());
        assert!(SectionId::from_trigger_element_id("mw-debug-pane-includes").is_err());
    }

    #[test]
    fn parse_via_from_str() {
        let parsed: SectionId = "request".parse().unwrap();
        assert_eq!(parsed, SectionId::Request);
        assert!("Request".parse::<SectionId>().is_err());
    }
}
