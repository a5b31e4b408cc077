//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use debug_toolbar::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{Result, ToolbarError};

// Payload
pub use crate::diagnostics::{DiagnosticsModel, DiagnosticsPayload};
pub use crate::section::SectionId;

// Panel
pub use crate::panel::{
    AnimationToken, HostSurface, PaneDriver, PanelController, PanelOptions, PanelState,
};

// Views
pub use crate::view::{Element, ProfileRenderer, RawTraceRenderer, SectionView};
