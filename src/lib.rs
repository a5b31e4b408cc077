#![forbid(unsafe_code)]

//! Debug toolbar: an in-page diagnostics panel.
//!
//! Renders a server-side instrumentation snapshot (queries, console log,
//! legacy debug log, request data, included resources, profile trace,
//! environment counters) and drives a single-pane accordion over it:
//!
//! 1. [`diagnostics::DiagnosticsModel`] validates and wraps the payload.
//! 2. [`panel::PanelController`] builds every section view, mounts the
//!    toolbar on a [`panel::HostSurface`], and runs the open/close/switch
//!    protocol through a pure reducer.
//!
//! # Library usage
//!
//! ```rust,no_run
//! use debug_toolbar::prelude::*;
//! use debug_toolbar::panel::recording::{RecordingDriver, RecordingHost};
//!
//! # fn main() -> debug_toolbar::core::errors::Result<()> {
//! let raw = std::fs::read_to_string("payload.json").unwrap_or_default();
//! let model = DiagnosticsModel::from_json_str(&raw)?;
//! let mut panel = PanelController::mount(
//!     model,
//!     RecordingHost::default(),
//!     RecordingDriver::default(),
//!     PanelOptions::default(),
//! );
//! panel.activate(SectionId::Queries);
//! panel.settle_all();
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub mod core;
pub mod diagnostics;
pub mod logger;
pub mod panel;
pub mod section;
pub mod view;
