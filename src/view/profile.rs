//! Seam for the profiling-view collaborator.

use crate::view::markup::Element;

/// Renders the opaque profile trace into the profile pane.
///
/// The panel never inspects the trace; it only places the returned element.
pub trait ProfileRenderer {
    fn render(&self, trace: &serde_json::Value) -> Element;
}

/// Fallback renderer: the trace as pretty-printed, escaped JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTraceRenderer;

impl ProfileRenderer for RawTraceRenderer {
    fn render(&self, trace: &serde_json::Value) -> Element {
        let body = serde_json::to_string_pretty(trace).unwrap_or_else(|_| trace.to_string());
        Element::new("pre").class("mw-debug-profile-raw").text(body)
    }
}

impl<F> ProfileRenderer for F
where
    F: Fn(&serde_json::Value) -> Element,
{
    fn render(&self, trace: &serde_json::Value) -> Element {
        self(trace)
    }
}
