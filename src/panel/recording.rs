//! In-memory collaborators that record what the panel asked them to do.
//!
//! Used by the CLI to replay activations headlessly and by tests.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::panel::controller::{HostSurface, PaneDriver};
use crate::panel::model::AnimationToken;
use crate::section::SectionId;
use crate::view::markup::Element;

/// Host surface that keeps the mounted HTML and counts height notifications.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingHost {
    pub mounts: Vec<String>,
    pub height_notifications: u64,
}

impl HostSurface for RecordingHost {
    fn mount(&mut self, root: &Element) {
        self.mounts.push(root.to_html());
    }

    fn notify_height_changed(&mut self) {
        self.height_notifications += 1;
    }
}

/// One call received by [`RecordingDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "call", content = "args", rename_all = "snake_case")]
pub enum DriverCall {
    SlideDown {
        pane: SectionId,
        token: AnimationToken,
    },
    SlideUp {
        pane: SectionId,
        token: AnimationToken,
    },
    Show(SectionId),
    Hide(SectionId),
    MarkCurrent(Option<SectionId>),
}

/// Pane driver that applies effects to an in-memory visibility model.
///
/// Animations are treated as finishing instantly for visibility purposes;
/// their tokens stay in `pending` until the caller reports them settled.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingDriver {
    pub calls: Vec<DriverCall>,
    pub pending: Vec<AnimationToken>,
    pub current: Option<SectionId>,
    shown: BTreeSet<SectionId>,
}

impl RecordingDriver {
    /// Panes currently visible, in summary bar order.
    #[must_use]
    pub fn visible(&self) -> Vec<SectionId> {
        self.shown.iter().copied().collect()
    }

    /// Hand over the animation tokens started so far.
    pub fn take_pending(&mut self) -> Vec<AnimationToken> {
        std::mem::take(&mut self.pending)
    }
}

impl PaneDriver for RecordingDriver {
    fn slide_down(&mut self, pane: SectionId, token: AnimationToken) {
        self.calls.push(DriverCall::SlideDown { pane, token });
        self.pending.push(token);
        self.shown.insert(pane);
    }

    fn slide_up(&mut self, pane: SectionId, token: AnimationToken) {
        self.calls.push(DriverCall::SlideUp { pane, token });
        self.pending.push(token);
        self.shown.remove(&pane);
    }

    fn show(&mut self, pane: SectionId) {
        self.calls.push(DriverCall::Show(pane));
        self.shown.insert(pane);
    }

    fn hide(&mut self, pane: SectionId) {
        self.calls.push(DriverCall::Hide(pane));
        self.shown.remove(&pane);
    }

    fn mark_current(&mut self, trigger: Option<SectionId>) {
        self.calls.push(DriverCall::MarkCurrent(trigger));
        self.current = trigger;
    }
}
