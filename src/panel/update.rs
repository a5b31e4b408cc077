//! Pure update function for the panel accordion.
//!
//! `update()` takes the current model and a message, mutates the model, and
//! returns a command describing the effects the runtime should execute.
//!
//! Only the first open and the final close animate. Switching between panes
//! is an instant cross-fade: hide the old pane, show the new one, same tick.
//!
//! Height notifications are coalesced: while any animation is in flight, no
//! transition notifies on its own; the completion that drains the last
//! in-flight animation emits exactly one notification.

use super::model::{AnimationKind, PanelCmd, PanelModel, PanelMsg, PanelState};
use crate::section::SectionId;

/// Apply a message to the model and return the next command for the runtime.
pub fn update(model: &mut PanelModel, msg: PanelMsg) -> PanelCmd {
    match msg {
        PanelMsg::Activate(requested) => activate(model, requested),
        PanelMsg::AnimationSettled(token) => {
            if model.finish_animation(token).is_none() {
                // Unknown or already settled: the guard has fired.
                return PanelCmd::None;
            }
            if model.is_settled() {
                notify(model)
            } else {
                PanelCmd::None
            }
        }
    }
}

fn activate(model: &mut PanelModel, requested: SectionId) -> PanelCmd {
    // Toggling a pane mid-reveal, or reopening it mid-collapse, is dropped.
    // A pane that is animating but no longer open may still cross-fade back.
    let blocked = match model.state {
        PanelState::Open(current) => current == requested && model.is_animating(requested),
        PanelState::Closed => model.is_collapsing(requested),
    };
    if blocked {
        model.ignored_activations += 1;
        return PanelCmd::None;
    }

    match model.state {
        PanelState::Open(current) if current == requested => {
            model.state = PanelState::Closed;
            let token = model.begin_animation(requested, AnimationKind::Collapse);
            PanelCmd::Batch(vec![
                PanelCmd::MarkCurrent(None),
                PanelCmd::SlideUp {
                    pane: requested,
                    token,
                },
            ])
        }
        PanelState::Closed => {
            model.state = PanelState::Open(requested);
            let token = model.begin_animation(requested, AnimationKind::Reveal);
            PanelCmd::Batch(vec![
                PanelCmd::MarkCurrent(Some(requested)),
                PanelCmd::SlideDown {
                    pane: requested,
                    token,
                },
            ])
        }
        PanelState::Open(current) => {
            model.state = PanelState::Open(requested);
            let mut cmds = vec![
                PanelCmd::MarkCurrent(Some(requested)),
                PanelCmd::Hide(current),
                PanelCmd::Show(requested),
            ];
            if model.is_settled() {
                cmds.push(notify(model));
            }
            PanelCmd::Batch(cmds)
        }
    }
}

fn notify(model: &mut PanelModel) -> PanelCmd {
    model.notifications += 1;
    PanelCmd::NotifyHeightChanged
}
