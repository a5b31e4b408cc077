//! Panel accordion: state model, pure reducer, and the controller that owns
//! them together with the section views.
//!
//! Seams follow the Elm layout: `model` holds state and message/command
//! types, `update` is the only place state changes, `controller` executes
//! commands against the host collaborators.

pub mod controller;
pub mod model;
pub mod recording;
pub mod update;

#[cfg(test)]
mod test_properties;

pub use controller::{HostSurface, PaneDriver, PanelController, PanelOptions};
pub use model::{AnimationToken, PanelCmd, PanelModel, PanelMsg, PanelState};
pub use update::update;
