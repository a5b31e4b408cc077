//! Elm-style state model for the panel accordion.
//!
//! All mutable panel state lives in [`PanelModel`]. Trigger activations and
//! animation completions arrive as [`PanelMsg`] values; DOM and host effects
//! are described by [`PanelCmd`] values returned from the update function.
//!
//! **Design invariant:** the model performs no I/O.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use serde::Serialize;

use crate::section::SectionId;

// ──────────────────── state ────────────────────

/// Which pane, if any, is logically open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "section", rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Closed,
    Open(SectionId),
}

impl PanelState {
    #[must_use]
    pub const fn open_section(self) -> Option<SectionId> {
        match self {
            Self::Closed => None,
            Self::Open(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

// ──────────────────── animations ────────────────────

/// Identifies one animated transition; settled exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnimationToken(u64);

impl AnimationToken {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The two animated transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Closed → Open: the pane slides down.
    Reveal,
    /// Open → Closed: the pane slides up.
    Collapse,
}

/// An animation whose completion callback has not run yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub pane: SectionId,
    pub kind: AnimationKind,
}

// ──────────────────── messages & commands ────────────────────

/// Inputs to the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMsg {
    /// A summary bar trigger was activated.
    Activate(SectionId),
    /// The host finished the animation started with this token.
    AnimationSettled(AnimationToken),
}

/// Effects the runtime must execute, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCmd {
    None,
    Batch(Vec<Self>),
    /// Animate the pane open; report completion with the token.
    SlideDown {
        pane: SectionId,
        token: AnimationToken,
    },
    /// Animate the pane closed; report completion with the token.
    SlideUp {
        pane: SectionId,
        token: AnimationToken,
    },
    /// Show immediately, no animation.
    Show(SectionId),
    /// Hide immediately, no animation.
    Hide(SectionId),
    /// Mark exactly this trigger as current (or none).
    MarkCurrent(Option<SectionId>),
    /// Tell the host surface the panel height changed.
    NotifyHeightChanged,
}

impl PanelCmd {
    /// Flatten nested batches into a linear effect list.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

// ──────────────────── model ────────────────────

/// Panel state plus the bookkeeping for pending animations.
#[derive(Debug, Clone, Default)]
pub struct PanelModel {
    pub state: PanelState,
    /// Animations awaiting their completion callback, oldest first.
    pub in_flight: BTreeMap<AnimationToken, InFlight>,
    next_token: u64,
    /// Height notifications emitted so far.
    pub notifications: u64,
    /// Activations dropped because their pane was mid-animation.
    pub ignored_activations: u64,
}

impl PanelModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any animation is still awaiting its completion callback.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Whether this pane has its own animation in flight.
    #[must_use]
    pub fn is_animating(&self, pane: SectionId) -> bool {
        self.in_flight.values().any(|anim| anim.pane == pane)
    }

    /// Whether this pane is sliding closed.
    #[must_use]
    pub fn is_collapsing(&self, pane: SectionId) -> bool {
        self.in_flight
            .values()
            .any(|anim| anim.pane == pane && anim.kind == AnimationKind::Collapse)
    }

    /// Register a new animation and hand out its token.
    pub fn begin_animation(&mut self, pane: SectionId, kind: AnimationKind) -> AnimationToken {
        let token = AnimationToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.in_flight.insert(token, InFlight { pane, kind });
        token
    }

    /// Release a token. Returns `None` if it was unknown or already settled.
    pub fn finish_animation(&mut self, token: AnimationToken) -> Option<InFlight> {
        self.in_flight.remove(&token)
    }

    /// Outstanding tokens, oldest first.
    #[must_use]
    pub fn pending_tokens(&self) -> Vec<AnimationToken> {
        self.in_flight.keys().copied().collect()
    }
}
