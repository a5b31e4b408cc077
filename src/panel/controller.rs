//! The panel instance: owns the diagnostics, the views and the accordion state,
//! and executes reducer commands against the host collaborators.

use crate::core::config::{Config, SummaryConfig};
use crate::core::errors::Result;
use crate::diagnostics::DiagnosticsModel;
use crate::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry};
use crate::panel::model::{AnimationToken, PanelCmd, PanelModel, PanelMsg, PanelState};
use crate::panel::update::update;
use crate::section::{ID_PREFIX, SectionId};
use crate::view::markup::Element;
use crate::view::profile::{ProfileRenderer, RawTraceRenderer};
use crate::view::sections::{self, SectionView};
use crate::view::summary;

/// The page element that anchors the panel and reserves space for it.
pub trait HostSurface {
    /// Called once, at construction, with the toolbar root.
    fn mount(&mut self, root: &Element);
    /// Called at most once per settled transition.
    fn notify_height_changed(&mut self);
}

/// Executes visual pane effects.
///
/// Animated effects must eventually be reported back through
/// [`PanelController::animation_settled`] with the same token, even when a
/// later transition has already superseded them visually.
pub trait PaneDriver {
    fn slide_down(&mut self, pane: SectionId, token: AnimationToken);
    fn slide_up(&mut self, pane: SectionId, token: AnimationToken);
    fn show(&mut self, pane: SectionId);
    fn hide(&mut self, pane: SectionId);
    /// Mark exactly this trigger as current; `None` clears every trigger.
    fn mark_current(&mut self, trigger: Option<SectionId>);
}

/// Construction-time choices that are not part of the payload.
pub struct PanelOptions {
    pub summary: SummaryConfig,
    pub profile: Box<dyn ProfileRenderer>,
    pub log: Option<JsonlWriter>,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            summary: SummaryConfig::default(),
            profile: Box::new(RawTraceRenderer),
            log: None,
        }
    }
}

impl PanelOptions {
    /// Summary labels from config; opens the JSONL log when one is configured.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            summary: config.summary.clone(),
            profile: Box::new(RawTraceRenderer),
            log: JsonlConfig::from_log_config(&config.log).map(JsonlWriter::open),
        }
    }

    #[must_use]
    pub fn with_profile_renderer(mut self, renderer: impl ProfileRenderer + 'static) -> Self {
        self.profile = Box::new(renderer);
        self
    }
}

/// One mounted diagnostics panel.
pub struct PanelController<H: HostSurface, D: PaneDriver> {
    diagnostics: DiagnosticsModel,
    views: Vec<SectionView>,
    root: Element,
    model: PanelModel,
    host: H,
    driver: D,
    log: Option<JsonlWriter>,
}

impl<H: HostSurface, D: PaneDriver> PanelController<H, D> {
    /// Build every view, assemble the toolbar and mount it on the host.
    pub fn mount(diagnostics: DiagnosticsModel, mut host: H, driver: D, options: PanelOptions) -> Self {
        let views = sections::build_all(&diagnostics, options.profile.as_ref());
        let bar = summary::build_summary_bar(&diagnostics, &options.summary);
        let root = summary::build_root(bar, &views);
        host.mount(&root);

        let mut controller = Self {
            diagnostics,
            views,
            root,
            model: PanelModel::new(),
            host,
            driver,
            log: options.log,
        };
        controller.log_event(
            LogEntry::new(EventType::PanelMounted).details(format!("{} panes", SectionId::ALL.len())),
        );
        controller
    }

    /// Validate a JSON payload and mount. Nothing is mounted on failure.
    pub fn mount_json(
        payload: serde_json::Value,
        host: H,
        driver: D,
        options: PanelOptions,
    ) -> Result<Self> {
        let diagnostics = DiagnosticsModel::from_value(payload)?;
        Ok(Self::mount(diagnostics, host, driver, options))
    }

    /// Handle a trigger activation for a known section.
    pub fn activate(&mut self, id: SectionId) {
        self.dispatch(PanelMsg::Activate(id));
    }

    /// Handle a trigger activation by id: `querylist` or `mw-debug-querylist`.
    ///
    /// Unknown ids fail with `InvalidSectionId` and leave the state untouched.
    pub fn activate_trigger(&mut self, trigger_id: &str) -> Result<()> {
        let id = if trigger_id.starts_with(ID_PREFIX) {
            SectionId::from_trigger_element_id(trigger_id)?
        } else {
            SectionId::from_dom_id(trigger_id)?
        };
        self.activate(id);
        Ok(())
    }

    /// Completion callback for an animation started by the driver.
    pub fn animation_settled(&mut self, token: AnimationToken) {
        self.dispatch(PanelMsg::AnimationSettled(token));
    }

    /// Settle every pending animation, oldest first.
    pub fn settle_all(&mut self) {
        for token in self.model.pending_tokens() {
            self.animation_settled(token);
        }
    }

    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.model.state
    }

    #[must_use]
    pub const fn open_section(&self) -> Option<SectionId> {
        self.model.state.open_section()
    }

    #[must_use]
    pub fn pending_animations(&self) -> Vec<AnimationToken> {
        self.model.pending_tokens()
    }

    /// Height notifications delivered to the host so far.
    #[must_use]
    pub const fn notifications(&self) -> u64 {
        self.model.notifications
    }

    #[must_use]
    pub fn views(&self) -> &[SectionView] {
        &self.views
    }

    #[must_use]
    pub fn view(&self, id: SectionId) -> Option<&SectionView> {
        self.views.iter().find(|view| view.id() == id)
    }

    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &DiagnosticsModel {
        &self.diagnostics
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Tear down the panel, returning the collaborators.
    pub fn into_parts(mut self) -> (H, D) {
        if let Some(log) = self.log.as_mut() {
            log.flush();
        }
        (self.host, self.driver)
    }

    // ──────────────────── internals ────────────────────

    fn dispatch(&mut self, msg: PanelMsg) {
        let before = self.model.state;
        let was_pending = match msg {
            PanelMsg::AnimationSettled(token) => self.model.in_flight.contains_key(&token),
            PanelMsg::Activate(_) => false,
        };
        let effects = update(&mut self.model, msg).flatten();

        match msg {
            PanelMsg::Activate(requested) => {
                let entry = describe_activation(before, self.model.state, requested, &effects);
                self.log_event(entry);
            }
            PanelMsg::AnimationSettled(token) if was_pending => {
                self.log_event(LogEntry::new(EventType::AnimationSettled).token(token));
            }
            PanelMsg::AnimationSettled(_) => {}
        }

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, cmd: PanelCmd) {
        match cmd {
            PanelCmd::None => {}
            PanelCmd::Batch(cmds) => {
                for cmd in cmds {
                    self.run(cmd);
                }
            }
            PanelCmd::SlideDown { pane, token } => self.driver.slide_down(pane, token),
            PanelCmd::SlideUp { pane, token } => self.driver.slide_up(pane, token),
            PanelCmd::Show(pane) => self.driver.show(pane),
            PanelCmd::Hide(pane) => self.driver.hide(pane),
            PanelCmd::MarkCurrent(trigger) => self.driver.mark_current(trigger),
            PanelCmd::NotifyHeightChanged => {
                self.host.notify_height_changed();
                self.log_event(
                    LogEntry::new(EventType::HeightNotified)
                        .details(format!("notification #{}", self.model.notifications)),
                );
            }
        }
    }

    fn log_event(&mut self, entry: LogEntry) {
        if let Some(log) = self.log.as_mut() {
            log.write_entry(&entry);
        }
    }
}

fn describe_activation(
    before: PanelState,
    after: PanelState,
    requested: SectionId,
    effects: &[PanelCmd],
) -> LogEntry {
    let token = effects.iter().find_map(|cmd| match cmd {
        PanelCmd::SlideDown { token, .. } | PanelCmd::SlideUp { token, .. } => Some(*token),
        _ => None,
    });
    let entry = match (before, after) {
        _ if effects.is_empty() => LogEntry::new(EventType::ActivationIgnored)
            .pane(requested)
            .details("pane animation in flight"),
        (PanelState::Closed, PanelState::Open(pane)) => LogEntry::new(EventType::PaneOpened).pane(pane),
        (PanelState::Open(pane), PanelState::Closed) => LogEntry::new(EventType::PaneClosed).pane(pane),
        (PanelState::Open(previous), PanelState::Open(pane)) => LogEntry::new(EventType::PaneSwitched)
            .pane(pane)
            .previous_pane(previous),
        (PanelState::Closed, PanelState::Closed) => LogEntry::new(EventType::ActivationIgnored).pane(requested),
    };
    match token {
        Some(token) => entry.token(token),
        None => entry,
    }
}
