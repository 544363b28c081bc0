//! Application shell: history, the mounted step and the collaborators.
//!
//! Collaborator calls are modeled as request/completion pairs. A step queues a
//! [`Request`]; the wizard runs it and routes the [`Completion`] back to whatever step is
//! mounted at that point, which applies it only if the ticket is still current.

use crate::{
    assets::icons::Icon,
    config::{
        codec::QueryMap,
        model::{IconPosition, TextPosition},
        url_state::{Step, StepUrl},
    },
    encode::qr::QrEncoder,
    foundation::error::{QrcleError, QrcleResult},
    platform::Platform,
    render::raster::Rasterizer,
    session::{history::History, store::BitmapStore},
    settings::Settings,
    steps::{
        collect::CollectStep,
        customize::CustomizeStep,
        export::{ActionContext, ActionOutcome, ExportStep},
        notify::Notifications,
        state::{Completion, Delivery, Request},
    },
};

/// The mounted step.
#[derive(Debug)]
pub enum ActiveStep {
    Collect(CollectStep),
    Customize(CustomizeStep),
    Export(ExportStep),
}

impl ActiveStep {
    pub fn step(&self) -> Step {
        match self {
            Self::Collect(_) => Step::Collect,
            Self::Customize(_) => Step::Customize,
            Self::Export(_) => Step::Export,
        }
    }

    fn unmount(&mut self) {
        match self {
            Self::Collect(_) => {}
            Self::Customize(s) => s.unmount(),
            Self::Export(s) => s.unmount(),
        }
    }

    fn take_request(&mut self) -> Option<Request> {
        match self {
            Self::Collect(_) => None,
            Self::Customize(s) => s.take_request(),
            Self::Export(s) => s.take_request(),
        }
    }
}

/// One user edit on the Customize (or, for the palette, Export) step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Adjustment {
    Palette(usize),
    Theme(String),
    TextPosition(TextPosition),
    FontSize(usize),
    Icon(Icon),
    IconPosition(IconPosition),
}

/// Unix time in milliseconds.
pub type Clock = fn() -> u64;

fn system_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

pub struct Wizard {
    settings: Settings,
    history: History,
    store: BitmapStore,
    notifications: Notifications,
    encoder: Box<dyn QrEncoder>,
    rasterizer: Box<dyn Rasterizer>,
    platform: Box<dyn Platform>,
    active: ActiveStep,
    next_session: u64,
    clock: Clock,
}

impl std::fmt::Debug for Wizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("url", &self.history.current().format())
            .field("step", &self.active.step())
            .field("session", &self.next_session)
            .finish_non_exhaustive()
    }
}

impl Wizard {
    /// Start at an empty Collect form.
    pub fn new(
        settings: Settings,
        encoder: Box<dyn QrEncoder>,
        rasterizer: Box<dyn Rasterizer>,
        platform: Box<dyn Platform>,
    ) -> Self {
        let initial = StepUrl::new(Step::Collect, QueryMap::new());
        let mut wizard = Self {
            settings,
            history: History::new(initial.clone()),
            store: BitmapStore::new(),
            notifications: Notifications::new(),
            encoder,
            rasterizer,
            platform,
            active: ActiveStep::Collect(CollectStep::enter(&initial.query)),
            next_session: 0,
            clock: system_clock,
        };
        wizard.mount();
        wizard
    }

    /// Replace the wall clock (timestamps in file names and toasts).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_url(&self) -> &StepUrl {
        self.history.current()
    }

    pub fn step(&self) -> Step {
        self.active.step()
    }

    pub fn active(&self) -> &ActiveStep {
        &self.active
    }

    pub fn store(&self) -> &BitmapStore {
        &self.store
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn can_share(&self) -> bool {
        self.platform.can_share()
    }

    pub fn collect_mut(&mut self) -> QrcleResult<&mut CollectStep> {
        match &mut self.active {
            ActiveStep::Collect(s) => Ok(s),
            other => Err(wrong_step(Step::Collect, other.step())),
        }
    }

    pub fn customize(&self) -> QrcleResult<&CustomizeStep> {
        match &self.active {
            ActiveStep::Customize(s) => Ok(s),
            other => Err(wrong_step(Step::Customize, other.step())),
        }
    }

    pub fn export(&self) -> QrcleResult<&ExportStep> {
        match &self.active {
            ActiveStep::Export(s) => Ok(s),
            other => Err(wrong_step(Step::Export, other.step())),
        }
    }

    /// Push an arbitrary URL, as if typed into the address bar.
    pub fn open(&mut self, url: &str) -> QrcleResult<()> {
        let url = StepUrl::parse(url)?;
        self.navigate(url);
        Ok(())
    }

    /// Push `url` and mount its step.
    pub fn navigate(&mut self, url: StepUrl) {
        tracing::debug!(url = %url, "navigate");
        self.history.push(url);
        self.mount();
    }

    pub fn back(&mut self) -> bool {
        let moved = self.history.back();
        if moved {
            self.mount();
        }
        moved
    }

    pub fn forward(&mut self) -> bool {
        let moved = self.history.forward();
        if moved {
            self.mount();
        }
        moved
    }

    /// Remount the current entry from its URL alone.
    pub fn reload(&mut self) {
        self.mount();
    }

    fn mount(&mut self) {
        self.active.unmount();
        self.next_session += 1;
        let session = self.next_session;
        let url = self.history.current();
        self.active = match url.step {
            Step::Collect => ActiveStep::Collect(CollectStep::enter(&url.query)),
            Step::Customize => {
                ActiveStep::Customize(CustomizeStep::enter(session, &url.query, &self.settings))
            }
            Step::Export => ActiveStep::Export(ExportStep::enter(
                session,
                &url.query,
                &self.store,
                &self.settings,
            )),
        };
        tracing::debug!(session, step = %url.step, "mounted");
    }

    /// Next request from the mounted step.
    pub fn take_request(&mut self) -> Option<Request> {
        self.active.take_request()
    }

    /// Run `request` against the matching collaborator.
    pub fn execute(&self, request: Request) -> Completion {
        match request {
            Request::Encode {
                ticket,
                content,
                options,
            } => Completion::Encoded {
                ticket,
                result: self.encoder.encode(&content, &options),
            },
            Request::Rasterize {
                ticket,
                composition,
                bitmap,
            } => Completion::Rasterized {
                ticket,
                result: self.rasterizer.rasterize(&composition, &bitmap),
            },
        }
    }

    /// Route a completion to the mounted step.
    pub fn deliver(&mut self, completion: Completion) -> Delivery {
        let reencoded = matches!(completion, Completion::Encoded { .. });
        let delivery = match &mut self.active {
            ActiveStep::Collect(_) => {
                tracing::debug!(ticket = ?completion.ticket(), "discarding completion on collect");
                Delivery::Discarded
            }
            ActiveStep::Customize(s) => s.deliver(completion),
            ActiveStep::Export(s) => s.deliver(completion),
        };

        // A fresh bitmap on Export changes the `qrcode` parameter.
        if delivery == Delivery::Applied && reencoded {
            if let ActiveStep::Export(s) = &self.active {
                let url = s.current_url(&mut self.store, self.settings.max_url_len);
                self.history.replace(url);
            }
        }
        delivery
    }

    /// Drive the mounted step until it has no more requests. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Some(request) = self.take_request() {
            let completion = self.execute(request);
            self.deliver(completion);
            ran += 1;
        }
        ran
    }

    /// Submit the Collect form and move to Customize.
    pub fn submit_collect(&mut self) -> QrcleResult<()> {
        let url = self.collect_mut()?.submit()?;
        self.navigate(url);
        Ok(())
    }

    /// Apply one edit and write it to the URL with history replace.
    pub fn adjust(&mut self, adjustment: Adjustment) -> QrcleResult<()> {
        match (&mut self.active, adjustment) {
            (ActiveStep::Customize(s), adjustment) => {
                match adjustment {
                    Adjustment::Palette(i) => s.set_palette(i),
                    Adjustment::Theme(t) => s.set_theme(&t),
                    Adjustment::TextPosition(p) => s.set_text_position(p),
                    Adjustment::FontSize(i) => s.set_font_size(i),
                    Adjustment::Icon(icon) => s.set_icon(icon),
                    Adjustment::IconPosition(p) => s.set_icon_position(p),
                }
                let url = s.current_url();
                self.history.replace(url);
            }
            (ActiveStep::Export(s), Adjustment::Palette(i)) => {
                s.set_palette(i);
                let url = s.current_url(&mut self.store, self.settings.max_url_len);
                self.history.replace(url);
            }
            (other, adjustment) => {
                return Err(QrcleError::validation(format!(
                    "{adjustment:?} is not available on the {} step",
                    other.step()
                )));
            }
        }
        Ok(())
    }

    /// Customize "Continue": only once the preview is ready.
    pub fn continue_to_export(&mut self) -> QrcleResult<()> {
        let max = self.settings.max_url_len;
        let url = match &self.active {
            ActiveStep::Customize(s) => s.continue_url(&mut self.store, max)?,
            other => return Err(wrong_step(Step::Customize, other.step())),
        };
        self.navigate(url);
        Ok(())
    }

    /// Customize "Go back".
    pub fn back_to_collect(&mut self) -> QrcleResult<()> {
        let url = self.customize()?.back_url();
        self.navigate(url);
        Ok(())
    }

    /// Export "Edit".
    pub fn edit(&mut self) -> QrcleResult<()> {
        let url = self.export()?.edit_url();
        self.navigate(url);
        Ok(())
    }

    /// Export "Create new".
    pub fn create_new(&mut self) -> QrcleResult<()> {
        let url = self.export()?.create_new_url();
        self.navigate(url);
        Ok(())
    }

    pub fn download(&mut self) -> QrcleResult<ActionOutcome> {
        self.export_action(ExportStep::download)
    }

    pub fn copy_to_clipboard(&mut self) -> QrcleResult<ActionOutcome> {
        self.export_action(ExportStep::copy_to_clipboard)
    }

    pub fn share(&mut self) -> QrcleResult<ActionOutcome> {
        self.export_action(ExportStep::share)
    }

    fn export_action(
        &mut self,
        action: fn(&mut ExportStep, ActionContext<'_>) -> ActionOutcome,
    ) -> QrcleResult<ActionOutcome> {
        let now_ms = (self.clock)();
        let actual = self.active.step();
        let ActiveStep::Export(step) = &mut self.active else {
            return Err(wrong_step(Step::Export, actual));
        };
        let ctx = ActionContext {
            rasterizer: self.rasterizer.as_ref(),
            platform: self.platform.as_mut(),
            notifications: &mut self.notifications,
            now_ms,
        };
        Ok(action(step, ctx))
    }
}

fn wrong_step(expected: Step, actual: Step) -> QrcleError {
    QrcleError::validation(format!("expected the {expected} step, {actual} is active"))
}

#[cfg(test)]
#[path = "../../tests/unit/session/wizard.rs"]
mod tests;
