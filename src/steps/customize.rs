use crate::{
    assets::{icons::Icon, payload::ImagePayload},
    config::{
        codec::{self, QueryMap},
        model::{Configuration, IconPosition, ResolvedConfiguration, TextPosition},
        url_state::{Step, StepUrl},
    },
    encode::qr::QrOptions,
    foundation::core::Color,
    foundation::error::{QrcleError, QrcleResult},
    layout::{
        composer::compose,
        model::{Composition, LayoutMetrics},
    },
    session::store::BitmapStore,
    settings::Settings,
    steps::state::{Completion, Delivery, Request, RequestTracker, StepError, StepState},
    theme::registry::{self, ThemePalette},
};

/// Bitmap plus the layout it is shown in.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub bitmap: ImagePayload,
    pub composition: Composition,
}

/// Live preview with presentation controls.
#[derive(Debug)]
pub struct CustomizeStep {
    config: Configuration,
    resolved: Option<ResolvedConfiguration>,
    state: StepState<Preview>,
    tracker: RequestTracker,
    pending: Option<Request>,
    /// Fingerprint of the bitmap shown or in flight.
    bitmap_key: Option<u64>,
    qr_base: QrOptions,
    metrics: LayoutMetrics,
}

impl CustomizeStep {
    /// Mount from the Customize URL query. Missing content fails before any encode.
    #[tracing::instrument(skip(query, settings))]
    pub fn enter(session: u64, query: &QueryMap, settings: &Settings) -> Self {
        let mut config = codec::decode(query);
        config.qr_image = None;
        config.clamp_palette();

        let mut step = Self {
            config,
            resolved: None,
            state: StepState::Loading,
            tracker: RequestTracker::new(session),
            pending: None,
            bitmap_key: None,
            qr_base: settings.qr_options(Color::BLACK, Color::WHITE),
            metrics: settings.layout_metrics(),
        };

        match step.config.require_complete() {
            Ok(resolved) => {
                step.resolved = Some(resolved);
                step.request_bitmap();
            }
            Err(err) => {
                tracing::warn!(%err, "customize entered without required fields");
                step.state = StepState::Error(StepError::from_error(&err));
            }
        }
        step
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn resolved(&self) -> Option<&ResolvedConfiguration> {
        self.resolved.as_ref()
    }

    pub fn state(&self) -> &StepState<Preview> {
        &self.state
    }

    pub fn session(&self) -> u64 {
        self.tracker.session()
    }

    /// Palettes offered for the current theme.
    pub fn palettes(&self) -> &'static [ThemePalette] {
        registry::list_palettes(self.config.theme.as_deref().unwrap_or(registry::DEFAULT_THEME))
    }

    /// Whether the icon position selector is shown.
    pub fn shows_icon_position(&self) -> bool {
        !self.config.icon.is_none()
    }

    /// Next collaborator request, if any.
    pub fn take_request(&mut self) -> Option<Request> {
        self.pending.take()
    }

    fn request_bitmap(&mut self) {
        let Some(resolved) = &self.resolved else {
            return;
        };
        let ticket = self.tracker.issue();
        self.bitmap_key = Some(resolved.bitmap_fingerprint());
        self.pending = Some(Request::Encode {
            ticket,
            content: resolved.location.clone(),
            options: QrOptions {
                foreground: resolved.palette.dark,
                background: resolved.palette.light,
                ..self.qr_base
            },
        });
        self.state = StepState::Loading;
    }

    /// Apply a collaborator result if it belongs to the newest request.
    pub fn deliver(&mut self, completion: Completion) -> Delivery {
        let ticket = completion.ticket();
        if !self.tracker.accepts(ticket) {
            tracing::debug!(?ticket, "discarding stale customize completion");
            return Delivery::Discarded;
        }

        match completion {
            Completion::Encoded { result, .. } => match (result, &self.resolved) {
                (Ok(bitmap), Some(resolved)) => {
                    let composition = compose(resolved, &self.metrics);
                    self.state = StepState::Ready(Preview {
                        bitmap,
                        composition,
                    });
                }
                (Ok(_), None) => return Delivery::Discarded,
                (Err(err), _) => {
                    tracing::warn!(%err, "qr encode failed");
                    self.bitmap_key = None;
                    self.state = StepState::Error(StepError::from_error(&err));
                }
            },
            Completion::Rasterized { .. } => {
                tracing::debug!(?ticket, "customize does not rasterize");
                return Delivery::Discarded;
            }
        }
        Delivery::Applied
    }

    /// Re-issue the encode after a failure. No-op while required fields are missing.
    pub fn retry(&mut self) -> bool {
        if self.resolved.is_none() {
            return false;
        }
        self.request_bitmap();
        true
    }

    pub fn set_palette(&mut self, index: usize) {
        self.config.palette_index = index;
        self.config.clamp_palette();
        self.refresh();
    }

    /// Switching theme re-clamps the palette index against the new theme.
    pub fn set_theme(&mut self, theme: &str) {
        self.config.theme = Some(theme.to_owned());
        self.config.clamp_palette();
        self.refresh();
    }

    pub fn set_text_position(&mut self, position: TextPosition) {
        self.config.text_position = position;
        self.refresh();
    }

    pub fn set_font_size(&mut self, index: usize) {
        self.config.font_size_index = index;
        self.refresh();
    }

    pub fn set_icon(&mut self, icon: Icon) {
        self.config.icon = icon;
        self.refresh();
    }

    pub fn set_icon_position(&mut self, position: IconPosition) {
        self.config.icon_position = position;
        self.refresh();
    }

    /// Re-resolve after an edit: a new bitmap when content or colors changed, otherwise
    /// only a new layout.
    fn refresh(&mut self) {
        let Ok(resolved) = self.config.require_complete() else {
            return;
        };
        let bitmap_changed = self.bitmap_key != Some(resolved.bitmap_fingerprint());
        self.resolved = Some(resolved);

        if bitmap_changed {
            self.request_bitmap();
            return;
        }
        if let (StepState::Ready(preview), Some(resolved)) = (&mut self.state, &self.resolved) {
            preview.composition = compose(resolved, &self.metrics);
        }
    }

    /// URL reflecting the current configuration; written with history replace.
    pub fn current_url(&self) -> StepUrl {
        StepUrl::new(Step::Customize, codec::encode(&self.config))
    }

    pub fn can_continue(&self) -> bool {
        self.state.is_ready()
    }

    /// Export URL carrying the current bitmap.
    pub fn continue_url(&self, store: &mut BitmapStore, max_url_len: usize) -> QrcleResult<StepUrl> {
        let preview = self
            .state
            .ready()
            .ok_or_else(|| QrcleError::validation("preview is not ready"))?;
        Ok(store.export_url(&self.config, &preview.bitmap, max_url_len))
    }

    pub fn back_url(&self) -> StepUrl {
        StepUrl::new(Step::Collect, QueryMap::new())
    }

    pub fn unmount(&mut self) {
        self.tracker.unmount();
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/steps/customize.rs"]
mod tests;
