use crate::{
    assets::payload::ImagePayload,
    config::{
        codec::{self, QueryMap},
        model::{BitmapRef, Configuration, ResolvedConfiguration},
        url_state::{Step, StepUrl},
    },
    encode::qr::QrOptions,
    foundation::core::Color,
    foundation::error::{QrcleError, QrcleResult},
    layout::{
        composer::compose,
        model::{Composition, LayoutMetrics},
    },
    platform::{Platform, ShareRequest},
    render::raster::Rasterizer,
    session::store::BitmapStore,
    settings::Settings,
    steps::{
        info::InfoSummary,
        notify::Notifications,
        state::{Completion, Delivery, Request, RequestTracker, StepError, StepState},
    },
};

pub const MSG_DOWNLOAD_OK: &str = "QR code download started!";
pub const MSG_COPY_OK: &str = "QR code copied to clipboard!";
pub const MSG_SHARE_OK: &str = "Shared successfully!";
pub const MSG_DOWNLOAD_FAILED: &str = "Failed to download. Please try again.";
pub const MSG_COPY_FAILED: &str = "Failed to copy QR code. Try downloading instead.";
pub const MSG_SHARE_FAILED: &str = "Could not open share sheet";
pub const MSG_CAPTURE_FAILED: &str = "Failed to capture QR code with text";

pub const SHARE_TEXT: &str = "Check out my custom QR code created with QRcle!";

/// How a user action ended. Failures have already been reported as a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The user dismissed the dialog; nothing is reported.
    Cancelled,
    Failed,
}

/// Collaborators an export action needs.
pub struct ActionContext<'a> {
    pub rasterizer: &'a dyn Rasterizer,
    pub platform: &'a mut dyn Platform,
    pub notifications: &'a mut Notifications,
    pub now_ms: u64,
}

/// Final card with download, clipboard and share actions.
#[derive(Debug)]
pub struct ExportStep {
    config: Configuration,
    resolved: Option<ResolvedConfiguration>,
    bitmap: Option<ImagePayload>,
    composition: Option<Composition>,
    /// Finished capture of `composition`.
    state: StepState<ImagePayload>,
    tracker: RequestTracker,
    pending: Option<Request>,
    /// Set while `bitmap` still has the colors of a previous palette.
    bitmap_stale: bool,
    qr_base: QrOptions,
    metrics: LayoutMetrics,
}

impl ExportStep {
    /// Mount from the Export URL query. Content and bitmap must both be present.
    #[tracing::instrument(skip(query, store, settings))]
    pub fn enter(session: u64, query: &QueryMap, store: &BitmapStore, settings: &Settings) -> Self {
        let mut config = codec::decode(query);
        config.clamp_palette();

        let mut step = Self {
            config,
            resolved: None,
            bitmap: None,
            composition: None,
            state: StepState::Loading,
            tracker: RequestTracker::new(session),
            pending: None,
            bitmap_stale: false,
            qr_base: settings.qr_options(Color::BLACK, Color::WHITE),
            metrics: settings.layout_metrics(),
        };

        match step.resolve_inputs(store) {
            Ok((resolved, bitmap)) => {
                step.composition = Some(compose(&resolved, &step.metrics));
                step.resolved = Some(resolved);
                step.bitmap = Some(bitmap);
                step.request_capture();
            }
            Err(err) => {
                tracing::warn!(%err, "export entered without a complete configuration");
                step.state = StepState::Error(StepError::from_error(&err));
            }
        }
        step
    }

    fn resolve_inputs(
        &self,
        store: &BitmapStore,
    ) -> QrcleResult<(ResolvedConfiguration, ImagePayload)> {
        let mut missing = self.config.missing_required();
        if self.config.qr_image.is_none() {
            missing.push(codec::KEY_QRCODE);
        }
        if !missing.is_empty() {
            return Err(QrcleError::incomplete(missing));
        }
        let resolved = self.config.require_complete()?;
        let bitmap = match &self.config.qr_image {
            Some(r) => store.resolve(r)?,
            None => return Err(QrcleError::incomplete(vec![codec::KEY_QRCODE])),
        };
        Ok((resolved, bitmap))
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn resolved(&self) -> Option<&ResolvedConfiguration> {
        self.resolved.as_ref()
    }

    pub fn composition(&self) -> Option<&Composition> {
        self.composition.as_ref()
    }

    pub fn bitmap(&self) -> Option<&ImagePayload> {
        self.bitmap.as_ref()
    }

    pub fn state(&self) -> &StepState<ImagePayload> {
        &self.state
    }

    pub fn session(&self) -> u64 {
        self.tracker.session()
    }

    pub fn info(&self) -> Option<InfoSummary> {
        self.resolved.as_ref().map(InfoSummary::from_config)
    }

    pub fn take_request(&mut self) -> Option<Request> {
        self.pending.take()
    }

    fn request_capture(&mut self) {
        let (Some(composition), Some(bitmap)) = (&self.composition, &self.bitmap) else {
            return;
        };
        let ticket = self.tracker.issue();
        self.pending = Some(Request::Rasterize {
            ticket,
            composition: composition.clone(),
            bitmap: bitmap.clone(),
        });
        self.state = StepState::Loading;
    }

    fn request_bitmap(&mut self) {
        let Some(resolved) = &self.resolved else {
            return;
        };
        let ticket = self.tracker.issue();
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
            tracing::debug!(?ticket, "discarding stale export completion");
            return Delivery::Discarded;
        }

        match completion {
            Completion::Encoded { result, .. } => match result {
                Ok(bitmap) => {
                    self.config.qr_image = Some(BitmapRef::Inline(bitmap.clone()));
                    self.bitmap = Some(bitmap);
                    self.bitmap_stale = false;
                    self.request_capture();
                }
                Err(err) => {
                    tracing::warn!(%err, "qr re-encode failed");
                    self.state = StepState::Error(StepError::from_error(&err));
                }
            },
            Completion::Rasterized { result, .. } => match result {
                Ok(png) => self.state = StepState::Ready(png),
                Err(err) => {
                    tracing::warn!(%err, "capture failed");
                    self.state = StepState::Error(StepError::from_error(&err));
                }
            },
        }
        Delivery::Applied
    }

    /// Re-run whatever failed last. No-op while inputs are missing.
    pub fn retry(&mut self) -> bool {
        if self.resolved.is_none() {
            return false;
        }
        if self.bitmap_stale {
            self.request_bitmap();
        } else {
            self.request_capture();
        }
        true
    }

    /// Switch palette; the bitmap is re-encoded and the card captured again.
    pub fn set_palette(&mut self, index: usize) {
        let Some(previous) = self.resolved.as_ref().map(|r| r.palette) else {
            return;
        };
        self.config.palette_index = index;
        self.config.clamp_palette();
        let Ok(resolved) = self.config.require_complete() else {
            return;
        };
        let changed = resolved.palette != previous;
        self.composition = Some(compose(&resolved, &self.metrics));
        self.resolved = Some(resolved);
        if changed {
            self.bitmap_stale = true;
            self.request_bitmap();
        }
    }

    /// URL reflecting the current state; the bitmap goes through `store` when too long.
    pub fn current_url(&self, store: &mut BitmapStore, max_url_len: usize) -> StepUrl {
        match &self.bitmap {
            Some(bitmap) => store.export_url(&self.config, bitmap, max_url_len),
            None => StepUrl::new(Step::Export, codec::encode(&self.config)),
        }
    }

    /// Back to Customize with the full query.
    pub fn edit_url(&self) -> StepUrl {
        StepUrl::new(Step::Customize, codec::encode(&self.config))
    }

    /// Start over, keeping presentation choices.
    pub fn create_new_url(&self) -> StepUrl {
        StepUrl::new(Step::Collect, codec::encode_presentation(&self.config))
    }

    /// Cached capture, or a fresh one that also supersedes any in-flight capture.
    pub fn capture(&mut self, rasterizer: &dyn Rasterizer) -> QrcleResult<ImagePayload> {
        if let StepState::Ready(png) = &self.state {
            return Ok(png.clone());
        }
        if self.bitmap_stale {
            return Err(QrcleError::capture("bitmap is being regenerated"));
        }
        let (Some(composition), Some(bitmap)) = (&self.composition, &self.bitmap) else {
            return Err(QrcleError::capture("nothing to capture"));
        };
        let png = rasterizer.rasterize(composition, bitmap)?;
        self.tracker.issue();
        self.pending = None;
        self.state = StepState::Ready(png.clone());
        Ok(png)
    }

    #[tracing::instrument(skip(self, ctx))]
    pub fn download(&mut self, ctx: ActionContext<'_>) -> ActionOutcome {
        let Some(png) = self.capture_or_report(ctx.rasterizer, ctx.notifications, ctx.now_ms) else {
            return ActionOutcome::Failed;
        };
        let Some(resolved) = &self.resolved else {
            return ActionOutcome::Failed;
        };
        let name = download_file_name(resolved, ctx.now_ms);
        let result = ctx.platform.save_file(&name, &png).map(|_| ());
        report(
            result,
            ctx.notifications,
            ctx.now_ms,
            MSG_DOWNLOAD_OK,
            MSG_DOWNLOAD_FAILED,
        )
    }

    #[tracing::instrument(skip(self, ctx))]
    pub fn copy_to_clipboard(&mut self, ctx: ActionContext<'_>) -> ActionOutcome {
        let Some(png) = self.capture_or_report(ctx.rasterizer, ctx.notifications, ctx.now_ms) else {
            return ActionOutcome::Failed;
        };
        let result = ctx.platform.write_clipboard(&png);
        report(
            result,
            ctx.notifications,
            ctx.now_ms,
            MSG_COPY_OK,
            MSG_COPY_FAILED,
        )
    }

    #[tracing::instrument(skip(self, ctx))]
    pub fn share(&mut self, ctx: ActionContext<'_>) -> ActionOutcome {
        if !ctx.platform.can_share() {
            let err = QrcleError::unsupported("native share is not available");
            return report(
                Err(err),
                ctx.notifications,
                ctx.now_ms,
                MSG_SHARE_OK,
                MSG_SHARE_FAILED,
            );
        }
        let Some(png) = self.capture_or_report(ctx.rasterizer, ctx.notifications, ctx.now_ms) else {
            return ActionOutcome::Failed;
        };
        let Some(resolved) = &self.resolved else {
            return ActionOutcome::Failed;
        };
        let request = share_request(resolved, png, ctx.now_ms);
        let result = ctx.platform.share(&request);
        report(
            result,
            ctx.notifications,
            ctx.now_ms,
            MSG_SHARE_OK,
            MSG_SHARE_FAILED,
        )
    }

    fn capture_or_report(
        &mut self,
        rasterizer: &dyn Rasterizer,
        notifications: &mut Notifications,
        now_ms: u64,
    ) -> Option<ImagePayload> {
        match self.capture(rasterizer) {
            Ok(png) => Some(png),
            Err(err) => {
                tracing::warn!(%err, "capture failed");
                notifications.error(MSG_CAPTURE_FAILED, now_ms);
                None
            }
        }
    }

    pub fn unmount(&mut self) {
        self.tracker.unmount();
        self.pending = None;
    }
}

fn report(
    result: QrcleResult<()>,
    notifications: &mut Notifications,
    now_ms: u64,
    ok: &str,
    failed: &str,
) -> ActionOutcome {
    match result {
        Ok(()) => {
            notifications.success(ok, now_ms);
            ActionOutcome::Done
        }
        Err(err) if err.is_cancelled() => {
            tracing::debug!("action cancelled by user");
            ActionOutcome::Cancelled
        }
        Err(err) => {
            tracing::warn!(%err, "export action failed");
            notifications.error(failed, now_ms);
            ActionOutcome::Failed
        }
    }
}

/// `qrcode-{theme}-{palette}-{position}Text-{millis}.png`
pub fn download_file_name(config: &ResolvedConfiguration, now_ms: u64) -> String {
    format!(
        "qrcode-{}-{}-{}Text-{now_ms}.png",
        config.theme,
        config.palette.name,
        config.text_position.as_str()
    )
}

pub fn share_request(config: &ResolvedConfiguration, image: ImagePayload, now_ms: u64) -> ShareRequest {
    ShareRequest {
        title: format!("QRcle - {} {} QR Code", config.theme, config.palette.name),
        text: SHARE_TEXT.to_owned(),
        file_name: download_file_name(config, now_ms),
        image,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/steps/export.rs"]
mod tests;
