use std::{cell::Cell, path::PathBuf};

use super::*;
use crate::{
    assets::icons::Icon,
    config::model::TextPosition,
    steps::{notify::ToastKind, state::Remedy},
};

struct CountingRasterizer {
    calls: Cell<usize>,
    fail: bool,
}

impl CountingRasterizer {
    fn ok() -> Self {
        Self {
            calls: Cell::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: Cell::new(0),
            fail: true,
        }
    }
}

impl Rasterizer for CountingRasterizer {
    fn rasterize(&self, _comp: &Composition, _bitmap: &ImagePayload) -> QrcleResult<ImagePayload> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(QrcleError::capture("boom"));
        }
        Ok(ImagePayload::png(vec![42]))
    }
}

#[derive(Default)]
struct ScriptedPlatform {
    share_supported: bool,
    share_result: Option<fn() -> QrcleError>,
    saved: Vec<String>,
    shared: Vec<ShareRequest>,
}

impl Platform for ScriptedPlatform {
    fn save_file(&mut self, file_name: &str, _image: &ImagePayload) -> QrcleResult<PathBuf> {
        self.saved.push(file_name.to_owned());
        Ok(PathBuf::from(file_name))
    }

    fn write_clipboard(&mut self, _image: &ImagePayload) -> QrcleResult<()> {
        Err(QrcleError::unsupported("clipboard"))
    }

    fn can_share(&self) -> bool {
        self.share_supported
    }

    fn share(&mut self, request: &ShareRequest) -> QrcleResult<()> {
        self.shared.push(request.clone());
        match self.share_result {
            Some(make_err) => Err(make_err()),
            None => Ok(()),
        }
    }
}

fn query(pairs: &[(&str, &str)]) -> QueryMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn bitmap() -> ImagePayload {
    ImagePayload::png(vec![1, 2, 3, 4])
}

fn full_query() -> QueryMap {
    let mut q = query(&[
        ("location", "https://example.com"),
        ("theme", "pastel"),
        ("text", "Hello"),
        ("paletteIndex", "1"),
        ("textPosition", "left"),
        ("icon", "Heart"),
    ]);
    q.insert("qrcode".to_owned(), bitmap().to_data_uri());
    q
}

fn ready_step() -> ExportStep {
    let mut s = ExportStep::enter(1, &full_query(), &BitmapStore::new(), &Settings::default());
    let Some(Request::Rasterize { ticket, .. }) = s.take_request() else {
        panic!("expected rasterize request");
    };
    s.deliver(Completion::Rasterized {
        ticket,
        result: Ok(ImagePayload::png(vec![7])),
    });
    s
}

fn ctx<'a>(
    r: &'a dyn Rasterizer,
    p: &'a mut dyn Platform,
    n: &'a mut Notifications,
) -> ActionContext<'a> {
    ActionContext {
        rasterizer: r,
        platform: p,
        notifications: n,
        now_ms: 1_700_000_000_000,
    }
}

#[test]
fn enter_composes_and_requests_capture() {
    let mut s = ExportStep::enter(1, &full_query(), &BitmapStore::new(), &Settings::default());
    assert!(s.state().is_loading());
    assert_eq!(s.bitmap(), Some(&bitmap()));
    let comp = s.composition().unwrap();
    assert_eq!(comp.text_position, TextPosition::Left);
    assert_eq!(comp.caption.len(), 5);
    match s.take_request() {
        Some(Request::Rasterize { bitmap: b, .. }) => assert_eq!(b, bitmap()),
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn missing_qrcode_is_incomplete() {
    let mut q = full_query();
    q.remove("qrcode");
    q.remove("location");
    let mut s = ExportStep::enter(1, &q, &BitmapStore::new(), &Settings::default());
    let err = s.state().error().unwrap();
    assert_eq!(err.missing, vec!["location", "qrcode"]);
    assert_eq!(err.remedy, Remedy::GoBack);
    assert!(s.take_request().is_none());
}

#[test]
fn session_bitmap_resolves_through_store() {
    let mut store = BitmapStore::new();
    let token = store.insert(bitmap());
    let mut q = full_query();
    q.insert("qrcode".to_owned(), format!("session:{token}"));
    let s = ExportStep::enter(1, &q, &store, &Settings::default());
    assert_eq!(s.bitmap(), Some(&bitmap()));

    let s = ExportStep::enter(1, &q, &BitmapStore::new(), &Settings::default());
    assert_eq!(s.state().error().unwrap().missing, vec!["qrcode"]);
}

#[test]
fn download_reuses_cached_capture() {
    let mut s = ready_step();
    let r = CountingRasterizer::ok();
    let mut p = ScriptedPlatform::default();
    let mut n = Notifications::new();

    let out = s.download(ctx(&r, &mut p, &mut n));
    assert_eq!(out, ActionOutcome::Done);
    assert_eq!(r.calls.get(), 0);
    assert_eq!(p.saved, ["qrcode-pastel-Lavender-leftText-1700000000000.png"]);
    assert_eq!(n.latest().unwrap().message, MSG_DOWNLOAD_OK);
}

#[test]
fn action_before_capture_rasterizes_on_demand() {
    let mut s = ExportStep::enter(1, &full_query(), &BitmapStore::new(), &Settings::default());
    let Some(Request::Rasterize { ticket, .. }) = s.take_request() else {
        panic!("expected rasterize request");
    };
    let r = CountingRasterizer::ok();
    let mut p = ScriptedPlatform::default();
    let mut n = Notifications::new();
    assert_eq!(s.download(ctx(&r, &mut p, &mut n)), ActionOutcome::Done);
    assert_eq!(r.calls.get(), 1);

    // The superseded background capture is dropped.
    let late = s.deliver(Completion::Rasterized {
        ticket,
        result: Ok(ImagePayload::png(vec![0])),
    });
    assert_eq!(late, Delivery::Discarded);
    assert_eq!(s.state().ready(), Some(&ImagePayload::png(vec![42])));
}

#[test]
fn capture_failure_is_reported() {
    let mut s = ExportStep::enter(1, &full_query(), &BitmapStore::new(), &Settings::default());
    s.take_request();
    let r = CountingRasterizer::failing();
    let mut p = ScriptedPlatform::default();
    let mut n = Notifications::new();
    assert_eq!(s.download(ctx(&r, &mut p, &mut n)), ActionOutcome::Failed);
    assert!(p.saved.is_empty());
    let toast = n.latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, MSG_CAPTURE_FAILED);
}

#[test]
fn clipboard_failure_suggests_download() {
    let mut s = ready_step();
    let r = CountingRasterizer::ok();
    let mut p = ScriptedPlatform::default();
    let mut n = Notifications::new();
    assert_eq!(
        s.copy_to_clipboard(ctx(&r, &mut p, &mut n)),
        ActionOutcome::Failed
    );
    assert_eq!(n.latest().unwrap().message, MSG_COPY_FAILED);
}

#[test]
fn share_success_and_request_content() {
    let mut s = ready_step();
    let r = CountingRasterizer::ok();
    let mut p = ScriptedPlatform {
        share_supported: true,
        ..ScriptedPlatform::default()
    };
    let mut n = Notifications::new();
    assert_eq!(s.share(ctx(&r, &mut p, &mut n)), ActionOutcome::Done);
    let req = &p.shared[0];
    assert_eq!(req.title, "QRcle - pastel Lavender QR Code");
    assert_eq!(req.text, SHARE_TEXT);
    assert_eq!(n.latest().unwrap().message, MSG_SHARE_OK);
}

#[test]
fn share_cancel_is_silent() {
    let mut s = ready_step();
    let r = CountingRasterizer::ok();
    let mut p = ScriptedPlatform {
        share_supported: true,
        share_result: Some(|| QrcleError::UserCancelled),
        ..ScriptedPlatform::default()
    };
    let mut n = Notifications::new();
    assert_eq!(s.share(ctx(&r, &mut p, &mut n)), ActionOutcome::Cancelled);
    assert!(n.is_empty());
}

#[test]
fn share_without_support_reports_failure() {
    let mut s = ready_step();
    let r = CountingRasterizer::ok();
    let mut p = ScriptedPlatform::default();
    let mut n = Notifications::new();
    assert_eq!(s.share(ctx(&r, &mut p, &mut n)), ActionOutcome::Failed);
    assert!(p.shared.is_empty());
    assert_eq!(n.latest().unwrap().message, MSG_SHARE_FAILED);
}

#[test]
fn palette_change_reencodes_then_recaptures() {
    let mut s = ready_step();
    s.set_palette(2);
    assert!(s.state().is_loading());
    let Some(Request::Encode {
        ticket, options, ..
    }) = s.take_request()
    else {
        panic!("expected encode request");
    };
    assert_eq!(options.foreground.to_hex(), "#36B37E");

    let fresh = ImagePayload::png(vec![5, 5]);
    s.deliver(Completion::Encoded {
        ticket,
        result: Ok(fresh.clone()),
    });
    assert_eq!(s.bitmap(), Some(&fresh));
    assert!(matches!(s.take_request(), Some(Request::Rasterize { .. })));

    let mut store = BitmapStore::new();
    let url = s.current_url(&mut store, 8192);
    assert_eq!(url.query["paletteIndex"], "2");
    assert_eq!(url.query["qrcode"], fresh.to_data_uri());
}

#[test]
fn navigation_urls() {
    let s = ready_step();
    let edit = s.edit_url();
    assert_eq!(edit.step, Step::Customize);
    assert_eq!(edit.query["location"], "https://example.com");
    assert!(edit.query.contains_key("qrcode"));

    let fresh = s.create_new_url();
    assert_eq!(fresh.step, Step::Collect);
    assert!(!fresh.query.contains_key("location"));
    assert_eq!(fresh.query["textPosition"], "left");
    assert_eq!(fresh.query["icon"], Icon::Heart.name());
}

#[test]
fn info_lists_icon_position_when_icon_set() {
    let s = ready_step();
    let info = s.info().unwrap();
    assert_eq!(info.get("Icon Position"), Some("Bottom Right"));
}
