//! QRcle turns a location, a theme and a caption into a styled, exportable QR code card.
//!
//! The crate models a three-step wizard whose whole state lives in URL query parameters:
//!
//! 1. **Collect** (`/`): content form (`location`, `theme`, `text`)
//! 2. **Customize** (`/preview`): palette, caption placement, font size, icon overlay
//! 3. **Export** (`/share`): capture the composed card, then download, copy or share it
//!
//! Every step re-derives its [`Configuration`] from the URL through the query codec
//! ([`encode_query`] / [`decode_query`]), so any URL is resumable on its own. Layout is a
//! pure function ([`compose`]) from a [`ResolvedConfiguration`] to a [`Composition`];
//! collaborators sit behind traits:
//!
//! - [`QrEncoder`] (default [`QrcodeEncoder`]): content to a palette-colored bitmap
//! - [`Rasterizer`] (default [`SvgRasterizer`]): composition plus bitmap to a PNG
//! - [`Platform`] (default [`HeadlessPlatform`]): file save, clipboard, native share
//!
//! [`Wizard`] ties these together with a browser-like [`History`]. Collaborator calls are
//! request/completion pairs tagged with a [`Ticket`]; late or superseded completions are
//! dropped, so the newest request always wins.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod encode;
mod foundation;
mod layout;
mod platform;
mod render;
mod session;
mod settings;
mod steps;
mod theme;

pub use assets::icons::{GLYPH_BOX, Icon};
pub use assets::payload::{ImagePayload, PNG_MIME, encode_png};
pub use config::codec::{
    CANONICAL_KEYS, PRESENTATION_KEYS, QueryMap, decode as decode_query,
    encode as encode_query, encode_presentation,
};
pub use config::model::{
    BitmapRef, Configuration, DEFAULT_FONT_SIZE_INDEX, DEFAULT_PALETTE_INDEX, FONT_SIZE_TIERS,
    FontSizeTier, IconPosition, ResolvedConfiguration, TextPosition, font_size_tier,
};
pub use config::url_state::{Step, StepUrl};
pub use encode::qr::{QrEncoder, QrOptions, QrcodeEncoder};
pub use foundation::core::{Color, Point, Rect, Size, Vec2};
pub use foundation::error::{QrcleError, QrcleResult};
pub use layout::composer::{NBSP, compose, vertical_caption_rows};
pub use layout::model::{CaptionRow, CaptionStyle, Composition, Flow, IconBadge, LayoutMetrics};
pub use platform::{HeadlessPlatform, Platform, ShareRequest};
pub use render::raster::{Rasterizer, SvgRasterizer};
pub use render::svg::composition_to_svg;
pub use session::history::History;
pub use session::store::BitmapStore;
pub use session::wizard::{ActiveStep, Adjustment, Clock, Wizard};
pub use settings::Settings;
pub use steps::collect::{
    CollectStep, FieldError, MSG_MISSING_LOCATION, MSG_MISSING_TEXT, MSG_MISSING_THEME,
};
pub use steps::customize::{CustomizeStep, Preview};
pub use steps::export::{
    ActionContext, ActionOutcome, ExportStep, MSG_CAPTURE_FAILED, MSG_COPY_FAILED, MSG_COPY_OK,
    MSG_DOWNLOAD_FAILED, MSG_DOWNLOAD_OK, MSG_SHARE_FAILED, MSG_SHARE_OK, SHARE_TEXT,
    download_file_name, share_request,
};
pub use steps::info::{InfoSummary, truncate_caption};
pub use steps::notify::{Notifications, TOAST_TTL_MS, Toast, ToastKind};
pub use steps::state::{
    Completion, Delivery, Remedy, Request, RequestTracker, StepError, StepState, Ticket,
};
pub use theme::registry::{
    DEFAULT_THEME, ThemeInfo, ThemePalette, clamp_palette_index, find_theme, list_palettes,
    resolve_palette, theme_ids, theme_info, themes,
};
