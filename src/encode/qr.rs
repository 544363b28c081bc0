use qrcode::QrCode;

use crate::{
    assets::payload::{ImagePayload, encode_png},
    foundation::core::Color,
    foundation::error::{QrcleError, QrcleResult},
};

/// Largest bitmap edge the encoder will allocate.
pub const MAX_QR_EDGE: u32 = 16_384;

/// Largest quiet zone accepted, in modules.
pub const MAX_QR_MARGIN: u32 = 1_024;

/// Parameters for one QR encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrOptions {
    /// Target edge length of the square bitmap.
    pub pixel_size: u32,
    /// Quiet zone in modules.
    pub margin: u32,
    pub foreground: Color,
    pub background: Color,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            pixel_size: 300,
            margin: 1,
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

/// Turns content into a square QR bitmap.
pub trait QrEncoder {
    fn encode(&self, content: &str, opts: &QrOptions) -> QrcleResult<ImagePayload>;
}

/// [`QrEncoder`] backed by the `qrcode` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct QrcodeEncoder;

impl QrEncoder for QrcodeEncoder {
    #[tracing::instrument(skip(self, content), fields(content_len = content.len()))]
    fn encode(&self, content: &str, opts: &QrOptions) -> QrcleResult<ImagePayload> {
        let code = QrCode::new(content.as_bytes())
            .map_err(|e| QrcleError::encoding(format!("qr encode failed: {e}")))?;
        let img = render_modules(&code.to_colors(), code.width() as u32, opts)?;
        encode_png(&img)
    }
}

/// Rasterize a row-major module grid, quiet zone included, onto a square RGBA image.
///
/// The image edge is `opts.pixel_size`, or the module count when that is larger. Each
/// pixel samples the module under it, so modules may differ by one pixel in size.
fn render_modules(
    modules: &[qrcode::Color],
    width: u32,
    opts: &QrOptions,
) -> QrcleResult<image::RgbaImage> {
    let total = opts
        .margin
        .checked_mul(2)
        .and_then(|m| m.checked_add(width))
        .ok_or_else(|| QrcleError::encoding(format!("qr margin {} is too large", opts.margin)))?;
    let size = opts.pixel_size.max(total);
    if size > MAX_QR_EDGE {
        return Err(QrcleError::encoding(format!(
            "qr bitmap edge {size} px exceeds {MAX_QR_EDGE} px"
        )));
    }
    let dark = image::Rgba(opts.foreground.to_rgba8());
    let light = image::Rgba(opts.background.to_rgba8());

    Ok(image::RgbaImage::from_fn(size, size, |px, py| {
        let mx = (u64::from(px) * u64::from(total) / u64::from(size)) as u32;
        let my = (u64::from(py) * u64::from(total) / u64::from(size)) as u32;
        let inside = |m: u32| m >= opts.margin && m < opts.margin + width;
        if !inside(mx) || !inside(my) {
            return light;
        }
        let idx = ((my - opts.margin) * width + (mx - opts.margin)) as usize;
        match modules.get(idx) {
            Some(qrcode::Color::Dark) => dark,
            _ => light,
        }
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/qr.rs"]
mod tests;
