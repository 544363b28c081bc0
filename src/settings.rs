use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    encode::qr::{MAX_QR_EDGE, MAX_QR_MARGIN, QrOptions},
    foundation::core::Color,
    foundation::error::{QrcleError, QrcleResult},
    layout::model::LayoutMetrics,
};

/// Runtime knobs. Every field has a default, so `{}` is a valid settings file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Edge length of the encoded QR bitmap.
    pub qr_pixel_size: u32,
    /// Quiet zone around the QR code, in modules.
    pub qr_margin: u32,
    /// Edge length of the bitmap inside the composed card, in display pixels.
    pub bitmap_display_px: u32,
    /// Longest URL that still carries the bitmap inline.
    pub max_url_len: usize,
    /// Output pixels per display pixel when capturing.
    pub export_scale: f64,
    /// Where downloads are written.
    pub download_dir: PathBuf,
    /// Extra fonts for caption rendering.
    pub fonts_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            qr_pixel_size: 300,
            qr_margin: 1,
            bitmap_display_px: 250,
            max_url_len: 8192,
            export_scale: 2.0,
            download_dir: PathBuf::from("."),
            fonts_dir: None,
        }
    }
}

impl Settings {
    /// Read and validate a JSON settings file.
    pub fn from_path(path: &Path) -> QrcleResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .map_err(|e| QrcleError::serde(format!("{}: {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> QrcleResult<()> {
        if self.qr_pixel_size == 0 {
            return Err(QrcleError::validation("qr_pixel_size must be > 0"));
        }
        if self.qr_pixel_size > MAX_QR_EDGE {
            return Err(QrcleError::validation(format!(
                "qr_pixel_size must be <= {MAX_QR_EDGE}"
            )));
        }
        if self.qr_margin > MAX_QR_MARGIN {
            return Err(QrcleError::validation(format!(
                "qr_margin must be <= {MAX_QR_MARGIN}"
            )));
        }
        if self.bitmap_display_px == 0 {
            return Err(QrcleError::validation("bitmap_display_px must be > 0"));
        }
        if self.max_url_len == 0 {
            return Err(QrcleError::validation("max_url_len must be > 0"));
        }
        if !self.export_scale.is_finite() || self.export_scale <= 0.0 {
            return Err(QrcleError::validation(
                "export_scale must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Encoder options with the given palette colors.
    pub fn qr_options(&self, foreground: Color, background: Color) -> QrOptions {
        QrOptions {
            pixel_size: self.qr_pixel_size,
            margin: self.qr_margin,
            foreground,
            background,
        }
    }

    pub fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics::with_bitmap_px(f64::from(self.bitmap_display_px))
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
