use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    assets::payload::{ImagePayload, encode_png},
    foundation::error::{QrcleError, QrcleResult},
    layout::model::Composition,
    render::svg::composition_to_svg,
};

/// Turns a composition plus its QR bitmap into a single flat image.
pub trait Rasterizer {
    fn rasterize(&self, comp: &Composition, bitmap: &ImagePayload) -> QrcleResult<ImagePayload>;
}

/// [`Rasterizer`] that renders the SVG form of a composition with `resvg`.
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    scale: f64,
}

impl std::fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("faces", &self.fontdb.len())
            .field("scale", &self.scale)
            .finish()
    }
}

impl SvgRasterizer {
    /// Output pixels per display pixel are `scale`. System fonts are always loaded; fonts
    /// found in `fonts_dir` are added on top.
    pub fn new(scale: f64, fonts_dir: Option<&Path>) -> QrcleResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(QrcleError::validation(format!(
                "export scale must be finite and > 0, got {scale}"
            )));
        }

        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = fonts_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");

        Ok(Self {
            fontdb: Arc::new(db),
            scale,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: make_font_resolver(),
            ..Default::default()
        }
    }
}

impl Rasterizer for SvgRasterizer {
    #[tracing::instrument(skip(self, comp, bitmap), fields(w = comp.size.width, h = comp.size.height))]
    fn rasterize(&self, comp: &Composition, bitmap: &ImagePayload) -> QrcleResult<ImagePayload> {
        let (width, height) = raster_size(comp.size.width, comp.size.height, self.scale)?;

        let svg = composition_to_svg(comp, bitmap);
        let tree = usvg::Tree::from_str(&svg, &self.options())
            .map_err(|e| QrcleError::capture(format!("parse composed svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| QrcleError::capture("failed to allocate capture pixmap"))?;
        let sx = width as f32 / tree.size().width();
        let sy = height as f32 / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let straight: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        let img = image::RgbaImage::from_raw(width, height, straight)
            .context("wrap captured pixels")?;
        encode_png(&img)
    }
}

/// Pixel size of the capture, rejecting empty and pathological canvases.
fn raster_size(w: f64, h: f64, scale: f64) -> QrcleResult<(u32, u32)> {
    const MAX_DIM: f64 = 16_384.0;

    let to_px = |v: f64| -> QrcleResult<u32> {
        let px = (v * scale).ceil();
        if !px.is_finite() || px < 1.0 {
            return Err(QrcleError::capture("composition has no visible area"));
        }
        if px > MAX_DIM {
            return Err(QrcleError::capture(format!(
                "capture size too large: {px} px (max {MAX_DIM})"
            )));
        }
        Ok(px as u32)
    };
    Ok((to_px(w)?, to_px(h)?))
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "fonts directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"));
        if path.is_file() && is_font && db.load_font_file(&path).is_err() {
            tracing::warn!(path = %path.display(), "skipping unreadable font file");
        }
    }
}

/// Requested families first, then any sans-serif face, then whatever the database has.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
