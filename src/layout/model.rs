use crate::{
    assets::icons::Icon,
    config::model::TextPosition,
    foundation::core::{Color, Point, Rect, Size},
};

/// Fixed geometry of the composed card, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Edge length of the displayed bitmap.
    pub bitmap_px: f64,
    /// Inner padding between the border and the content.
    pub padding: f64,
    pub border_width: f64,
    pub border_color: Color,
    pub corner_radius: f64,
    pub background: Color,
    /// Space between caption and bitmap.
    pub caption_gap: f64,
    /// Minimum width of the one-character-per-row caption column.
    pub vertical_column_min_width: f64,
    /// Estimated advance per character, in em.
    pub char_advance_em: f64,
    /// Glyph box of the icon overlay.
    pub icon_glyph_px: f64,
    /// Badge padding around the glyph, per side.
    pub icon_padding: f64,
    /// Distance between a corner badge and the bitmap edges.
    pub icon_inset: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            bitmap_px: 250.0,
            padding: 24.0,
            border_width: 2.0,
            border_color: Color::rgb(0xE5, 0xE7, 0xEB),
            corner_radius: 8.0,
            background: Color::WHITE,
            caption_gap: 12.0,
            vertical_column_min_width: 20.0,
            char_advance_em: 0.6,
            icon_glyph_px: 24.0,
            icon_padding: 4.0,
            icon_inset: 8.0,
        }
    }
}

impl LayoutMetrics {
    /// Defaults with a custom bitmap edge length.
    pub fn with_bitmap_px(bitmap_px: f64) -> Self {
        Self {
            bitmap_px,
            ..Self::default()
        }
    }

    /// Diameter of the icon badge.
    pub fn badge_px(&self) -> f64 {
        self.icon_glyph_px + 2.0 * self.icon_padding
    }

    /// Deterministic width estimate for a run of text.
    pub fn estimate_text_width(&self, text: &str, font_px: f64) -> f64 {
        text.chars().count() as f64 * self.char_advance_em * font_px
    }
}

/// Main axis of the caption/bitmap arrangement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Caption above or below the bitmap.
    Column,
    /// Caption column beside the bitmap.
    Row,
}

/// Caption typography.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionStyle {
    pub font_px: f64,
    pub line_height: f64,
    pub color: Color,
}

/// One caption row. `text` is already display-ready (spaces in vertical captions are
/// non-breaking so empty-looking rows keep their height).
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionRow {
    pub text: String,
    /// Row box in canvas coordinates.
    pub rect: Rect,
}

impl CaptionRow {
    /// Horizontal center of the row.
    pub fn center_x(&self) -> f64 {
        self.rect.center().x
    }
}

/// Circular badge drawn over the bitmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconBadge {
    pub icon: Icon,
    pub center: Point,
    pub radius: f64,
    /// Square area the glyph is fitted into.
    pub glyph_rect: Rect,
    pub fill: Color,
    pub tint: Color,
}

/// Resolved, renderer-independent description of the exported card.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    pub size: Size,
    pub background: Color,
    pub border_width: f64,
    pub border_color: Color,
    pub corner_radius: f64,
    pub flow: Flow,
    pub text_position: TextPosition,
    /// Where the QR bitmap is drawn.
    pub bitmap: Rect,
    pub caption_style: CaptionStyle,
    /// Rows in display order, top to bottom.
    pub caption: Vec<CaptionRow>,
    /// `None` when no icon is selected.
    pub icon: Option<IconBadge>,
}

impl Composition {
    pub fn icon_visible(&self) -> bool {
        self.icon.is_some()
    }

    /// Union of all caption rows.
    pub fn caption_bounds(&self) -> Option<Rect> {
        let mut rows = self.caption.iter().map(|r| r.rect);
        let first = rows.next()?;
        Some(rows.fold(first, |acc, r| acc.union(r)))
    }
}
