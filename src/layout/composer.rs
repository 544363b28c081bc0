use crate::{
    config::model::{IconPosition, ResolvedConfiguration, TextPosition},
    foundation::core::{Color, Point, Rect, Size},
    layout::model::{CaptionRow, CaptionStyle, Composition, Flow, IconBadge, LayoutMetrics},
};

/// Shown in place of whitespace in one-character-per-row captions.
pub const NBSP: char = '\u{00A0}';

/// Map a resolved configuration onto the card layout. Pure and deterministic.
#[tracing::instrument(skip(config, metrics), fields(text_position = config.text_position.as_str()))]
pub fn compose(config: &ResolvedConfiguration, metrics: &LayoutMetrics) -> Composition {
    let style = CaptionStyle {
        font_px: f64::from(config.font_size.size_px),
        line_height: f64::from(config.font_size.line_height_px),
        color: config.palette.dark,
    };

    let (flow, size, bitmap, caption) = if config.text_position.is_vertical_caption() {
        layout_row(&config.text, config.text_position, &style, metrics)
    } else {
        layout_column(&config.text, config.text_position, &style, metrics)
    };

    let icon = (!config.icon.is_none()).then(|| {
        let center = badge_center(bitmap, config.icon_position, metrics);
        IconBadge {
            icon: config.icon,
            center,
            radius: metrics.badge_px() * 0.5,
            glyph_rect: Rect::from_center_size(
                center,
                Size::new(metrics.icon_glyph_px, metrics.icon_glyph_px),
            ),
            fill: Color::WHITE,
            tint: config.palette.dark,
        }
    });

    Composition {
        size,
        background: metrics.background,
        border_width: metrics.border_width,
        border_color: metrics.border_color,
        corner_radius: metrics.corner_radius,
        flow,
        text_position: config.text_position,
        bitmap,
        caption_style: style,
        caption,
        icon,
    }
}

/// Rows of a vertical caption: one per character, whitespace kept as a visible blank.
pub fn vertical_caption_rows(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c.is_whitespace() { NBSP } else { c })
        .map(String::from)
        .collect()
}

fn layout_column(
    text: &str,
    position: TextPosition,
    style: &CaptionStyle,
    m: &LayoutMetrics,
) -> (Flow, Size, Rect, Vec<CaptionRow>) {
    let lines: Vec<&str> = text.split('\n').collect();
    let caption_h = lines.len() as f64 * style.line_height;
    let widest = lines
        .iter()
        .map(|l| m.estimate_text_width(l, style.font_px))
        .fold(0.0, f64::max);
    let content_w = m.bitmap_px.max(widest);
    let content_h = m.bitmap_px + m.caption_gap + caption_h;
    let inset = m.border_width + m.padding;

    let (caption_y, bitmap_y) = match position {
        TextPosition::Bottom => (inset + m.bitmap_px + m.caption_gap, inset),
        _ => (inset, inset + caption_h + m.caption_gap),
    };
    let bitmap_x = inset + align_center(content_w, m.bitmap_px);

    let caption = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let y = caption_y + i as f64 * style.line_height;
            CaptionRow {
                text: (*line).to_owned(),
                rect: Rect::new(inset, y, inset + content_w, y + style.line_height),
            }
        })
        .collect();

    (
        Flow::Column,
        Size::new(content_w + 2.0 * inset, content_h + 2.0 * inset),
        Rect::new(
            bitmap_x,
            bitmap_y,
            bitmap_x + m.bitmap_px,
            bitmap_y + m.bitmap_px,
        ),
        caption,
    )
}

fn layout_row(
    text: &str,
    position: TextPosition,
    style: &CaptionStyle,
    m: &LayoutMetrics,
) -> (Flow, Size, Rect, Vec<CaptionRow>) {
    let rows = vertical_caption_rows(text);
    let column_w = m
        .vertical_column_min_width
        .max(m.char_advance_em * style.font_px);
    let column_h = rows.len() as f64 * style.line_height;
    let content_w = column_w + m.caption_gap + m.bitmap_px;
    let content_h = m.bitmap_px.max(column_h);
    let inset = m.border_width + m.padding;

    let (column_x, bitmap_x) = match position {
        TextPosition::Right => (inset + m.bitmap_px + m.caption_gap, inset),
        _ => (inset, inset + column_w + m.caption_gap),
    };
    let bitmap_y = inset + align_center(content_h, m.bitmap_px);
    let column_y = inset + align_center(content_h, column_h);

    let caption = rows
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let y = column_y + i as f64 * style.line_height;
            CaptionRow {
                text,
                rect: Rect::new(column_x, y, column_x + column_w, y + style.line_height),
            }
        })
        .collect();

    (
        Flow::Row,
        Size::new(content_w + 2.0 * inset, content_h + 2.0 * inset),
        Rect::new(
            bitmap_x,
            bitmap_y,
            bitmap_x + m.bitmap_px,
            bitmap_y + m.bitmap_px,
        ),
        caption,
    )
}

fn badge_center(bitmap: Rect, position: IconPosition, m: &LayoutMetrics) -> Point {
    let off = m.icon_inset + m.badge_px() * 0.5;
    match position {
        IconPosition::TopLeft => Point::new(bitmap.x0 + off, bitmap.y0 + off),
        IconPosition::TopRight => Point::new(bitmap.x1 - off, bitmap.y0 + off),
        IconPosition::BottomLeft => Point::new(bitmap.x0 + off, bitmap.y1 - off),
        IconPosition::BottomRight => Point::new(bitmap.x1 - off, bitmap.y1 - off),
        IconPosition::Center => bitmap.center(),
    }
}

fn align_center(container: f64, content: f64) -> f64 {
    (container - content).max(0.0) * 0.5
}

#[cfg(test)]
#[path = "../../tests/unit/layout/composer.rs"]
mod tests;
