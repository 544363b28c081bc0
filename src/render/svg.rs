//! Composition to SVG document.
//!
//! The document is self-contained: the QR bitmap is embedded as a data URI and icon glyphs
//! are inlined as stroked paths, so it can be parsed without a resources directory.

use std::fmt::Write as _;

use crate::{
    assets::{icons::GLYPH_BOX, payload::ImagePayload},
    layout::model::{Composition, IconBadge},
};

/// Font stack requested for caption text.
pub const CAPTION_FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";

/// Baseline offset from the row center, in em.
const BASELINE_SHIFT_EM: f64 = 0.35;

/// Serialize `comp` with `bitmap` placed in its bitmap rect.
pub fn composition_to_svg(comp: &Composition, bitmap: &ImagePayload) -> String {
    let mut out = String::with_capacity(1024 + bitmap.bytes().len() * 4 / 3);
    let (w, h) = (comp.size.width, comp.size.height);

    // `write!` into a String cannot fail.
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    let half = comp.border_width * 0.5;
    let _ = write!(
        out,
        r#"<rect x="{half}" y="{half}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        (w - comp.border_width).max(0.0),
        (h - comp.border_width).max(0.0),
        comp.background,
        comp.border_color,
        comp.border_width,
        r = comp.corner_radius,
    );

    let b = comp.bitmap;
    let _ = write!(
        out,
        r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" style="image-rendering:optimizeSpeed" xlink:href="{}"/>"#,
        b.x0,
        b.y0,
        b.width(),
        b.height(),
        bitmap.to_data_uri(),
    );

    let style = &comp.caption_style;
    for row in &comp.caption {
        if row.text.is_empty() {
            continue;
        }
        let baseline = row.rect.center().y + BASELINE_SHIFT_EM * style.font_px;
        let _ = write!(
            out,
            r#"<text x="{}" y="{baseline}" font-family="{CAPTION_FONT_FAMILY}" font-size="{}" font-weight="500" text-anchor="middle" fill="{}">{}</text>"#,
            row.center_x(),
            style.font_px,
            style.color,
            escape_xml(&row.text),
        );
    }

    if let Some(badge) = &comp.icon {
        write_badge(&mut out, badge);
    }

    out.push_str("</svg>");
    out
}

fn write_badge(out: &mut String, badge: &IconBadge) {
    let _ = write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
        badge.center.x, badge.center.y, badge.radius, badge.fill,
    );

    let Some(paths) = badge.icon.glyph() else {
        return;
    };
    let g = badge.glyph_rect;
    let scale = g.width() / GLYPH_BOX;
    let _ = write!(
        out,
        r#"<g transform="translate({} {}) scale({scale})" fill="none" stroke="{}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
        g.x0, g.y0, badge.tint,
    );
    for d in paths {
        let _ = write!(out, r#"<path d="{d}"/>"#);
    }
    out.push_str("</g>");
}

/// Escape markup and drop characters XML 1.0 does not allow.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().filter(|&c| is_xml_char(c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
