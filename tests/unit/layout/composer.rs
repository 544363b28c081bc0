use super::*;
use crate::{
    assets::icons::Icon,
    config::model::{Configuration, ResolvedConfiguration},
};

fn resolved(text: &str, position: TextPosition, icon: Icon) -> ResolvedConfiguration {
    Configuration {
        location: Some("https://example.com".to_owned()),
        theme: Some("pastel".to_owned()),
        text: Some(text.to_owned()),
        text_position: position,
        icon,
        ..Configuration::default()
    }
    .require_complete()
    .unwrap()
}

#[test]
fn top_caption_sits_above_bitmap() {
    let c = compose(
        &resolved("Hi", TextPosition::Top, Icon::None),
        &LayoutMetrics::default(),
    );
    assert_eq!(c.flow, Flow::Column);
    assert_eq!(c.size, Size::new(302.0, 342.0));
    assert_eq!(c.bitmap, Rect::new(26.0, 66.0, 276.0, 316.0));
    assert_eq!(c.caption.len(), 1);
    assert_eq!(c.caption[0].rect, Rect::new(26.0, 26.0, 276.0, 54.0));
    assert_eq!(c.caption[0].center_x(), 151.0);
    assert_eq!(c.caption_style.color, Color::rgb(0x5B, 0x8F, 0xB9));
}

#[test]
fn bottom_caption_splits_lines_below_bitmap() {
    let c = compose(
        &resolved("one\ntwo\n", TextPosition::Bottom, Icon::None),
        &LayoutMetrics::default(),
    );
    let texts: Vec<&str> = c.caption.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["one", "two", ""]);
    assert_eq!(c.bitmap.y0, 26.0);
    let bounds = c.caption_bounds().unwrap();
    assert_eq!(bounds.y0, c.bitmap.y1 + 12.0);
    assert_eq!(bounds.height(), 3.0 * 28.0);
}

#[test]
fn long_lines_widen_the_card() {
    let text = "x".repeat(40);
    let c = compose(
        &resolved(&text, TextPosition::Top, Icon::None),
        &LayoutMetrics::default(),
    );
    let expected_w = 40.0 * 0.6 * 18.0;
    assert_eq!(c.size.width, expected_w + 52.0);
    assert_eq!(c.bitmap.center().x, c.size.width / 2.0);
}

#[test]
fn left_caption_is_one_character_per_row() {
    let c = compose(
        &resolved("a b", TextPosition::Left, Icon::None),
        &LayoutMetrics::default(),
    );
    assert_eq!(c.flow, Flow::Row);
    let texts: Vec<&str> = c.caption.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["a", "\u{00A0}", "b"]);
    for row in &c.caption {
        assert_eq!(row.rect.height(), 28.0);
        assert!(row.rect.x1 <= c.bitmap.x0);
    }
    assert_eq!(c.size, Size::new(334.0, 302.0));
    assert_eq!(c.bitmap, Rect::new(58.0, 26.0, 308.0, 276.0));
    assert_eq!(c.caption[0].rect.y0, 109.0);
}

#[test]
fn right_caption_puts_bitmap_first() {
    let c = compose(
        &resolved("ab", TextPosition::Right, Icon::None),
        &LayoutMetrics::default(),
    );
    assert_eq!(c.bitmap.x0, 26.0);
    for row in &c.caption {
        assert!(row.rect.x0 >= c.bitmap.x1 + 12.0);
    }
}

#[test]
fn tall_vertical_caption_grows_the_card() {
    let text = "y".repeat(12);
    let c = compose(
        &resolved(&text, TextPosition::Left, Icon::None),
        &LayoutMetrics::default(),
    );
    assert_eq!(c.size.height, 12.0 * 28.0 + 52.0);
    assert_eq!(c.caption[0].rect.y0, 26.0);
}

#[test]
fn icon_badge_follows_position() {
    let m = LayoutMetrics::default();
    let mut cfg = resolved("Hi", TextPosition::Top, Icon::Heart);
    let c = compose(&cfg, &m);
    let badge = c.icon.unwrap();
    assert_eq!(badge.radius, 16.0);
    assert_eq!(badge.center, Point::new(c.bitmap.x1 - 24.0, c.bitmap.y1 - 24.0));
    assert_eq!(badge.glyph_rect.width(), 24.0);
    assert_eq!(badge.tint, cfg.palette.dark);

    cfg.icon_position = IconPosition::TopLeft;
    let badge = compose(&cfg, &m).icon.unwrap();
    assert_eq!(badge.center, Point::new(c.bitmap.x0 + 24.0, c.bitmap.y0 + 24.0));

    cfg.icon_position = IconPosition::Center;
    let badge = compose(&cfg, &m).icon.unwrap();
    assert_eq!(badge.center, c.bitmap.center());
}

#[test]
fn no_icon_means_no_overlay_regardless_of_position() {
    let mut cfg = resolved("Hi", TextPosition::Top, Icon::None);
    for p in IconPosition::ALL {
        cfg.icon_position = p;
        let c = compose(&cfg, &LayoutMetrics::default());
        assert!(!c.icon_visible());
    }
}

#[test]
fn composition_is_idempotent() {
    let cfg = resolved("Same\ninput", TextPosition::Bottom, Icon::Gift);
    let m = LayoutMetrics::default();
    assert_eq!(compose(&cfg, &m), compose(&cfg, &m));
}

#[test]
fn font_tier_drives_caption_metrics() {
    let mut cfg = resolved("Hi", TextPosition::Top, Icon::None);
    cfg.font_size = crate::config::model::font_size_tier(0);
    let c = compose(&cfg, &LayoutMetrics::default());
    assert_eq!(c.caption_style.font_px, 12.0);
    assert_eq!(c.caption[0].rect.height(), 16.0);
}
