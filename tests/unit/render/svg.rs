use super::*;
use crate::{
    assets::icons::Icon,
    config::model::{Configuration, TextPosition},
    layout::{composer::compose, model::LayoutMetrics},
};

fn payload() -> ImagePayload {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    crate::assets::payload::encode_png(&img).unwrap()
}

fn comp(text: &str, position: TextPosition, icon: Icon) -> Composition {
    let cfg = Configuration {
        location: Some("l".to_owned()),
        theme: Some("modern".to_owned()),
        text: Some(text.to_owned()),
        text_position: position,
        icon,
        ..Configuration::default()
    }
    .require_complete()
    .unwrap();
    compose(&cfg, &LayoutMetrics::default())
}

#[test]
fn document_embeds_bitmap_and_caption() {
    let p = payload();
    let svg = composition_to_svg(&comp("Hello", TextPosition::Top, Icon::None), &p);
    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"width="302" height="342""#));
    assert!(svg.contains(&p.to_data_uri()));
    assert!(svg.contains(">Hello</text>"));
    assert!(!svg.contains("<circle"));
}

#[test]
fn caption_text_is_escaped() {
    let svg = composition_to_svg(
        &comp("<a & \"b\">", TextPosition::Bottom, Icon::None),
        &payload(),
    );
    assert!(svg.contains("&lt;a &amp; &quot;b&quot;&gt;"));
}

#[test]
fn vertical_caption_emits_a_text_per_character() {
    let svg = composition_to_svg(&comp("a b", TextPosition::Left, Icon::None), &payload());
    assert_eq!(svg.matches("<text ").count(), 3);
    assert!(svg.contains(">\u{00A0}</text>"));
}

#[test]
fn icon_badge_is_drawn_with_palette_tint() {
    let svg = composition_to_svg(&comp("Hi", TextPosition::Top, Icon::Heart), &payload());
    assert!(svg.contains("<circle"));
    assert!(svg.contains(r##"stroke="#000000""##));
    assert_eq!(svg.matches("<path ").count(), Icon::Heart.glyph().unwrap().len());
}

#[test]
fn document_parses_with_usvg() {
    let svg = composition_to_svg(&comp("Hi", TextPosition::Right, Icon::Globe), &payload());
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 334.0);
}

#[test]
fn control_characters_are_dropped_from_captions() {
    let svg = composition_to_svg(
        &comp("Hi\u{0007}there\u{FFFF}", TextPosition::Top, Icon::None),
        &payload(),
    );
    assert!(!svg.contains('\u{0007}'));
    assert!(!svg.contains('\u{FFFF}'));
    assert!(svg.contains(">Hithere</text>"));
    usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
}

#[test]
fn vertical_control_character_rows_still_parse() {
    let svg = composition_to_svg(&comp("a\u{001B}b", TextPosition::Left, Icon::None), &payload());
    usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
}
