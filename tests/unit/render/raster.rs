use super::*;
use crate::{
    assets::icons::Icon,
    config::model::{Configuration, TextPosition},
    foundation::core::Size,
    layout::{composer::compose, model::LayoutMetrics},
};

fn bitmap(rgba: [u8; 4]) -> ImagePayload {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba(rgba));
    encode_png(&img).unwrap()
}

fn comp(position: TextPosition, icon: Icon) -> Composition {
    let cfg = Configuration {
        location: Some("l".to_owned()),
        theme: Some("modern".to_owned()),
        text: Some("Caption".to_owned()),
        text_position: position,
        icon,
        ..Configuration::default()
    }
    .require_complete()
    .unwrap();
    compose(&cfg, &LayoutMetrics::default())
}

#[test]
fn output_size_follows_scale() {
    let c = comp(TextPosition::Top, Icon::None);
    let r = SvgRasterizer::new(2.0, None).unwrap();
    let png = r.rasterize(&c, &bitmap([0, 0, 0, 255])).unwrap();
    assert_eq!(png.mime(), "image/png");
    assert_eq!(png.dimensions().unwrap(), (604, 684));
}

#[test]
fn bitmap_and_card_background_are_painted() {
    let c = comp(TextPosition::Left, Icon::None);
    let r = SvgRasterizer::new(1.0, None).unwrap();
    let img = r
        .rasterize(&c, &bitmap([10, 200, 30, 255]))
        .unwrap()
        .decode_rgba8()
        .unwrap();

    let center = c.bitmap.center();
    assert_eq!(
        img.get_pixel(center.x as u32, center.y as u32).0,
        [10, 200, 30, 255]
    );
    // Inside the border, outside the bitmap: white card.
    assert_eq!(img.get_pixel(10, 10).0, [255, 255, 255, 255]);
    // Outside the rounded corner stays transparent.
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
}

#[test]
fn icon_badge_is_white_over_the_bitmap() {
    let c = comp(TextPosition::Top, Icon::Info);
    let badge = c.icon.unwrap();
    let r = SvgRasterizer::new(1.0, None).unwrap();
    let img = r
        .rasterize(&c, &bitmap([0, 0, 0, 255]))
        .unwrap()
        .decode_rgba8()
        .unwrap();
    // A point inside the badge ring but away from glyph strokes.
    let x = (badge.center.x - badge.radius + 2.0) as u32;
    let y = badge.center.y as u32;
    assert_eq!(img.get_pixel(x, y).0, [255, 255, 255, 255]);
}

#[test]
fn empty_composition_is_a_capture_error() {
    let mut c = comp(TextPosition::Top, Icon::None);
    c.size = Size::ZERO;
    let r = SvgRasterizer::new(1.0, None).unwrap();
    let err = r.rasterize(&c, &bitmap([0, 0, 0, 255])).unwrap_err();
    assert!(matches!(err, QrcleError::Capture(_)), "{err:?}");
}

#[test]
fn invalid_scale_is_rejected() {
    assert!(SvgRasterizer::new(0.0, None).is_err());
    assert!(SvgRasterizer::new(f64::NAN, None).is_err());
}
