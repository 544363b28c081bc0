use super::*;

fn map(pairs: &[(&str, &str)]) -> QueryMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn sample_png() -> ImagePayload {
    let img = image::RgbaImage::from_pixel(3, 3, image::Rgba([10, 20, 30, 255]));
    crate::assets::payload::encode_png(&img).unwrap()
}

#[test]
fn full_configuration_round_trips() {
    let configs = [
        Configuration::default(),
        Configuration {
            location: Some("https://example.com/?a=1&b=2".to_owned()),
            theme: Some("cartoony".to_owned()),
            text: Some("Line one\nLine two & more".to_owned()),
            palette_index: 2,
            font_size_index: 5,
            text_position: TextPosition::Right,
            icon: Icon::Github,
            icon_position: IconPosition::Center,
            qr_image: Some(BitmapRef::Inline(sample_png())),
        },
        Configuration {
            location: Some(String::new()),
            theme: Some("no-such-theme".to_owned()),
            text: Some("  ".to_owned()),
            palette_index: 42,
            font_size_index: 17,
            text_position: TextPosition::Bottom,
            icon: Icon::MapPin,
            icon_position: IconPosition::TopLeft,
            qr_image: Some(BitmapRef::Session("abc123".to_owned())),
        },
    ];
    for c in configs {
        assert_eq!(decode(&encode(&c)), c);
    }
}

#[test]
fn missing_optionals_take_defaults() {
    let c = decode(&map(&[
        ("location", "x"),
        ("theme", "modern"),
        ("text", "t"),
    ]));
    assert_eq!(c.palette_index, 0);
    assert_eq!(c.font_size_index, 3);
    assert_eq!(c.text_position, TextPosition::Top);
    assert_eq!(c.icon, Icon::None);
    assert_eq!(c.icon_position, IconPosition::BottomRight);
}

#[test]
fn malformed_optionals_take_defaults() {
    let c = decode(&map(&[
        ("paletteIndex", "-1"),
        ("fontSize", "2.5"),
        ("textPosition", "middle"),
        ("icon", "Rocket"),
        ("iconPosition", "nowhere"),
        ("qrcode", "not-a-data-uri"),
    ]));
    assert_eq!(c.palette_index, 0);
    assert_eq!(c.font_size_index, 3);
    assert_eq!(c.text_position, TextPosition::Top);
    assert_eq!(c.icon, Icon::None);
    assert_eq!(c.icon_position, IconPosition::BottomRight);
    assert_eq!(c.qr_image, None);

    let c = decode(&map(&[("paletteIndex", " 1"), ("fontSize", "")]));
    assert_eq!(c.palette_index, 0);
    assert_eq!(c.font_size_index, 3);
}

#[test]
fn missing_required_fields_still_decode() {
    let c = decode(&map(&[("theme", "pastel"), ("text", "hi")]));
    assert_eq!(c.location, None);
    assert_eq!(c.missing_required(), vec!["location"]);
}

#[test]
fn presentation_encoding_omits_content() {
    let c = Configuration {
        location: Some("x".to_owned()),
        theme: Some("pastel".to_owned()),
        text: Some("t".to_owned()),
        palette_index: 1,
        icon: Icon::Coffee,
        qr_image: Some(BitmapRef::Session("tok".to_owned())),
        ..Configuration::default()
    };
    let m = encode_presentation(&c);
    let keys: Vec<&str> = m.keys().map(String::as_str).collect();
    let mut expected = PRESENTATION_KEYS.to_vec();
    expected.sort_unstable();
    assert_eq!(keys, expected);
    assert_eq!(m["icon"], "Coffee");
    assert_eq!(m["paletteIndex"], "1");
}

#[test]
fn empty_session_token_is_absent() {
    assert_eq!(decode_bitmap_ref("session:"), None);
    assert_eq!(
        decode_bitmap_ref("session:k1"),
        Some(BitmapRef::Session("k1".to_owned()))
    );
}
