//! Flat query-map codec for [`Configuration`].
//!
//! Integers are base-10, enums are literal tags and the bitmap is a data URI (or a
//! `session:<token>` reference). Decoding never fails: required fields may come back
//! absent and optional fields fall back to their defaults.

use std::collections::BTreeMap;

use crate::{
    assets::{icons::Icon, payload::ImagePayload},
    config::model::{
        BitmapRef, Configuration, DEFAULT_FONT_SIZE_INDEX, DEFAULT_PALETTE_INDEX, IconPosition,
        TextPosition,
    },
};

/// String-keyed query parameters.
pub type QueryMap = BTreeMap<String, String>;

pub const KEY_LOCATION: &str = "location";
pub const KEY_THEME: &str = "theme";
pub const KEY_TEXT: &str = "text";
pub const KEY_TEXT_POSITION: &str = "textPosition";
pub const KEY_PALETTE_INDEX: &str = "paletteIndex";
pub const KEY_FONT_SIZE: &str = "fontSize";
pub const KEY_ICON: &str = "icon";
pub const KEY_ICON_POSITION: &str = "iconPosition";
pub const KEY_QRCODE: &str = "qrcode";

/// Every key in canonical URL order.
pub const CANONICAL_KEYS: [&str; 9] = [
    KEY_LOCATION,
    KEY_THEME,
    KEY_TEXT,
    KEY_TEXT_POSITION,
    KEY_PALETTE_INDEX,
    KEY_FONT_SIZE,
    KEY_ICON,
    KEY_ICON_POSITION,
    KEY_QRCODE,
];

/// Keys that survive "start over".
pub const PRESENTATION_KEYS: [&str; 5] = [
    KEY_TEXT_POSITION,
    KEY_PALETTE_INDEX,
    KEY_FONT_SIZE,
    KEY_ICON,
    KEY_ICON_POSITION,
];

const SESSION_PREFIX: &str = "session:";

/// Encode every present field.
pub fn encode(config: &Configuration) -> QueryMap {
    let mut map = encode_presentation(config);
    for (key, value) in [
        (KEY_LOCATION, &config.location),
        (KEY_THEME, &config.theme),
        (KEY_TEXT, &config.text),
    ] {
        if let Some(v) = value {
            map.insert(key.to_owned(), v.clone());
        }
    }
    if let Some(bitmap) = &config.qr_image {
        map.insert(KEY_QRCODE.to_owned(), encode_bitmap_ref(bitmap));
    }
    map
}

/// Encode only the presentation fields.
pub fn encode_presentation(config: &Configuration) -> QueryMap {
    let mut map = QueryMap::new();
    map.insert(
        KEY_TEXT_POSITION.to_owned(),
        config.text_position.as_str().to_owned(),
    );
    map.insert(
        KEY_PALETTE_INDEX.to_owned(),
        config.palette_index.to_string(),
    );
    map.insert(KEY_FONT_SIZE.to_owned(), config.font_size_index.to_string());
    map.insert(KEY_ICON.to_owned(), config.icon.name().to_owned());
    map.insert(
        KEY_ICON_POSITION.to_owned(),
        config.icon_position.as_str().to_owned(),
    );
    map
}

/// Decode a query map. Unknown keys are ignored.
pub fn decode(map: &QueryMap) -> Configuration {
    let get = |key: &str| map.get(key).map(String::as_str);

    Configuration {
        location: get(KEY_LOCATION).map(str::to_owned),
        theme: get(KEY_THEME).map(str::to_owned),
        text: get(KEY_TEXT).map(str::to_owned),
        palette_index: get(KEY_PALETTE_INDEX)
            .and_then(parse_index)
            .unwrap_or(DEFAULT_PALETTE_INDEX),
        font_size_index: get(KEY_FONT_SIZE)
            .and_then(parse_index)
            .unwrap_or(DEFAULT_FONT_SIZE_INDEX),
        text_position: get(KEY_TEXT_POSITION)
            .and_then(TextPosition::parse)
            .unwrap_or_default(),
        icon: get(KEY_ICON).map(Icon::parse_lenient).unwrap_or_default(),
        icon_position: get(KEY_ICON_POSITION)
            .and_then(IconPosition::parse)
            .unwrap_or_default(),
        qr_image: get(KEY_QRCODE).and_then(decode_bitmap_ref),
    }
}

/// `qrcode` value for a bitmap reference.
pub fn encode_bitmap_ref(bitmap: &BitmapRef) -> String {
    match bitmap {
        BitmapRef::Inline(payload) => payload.to_data_uri(),
        BitmapRef::Session(token) => format!("{SESSION_PREFIX}{token}"),
    }
}

/// Inverse of [`encode_bitmap_ref`]; unparseable values are treated as absent.
pub fn decode_bitmap_ref(value: &str) -> Option<BitmapRef> {
    if let Some(token) = value.strip_prefix(SESSION_PREFIX) {
        return (!token.is_empty()).then(|| BitmapRef::Session(token.to_owned()));
    }
    match ImagePayload::from_data_uri(value) {
        Ok(payload) => Some(BitmapRef::Inline(payload)),
        Err(err) => {
            tracing::debug!(%err, "ignoring unparseable qrcode parameter");
            None
        }
    }
}

fn parse_index(s: &str) -> Option<usize> {
    // Base-10 digits only; signs, whitespace and fractions are malformed.
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/config/codec.rs"]
mod tests;
