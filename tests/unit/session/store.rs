use super::*;

fn config() -> Configuration {
    Configuration {
        location: Some("https://example.com".to_owned()),
        theme: Some("modern".to_owned()),
        text: Some("hi".to_owned()),
        ..Configuration::default()
    }
}

fn payload(n: usize) -> ImagePayload {
    ImagePayload::png(vec![7; n])
}

#[test]
fn identical_payloads_share_a_token() {
    let mut s = BitmapStore::new();
    let a = s.insert(payload(10));
    let b = s.insert(payload(10));
    let c = s.insert(payload(11));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 16);
    assert_eq!(s.len(), 2);
}

#[test]
fn small_bitmap_stays_inline() {
    let mut s = BitmapStore::new();
    let url = s.export_url(&config(), &payload(16), 8192);
    assert!(s.is_empty());
    assert!(url.query["qrcode"].starts_with("data:image/png;base64,"));
    assert!(url.format().len() <= 8192);
}

#[test]
fn oversize_bitmap_moves_to_store_and_resolves() {
    let mut s = BitmapStore::new();
    let big = payload(10_000);
    let url = s.export_url(&config(), &big, 8192);
    let value = &url.query["qrcode"];
    assert!(value.starts_with("session:"), "{value}");

    let decoded = codec::decode(&url.query);
    let bitmap = decoded.qr_image.unwrap();
    assert_eq!(s.resolve(&bitmap).unwrap(), big);
}

#[test]
fn unknown_token_is_incomplete() {
    let s = BitmapStore::new();
    let err = s
        .resolve(&BitmapRef::Session("deadbeef".to_owned()))
        .unwrap_err();
    assert!(matches!(
        err,
        QrcleError::ConfigurationIncomplete { ref missing } if missing == &vec!["qrcode"]
    ));
}
