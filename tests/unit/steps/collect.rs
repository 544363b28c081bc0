use super::*;

fn q(pairs: &[(&str, &str)]) -> QueryMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn fresh_form_defaults() {
    let c = CollectStep::enter(&QueryMap::new());
    assert_eq!(c.location, "");
    assert_eq!(c.theme, "modern");
    assert_eq!(c.text, "");
    assert!(c.carried().is_empty());
}

#[test]
fn empty_fields_block_submit_with_messages() {
    let mut c = CollectStep::enter(&QueryMap::new());
    c.theme = String::new();
    let err = c.submit().unwrap_err();
    assert!(matches!(err, QrcleError::Validation(_)));
    let messages: Vec<&str> = c.errors().iter().map(|e| e.message).collect();
    assert_eq!(
        messages,
        [MSG_MISSING_LOCATION, MSG_MISSING_THEME, MSG_MISSING_TEXT]
    );
}

#[test]
fn whitespace_only_content_is_accepted() {
    let mut c = CollectStep::enter(&QueryMap::new());
    c.location = " ".to_owned();
    c.text = "   ".to_owned();
    assert!(c.validate().is_empty());
    let url = c.submit().unwrap();
    assert_eq!(url.query["text"], "   ");

    // Customize treats the same values as present.
    let config = crate::config::codec::decode(&url.query);
    assert!(config.missing_required().is_empty());
}

#[test]
fn submit_targets_customize_with_content() {
    let mut c = CollectStep::enter(&QueryMap::new());
    c.location = "https://example.com".to_owned();
    c.theme = "pastel".to_owned();
    c.text = "Hello".to_owned();
    let url = c.submit().unwrap();
    assert_eq!(url.step, Step::Customize);
    assert_eq!(
        url.query,
        q(&[
            ("location", "https://example.com"),
            ("theme", "pastel"),
            ("text", "Hello"),
        ])
    );
    assert!(c.errors().is_empty());
}

#[test]
fn carried_presentation_params_are_forwarded() {
    let mut c = CollectStep::enter(&q(&[
        ("textPosition", "left"),
        ("icon", "Heart"),
        ("qrcode", "data:image/png;base64,AAAA"),
    ]));
    c.location = "x".to_owned();
    c.text = "y".to_owned();
    let url = c.submit().unwrap();
    assert_eq!(url.query["textPosition"], "left");
    assert_eq!(url.query["icon"], "Heart");
    assert!(!url.query.contains_key("qrcode"));
}
