use super::*;

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("qrcle-platform-{tag}-{}", std::process::id()))
}

#[test]
fn save_file_writes_bytes_into_download_dir() {
    let dir = scratch_dir("save");
    let mut p = HeadlessPlatform::new(&dir);
    let image = ImagePayload::png(vec![1, 2, 3]);
    let path = p.save_file("out.png", &image).unwrap();
    assert_eq!(path, dir.join("out.png"));
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_file_rejects_path_separators() {
    let mut p = HeadlessPlatform::new(scratch_dir("reject"));
    let image = ImagePayload::png(vec![0]);
    assert!(p.save_file("../escape.png", &image).is_err());
    assert!(p.save_file("", &image).is_err());
}

#[test]
fn clipboard_and_share_are_unsupported() {
    let mut p = HeadlessPlatform::new(scratch_dir("unsupported"));
    let image = ImagePayload::png(vec![0]);
    assert!(!p.can_share());
    assert!(matches!(
        p.write_clipboard(&image),
        Err(QrcleError::PlatformUnsupported(_))
    ));
    let req = ShareRequest {
        title: "t".to_owned(),
        text: "x".to_owned(),
        file_name: "f.png".to_owned(),
        image,
    };
    assert!(matches!(
        p.share(&req),
        Err(QrcleError::PlatformUnsupported(_))
    ));
}
