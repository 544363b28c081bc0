//! Host integrations used by the Export step.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::payload::ImagePayload,
    foundation::error::{QrcleError, QrcleResult},
};

/// Payload for a native share sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub file_name: String,
    pub image: ImagePayload,
}

/// File save, clipboard and native share, each feature-detected by its result.
///
/// Implementations report missing capabilities as [`QrcleError::PlatformUnsupported`] and a
/// dismissed dialog as [`QrcleError::UserCancelled`].
pub trait Platform {
    /// Persist `image` under `file_name`; returns where it went.
    fn save_file(&mut self, file_name: &str, image: &ImagePayload) -> QrcleResult<PathBuf>;

    fn write_clipboard(&mut self, image: &ImagePayload) -> QrcleResult<()>;

    /// Whether [`Platform::share`] can succeed at all.
    fn can_share(&self) -> bool;

    fn share(&mut self, request: &ShareRequest) -> QrcleResult<()>;
}

/// Platform for terminals and tests: downloads land in a directory, nothing else exists.
#[derive(Clone, Debug)]
pub struct HeadlessPlatform {
    download_dir: PathBuf,
}

impl HeadlessPlatform {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }
}

impl Platform for HeadlessPlatform {
    fn save_file(&mut self, file_name: &str, image: &ImagePayload) -> QrcleResult<PathBuf> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(QrcleError::validation(format!(
                "invalid download file name \"{file_name}\""
            )));
        }
        std::fs::create_dir_all(&self.download_dir)
            .with_context(|| format!("create {}", self.download_dir.display()))?;
        let path = self.download_dir.join(file_name);
        std::fs::write(&path, image.bytes())
            .with_context(|| format!("write {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved download");
        Ok(path)
    }

    fn write_clipboard(&mut self, _image: &ImagePayload) -> QrcleResult<()> {
        Err(QrcleError::unsupported("no clipboard in headless mode"))
    }

    fn can_share(&self) -> bool {
        false
    }

    fn share(&mut self, _request: &ShareRequest) -> QrcleResult<()> {
        Err(QrcleError::unsupported("no share sheet in headless mode"))
    }
}

#[cfg(test)]
#[path = "../tests/unit/platform.rs"]
mod tests;
