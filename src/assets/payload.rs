use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{QrcleError, QrcleResult};

const BASE64: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// MIME type of every image this crate produces.
pub const PNG_MIME: &str = "image/png";

/// Encoded image bytes with their MIME type.
///
/// This is the opaque payload exchanged with the QR encoder, the rasterizer and the
/// platform. Cloning is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime: String,
    bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime", &self.mime)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl ImagePayload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes: Arc::new(bytes),
        }
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(PNG_MIME, bytes)
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:<mime>;base64,<payload>`.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(self.bytes.as_slice()))
    }

    /// Inverse of [`ImagePayload::to_data_uri`]. Only base64 data URIs are accepted.
    ///
    /// Base64 never contains `,`, so the payload starts after the last one and the media
    /// type may contain commas of its own.
    pub fn from_data_uri(uri: &str) -> QrcleResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| QrcleError::serde("image payload must be a data URI"))?;
        let (meta, data) = rest
            .rsplit_once(',')
            .ok_or_else(|| QrcleError::serde("data URI has no payload separator"))?;
        let mime = meta
            .strip_suffix(";base64")
            .ok_or_else(|| QrcleError::serde("data URI must be base64 encoded"))?;
        if mime.is_empty() {
            return Err(QrcleError::serde("data URI has an empty media type"));
        }
        let bytes = BASE64
            .decode(data)
            .map_err(|e| QrcleError::serde(format!("invalid base64 in data URI: {e}")))?;
        Ok(Self::new(mime, bytes))
    }

    /// Decode into straight-alpha RGBA8.
    pub fn decode_rgba8(&self) -> QrcleResult<image::RgbaImage> {
        let img = image::load_from_memory(&self.bytes).context("decode image from memory")?;
        Ok(img.to_rgba8())
    }

    /// Pixel dimensions of the encoded image.
    pub fn dimensions(&self) -> QrcleResult<(u32, u32)> {
        Ok(self.decode_rgba8()?.dimensions())
    }
}

/// Encode straight-alpha RGBA8 pixels as a PNG payload.
pub fn encode_png(img: &image::RgbaImage) -> QrcleResult<ImagePayload> {
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .context("encode png")?;
    Ok(ImagePayload::png(buf.into_inner()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/payload.rs"]
mod tests;
