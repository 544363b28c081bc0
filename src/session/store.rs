use std::collections::HashMap;

use crate::{
    assets::payload::ImagePayload,
    config::{
        codec,
        model::{BitmapRef, Configuration},
        url_state::{Step, StepUrl},
    },
    foundation::error::{QrcleError, QrcleResult},
    foundation::math::Fnv1a64,
};

/// Session-scoped bitmaps addressed by short tokens, for URLs that would be too long with
/// the bitmap inline.
#[derive(Clone, Debug, Default)]
pub struct BitmapStore {
    entries: HashMap<String, ImagePayload>,
}

impl BitmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `payload` and return its token. Identical payloads share a token.
    pub fn insert(&mut self, payload: ImagePayload) -> String {
        let mut h = Fnv1a64::new_default();
        h.write_str(payload.mime());
        h.write_bytes(payload.bytes());
        let token = format!("{:016x}", h.finish());
        self.entries.entry(token.clone()).or_insert(payload);
        token
    }

    pub fn get(&self, token: &str) -> Option<&ImagePayload> {
        self.entries.get(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bitmap behind `bitmap`, looking up session tokens.
    pub fn resolve(&self, bitmap: &BitmapRef) -> QrcleResult<ImagePayload> {
        match bitmap {
            BitmapRef::Inline(payload) => Ok(payload.clone()),
            BitmapRef::Session(token) => self.get(token).cloned().ok_or_else(|| {
                tracing::warn!(%token, "session bitmap not found");
                QrcleError::incomplete(vec![codec::KEY_QRCODE])
            }),
        }
    }

    /// Export URL for `config` carrying `bitmap`: inline when the URL fits in
    /// `max_url_len`, otherwise through this store.
    pub fn export_url(
        &mut self,
        config: &Configuration,
        bitmap: &ImagePayload,
        max_url_len: usize,
    ) -> StepUrl {
        let mut with_bitmap = config.clone();
        with_bitmap.qr_image = Some(BitmapRef::Inline(bitmap.clone()));
        let inline = StepUrl::new(Step::Export, codec::encode(&with_bitmap));
        let len = inline.format().len();
        if len <= max_url_len {
            return inline;
        }

        let token = self.insert(bitmap.clone());
        tracing::debug!(len, max_url_len, %token, "bitmap moved to session store");
        with_bitmap.qr_image = Some(BitmapRef::Session(token));
        StepUrl::new(Step::Export, codec::encode(&with_bitmap))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/store.rs"]
mod tests;
