/// Convenience result type used across QRcle.
pub type QrcleResult<T> = Result<T, QrcleError>;

/// Top-level error taxonomy used by the wizard and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum QrcleError {
    /// One or more required configuration fields are absent after decoding.
    #[error("configuration incomplete: missing {}", .missing.join(", "))]
    ConfigurationIncomplete {
        /// Query keys of the missing fields, in canonical order.
        missing: Vec<&'static str>,
    },

    /// The QR encoder rejected its input.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Rasterization of a composition failed.
    #[error("capture error: {0}")]
    Capture(String),

    /// A platform integration (clipboard, share, file save) is not available.
    #[error("platform unsupported: {0}")]
    PlatformUnsupported(String),

    /// The user dismissed a platform dialog. Never surfaced as a failure.
    #[error("cancelled by user")]
    UserCancelled,

    /// Invalid user-provided data or settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QrcleError {
    /// Build a [`QrcleError::ConfigurationIncomplete`] value.
    pub fn incomplete(missing: Vec<&'static str>) -> Self {
        Self::ConfigurationIncomplete { missing }
    }

    /// Build a [`QrcleError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`QrcleError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`QrcleError::PlatformUnsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::PlatformUnsupported(msg.into())
    }

    /// Build a [`QrcleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QrcleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` when the error is a user cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
