use std::collections::VecDeque;

/// How long a toast stays visible unless dismissed.
pub const TOAST_TTL_MS: u64 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    /// Unix milliseconds after which the toast is no longer shown.
    pub expires_at_ms: u64,
}

/// Transient, dismissible notifications, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>, now_ms: u64) -> u64 {
        self.push(ToastKind::Success, message.into(), now_ms)
    }

    pub fn error(&mut self, message: impl Into<String>, now_ms: u64) -> u64 {
        self.push(ToastKind::Error, message.into(), now_ms)
    }

    fn push(&mut self, kind: ToastKind, message: String, now_ms: u64) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!(id, ?kind, %message, "toast");
        self.toasts.push_back(Toast {
            id,
            kind,
            message,
            expires_at_ms: now_ms.saturating_add(TOAST_TTL_MS),
        });
        id
    }

    /// Returns `false` if `id` was not showing.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drop toasts whose time is up.
    pub fn expire(&mut self, now_ms: u64) {
        self.toasts.retain(|t| t.expires_at_ms > now_ms);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/steps/notify.rs"]
mod tests;
