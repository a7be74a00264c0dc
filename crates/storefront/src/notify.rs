//! User-visible notification (toast) collection.
//!
//! Derivation functions occasionally surface non-fatal problems to the
//! customer (e.g. a carrier outage). They never render anything themselves;
//! they push a [`Toast`] through the [`Notify`] seam and the route layer
//! ships collected toasts back with the response.

use std::sync::Mutex;

use serde::Serialize;

/// A user-visible notification.
///
/// The `id` is stable per message kind so the client can collapse repeats
/// instead of stacking duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: &'static str,
    pub message: String,
    pub multiline: bool,
}

impl Toast {
    /// Create a single-line toast.
    #[must_use]
    pub fn new(id: &'static str, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
            multiline: false,
        }
    }

    /// Mark the toast as multiline (the message contains line breaks).
    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }
}

/// Sink for user-visible notifications emitted during derivation.
pub trait Notify {
    /// Queue a toast for display.
    fn push(&self, toast: Toast);
}

/// Per-request toast collector, deduplicated by stable id.
#[derive(Debug, Default)]
pub struct ToastBuffer {
    inner: Mutex<Vec<Toast>>,
}

impl ToastBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the collected toasts in emission order.
    #[must_use]
    pub fn into_toasts(self) -> Vec<Toast> {
        self.inner.into_inner().unwrap_or_default()
    }
}

impl Notify for ToastBuffer {
    fn push(&self, toast: Toast) {
        let Ok(mut toasts) = self.inner.lock() else {
            return;
        };
        if toasts.iter().any(|t| t.id == toast.id) {
            return;
        }
        toasts.push(toast);
    }
}
