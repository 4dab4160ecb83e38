//! User-facing notifications.
//!
//! Notifications are fire-and-forget: the store hands a [`Toast`] to its
//! [`Notifier`] and never looks at the outcome.

use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    /// Create an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    /// Create a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    /// Create an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

impl<F> Notifier for F
where
    F: Fn(Toast) + Send + Sync,
{
    fn notify(&self, toast: Toast) {
        self(toast)
    }
}

/// Writes toasts to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => tracing::warn!(target: "rocket_store::toast", "{}", toast.message),
            _ => tracing::info!(target: "rocket_store::toast", "{}", toast.message),
        }
    }
}

/// Keeps toasts in memory until drained.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all pending toasts.
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut t| std::mem::take(&mut *t))
            .unwrap_or_default()
    }

    /// Copy of the pending toasts.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Number of pending toasts.
    pub fn len(&self) -> usize {
        self.toasts.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_memory_notifier_drain() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Toast::error("boom"));
        notifier.notify(Toast::info("hi"));

        assert_eq!(notifier.len(), 2);
        let drained = notifier.drain();
        assert_eq!(drained[0], Toast::error("boom"));
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_closure_notifier() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |toast: Toast| seen.lock().unwrap().push(toast.message)
        };
        sink.notify(Toast::success("added"));
        assert_eq!(*seen.lock().unwrap(), vec!["added".to_string()]);
    }

    #[test]
    fn test_toast_serialize() {
        let json = serde_json::to_string(&Toast::error("x")).unwrap();
        assert_eq!(json, r#"{"level":"error","message":"x"}"#);
    }
}
