//! Ephemeral notifications.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Warning => "⚠️",
            ToastKind::Info => "🔔",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.message)
    }
}

/// Ordered toasts plus the id counter that numbers them.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: ToastId,
    default_duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::with_default_duration(DEFAULT_DURATION)
    }
}

impl ToastQueue {
    pub fn with_default_duration(default_duration: Duration) -> Self {
        Self { toasts: Vec::new(), next_id: 0, default_duration }
    }

    /// Append a toast and return its id. A zero or missing duration uses the default.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, duration: Option<Duration>) -> ToastId {
        self.next_id += 1;
        let duration = duration.filter(|d| !d.is_zero()).unwrap_or(self.default_duration);
        self.toasts.push(Toast { id: self.next_id, message: message.into(), kind, duration });
        self.next_id
    }

    /// Returns whether a toast was removed; unknown ids are ignored.
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
