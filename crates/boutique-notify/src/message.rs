//! Toast message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How a toast is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Parse a severity, falling back to `Info` for unknown values.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" | "warn" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// Toast identifier. Ids increase in generation order and are never reused
/// by a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(pub(crate) u64);

impl ToastId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the caller asks to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub severity: Severity,
    pub text: String,
    /// `None` uses the queue's default duration.
    pub duration: Option<Duration>,
    pub(crate) sticky: bool,
}

impl ToastRequest {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            duration: None,
            sticky: false,
        }
    }

    /// Show for `duration`. A zero duration makes the toast sticky.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self.sticky = duration.is_zero();
        self
    }

    pub fn with_duration_ms(self, millis: u64) -> Self {
        self.with_duration(Duration::from_millis(millis))
    }

    /// Never expire; the toast stays until dismissed or evicted.
    pub fn sticky(mut self) -> Self {
        self.duration = None;
        self.sticky = true;
        self
    }
}

/// A toast on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastMessage {
    pub id: ToastId,
    pub severity: Severity,
    pub text: String,
    /// Time on screen; `None` for sticky toasts.
    pub duration: Option<Duration>,
    pub created_at: DateTime<Utc>,
}

impl ToastMessage {
    pub fn is_sticky(&self) -> bool {
        self.duration.is_none()
    }

    /// Wall-clock time at which the toast expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let duration = chrono::Duration::from_std(self.duration?).ok()?;
        self.created_at.checked_add_signed(duration)
    }
}
