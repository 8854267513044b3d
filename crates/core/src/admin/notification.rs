use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::CoreError;

/// How long a notification stays up before it is dismissed automatically.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message describing the outcome of a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    /// Error notification for a failed action, worded for the end user.
    pub fn for_error(action: &str, err: &CoreError) -> Self {
        let message = match err {
            CoreError::Validation(_) => "Please fill in all required fields".to_string(),
            CoreError::InvalidImage(_) => {
                "Image must be a JPEG, PNG or GIF no larger than 5 MB".to_string()
            }
            CoreError::CompressionFailed(_) => {
                "Could not process the image. Try again or remove it".to_string()
            }
            CoreError::StoreUnavailable(_) => {
                format!("Could not {action}: the portfolio service is unreachable. Please try again")
            }
            CoreError::NotFound { .. } => {
                format!("Could not {action}: the item no longer exists")
            }
            CoreError::Internal(_) => format!("Could not {action}"),
        };
        Self::error(message)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTIFICATION_TTL
    }
}
