// ── Transient notices ──
//
// Outcome messages for the operator ("Property updated successfully").
// Fire-and-forget over a broadcast channel: a send with no receivers is
// dropped, so a store outliving its view never fails on notification.

use std::fmt;

use tokio::sync::broadcast;

use crate::error::CoreError;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Underlying error text, for error notices.
    pub detail: Option<String>,
}

impl Notice {
    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail {
            Some(ref detail) => write!(f, "{}: {detail}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Cloneable sending half of a notice channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Default for Notifier {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl Notifier {
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(Notice {
            level: NoticeLevel::Success,
            message: message.into(),
            detail: None,
        });
    }

    pub fn error(&self, message: impl Into<String>, err: &CoreError) {
        let detail = if err.is_auth_rejected() {
            format!("{err} (session token missing or expired)")
        } else {
            err.to_string()
        };
        self.publish(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
            detail: Some(detail),
        });
    }

    fn publish(&self, notice: Notice) {
        // Err only means nobody is listening.
        let _ = self.tx.send(notice);
    }
}

/// Capitalize the first letter for notice text ("team member" -> "Team member").
pub(crate) fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
