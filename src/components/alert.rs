//! Transient alert banner.

#[cfg(test)]
#[path = "alert_test.rs"]
mod alert_test;

use crate::state::notification::{NotificationKind, NotificationState};

/// Rendered banner. Each entry of `lines` is one visual line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertView {
    pub lines: Vec<String>,
    pub kind: NotificationKind,
    pub class: &'static str,
    /// Success banners bounce to draw attention.
    pub bounce: bool,
}

impl AlertView {
    /// `None` while the banner is hidden.
    #[must_use]
    pub fn from_state(state: &NotificationState) -> Option<Self> {
        if !state.visible {
            return None;
        }
        Some(Self {
            lines: message_lines(&state.message),
            kind: state.kind,
            class: alert_class(state.kind),
            bounce: state.kind == NotificationKind::Success,
        })
    }
}

/// Split a message on `\n`, keeping blank lines. An empty message has no lines.
#[must_use]
pub fn message_lines(message: &str) -> Vec<String> {
    if message.is_empty() {
        return Vec::new();
    }
    message.split('\n').map(str::to_owned).collect()
}

fn alert_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "alert alert--success",
        NotificationKind::Error => "alert alert--error",
    }
}
