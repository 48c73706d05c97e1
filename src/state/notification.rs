//! Transient notification banner with auto-hide.
//!
//! DESIGN
//! ======
//! One banner at a time. `show` replaces the banner and schedules a hide task
//! on the tokio runtime; the previous hide task is aborted first. Each banner
//! also carries a generation number and the hide task only clears the banner
//! it was scheduled for, so a timer that already fired cannot hide a newer
//! banner. Dropping the `Notifier` aborts the pending hide.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::DEFAULT_NOTIFY_HIDE_MS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

/// What the banner currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub visible: bool,
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Default)]
struct Banner {
    state: NotificationState,
    generation: u64,
}

pub struct Notifier {
    banner: Arc<Mutex<Banner>>,
    hide_after: Duration,
    hide_task: Option<JoinHandle<()>>,
}

impl Notifier {
    #[must_use]
    pub fn new(hide_after: Duration) -> Self {
        Self { banner: Arc::new(Mutex::new(Banner::default())), hide_after, hide_task: None }
    }

    #[must_use]
    pub fn hide_after(&self) -> Duration {
        self.hide_after
    }

    /// Snapshot of the current banner.
    #[must_use]
    pub fn state(&self) -> NotificationState {
        lock(&self.banner).state.clone()
    }

    /// Replace the banner and restart the auto-hide timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) {
        if let Some(task) = self.hide_task.take() {
            task.abort();
        }

        let generation = {
            let mut banner = lock(&self.banner);
            banner.generation = banner.generation.wrapping_add(1);
            banner.state = NotificationState { visible: true, message: message.into(), kind };
            banner.generation
        };
        debug!(generation, ?kind, "notification shown");

        let banner = Arc::clone(&self.banner);
        let hide_after = self.hide_after;
        self.hide_task = Some(tokio::spawn(async move {
            tokio::time::sleep(hide_after).await;
            let mut banner = lock(&banner);
            if banner.generation == generation {
                banner.state.visible = false;
                debug!(generation, "notification hidden");
            }
        }));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_NOTIFY_HIDE_MS))
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(task) = self.hide_task.take() {
            task.abort();
        }
    }
}

fn lock(banner: &Mutex<Banner>) -> MutexGuard<'_, Banner> {
    banner.lock().unwrap_or_else(PoisonError::into_inner)
}
