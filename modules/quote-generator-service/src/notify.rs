//! Time-boxed user notifications.

use quote_generator_types::Notification;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

pub struct Notifier {
    ttl: Duration,
    current: Mutex<Option<(Notification, Instant)>>,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: Mutex::new(None),
        }
    }

    /// Replaces whatever notification is showing.
    pub fn notify(&self, message: impl Into<String>) {
        let notification = Notification {
            message: message.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        log::info!("[NOTIFY] {}", notification.message);
        if let Ok(mut current) = self.current.lock() {
            *current = Some((notification, Instant::now()));
        }
    }

    /// The notification, if it has not expired yet.
    pub fn current(&self) -> Option<Notification> {
        let mut current = self.current.lock().ok()?;
        match current.as_ref() {
            Some((n, shown_at)) if shown_at.elapsed() < self.ttl => Some(n.clone()),
            Some(_) => {
                *current = None;
                None
            }
            None => None,
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL)
    }
}
