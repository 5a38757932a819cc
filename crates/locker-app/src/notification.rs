//! Single-slot transient notice.
//!
//! At most one notice is visible. Raising a new one replaces the old,
//! which also cancels the old one's expiry. Expiry is evaluated against a
//! supplied instant, so no timer thread is involved.

use serde::{Deserialize, Serialize};

use locker_core::{Notice, Timestamp};

/// A raised notice and when it was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// What is being announced.
    pub notice: Notice,
    /// Session time when it was raised.
    pub raised_at: Timestamp,
}

impl Notification {
    /// Display text.
    pub fn message(&self) -> String {
        self.notice.message()
    }
}

/// The slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSlot {
    current: Option<Notification>,
    ttl_secs: i64,
}

impl NotificationSlot {
    /// An empty slot whose notices live `ttl_secs` seconds.
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            current: None,
            ttl_secs,
        }
    }

    /// Show `notice`, replacing whatever was visible.
    pub fn raise(&mut self, notice: Notice, now: Timestamp) {
        self.current = Some(Notification {
            notice,
            raised_at: now,
        });
    }

    /// The notice, if still within its lifetime at `now`.
    pub fn active(&self, now: Timestamp) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now.epoch_secs() - n.raised_at.epoch_secs() < self.ttl_secs)
    }

    /// Drop the notice once expired. Returns whether one was dropped.
    pub fn clear_expired(&mut self, now: Timestamp) -> bool {
        if self.current.is_some() && self.active(now).is_none() {
            self.current = None;
            return true;
        }
        false
    }

    /// Lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}
