use std::sync::Arc;
use std::time::Duration;

use crate::domain::clock::{Clock, TimestampMs};

pub const DEFAULT_ALERT_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub level: AlertLevel,
    pub expires_at: TimestampMs,
}

/// Dismissible notifications that expire on their own after a fixed lifetime.
pub struct AlertBoard {
    clock: Arc<dyn Clock>,
    lifetime: Duration,
    alerts: Vec<Alert>,
    next_id: u64,
}

impl AlertBoard {
    pub fn new(clock: Arc<dyn Clock>, lifetime: Duration) -> Self {
        Self {
            clock,
            lifetime,
            alerts: Vec::new(),
            next_id: 1,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, level: AlertLevel) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let alert = Alert {
            id,
            message: message.into(),
            level,
            expires_at: self.clock.now().after(self.lifetime),
        };
        tracing::debug!(
            alert_id = id,
            level = level.as_str(),
            message = %alert.message,
            "alert shown"
        );
        self.alerts.push(alert);

        id
    }

    /// Alerts still on screen, oldest first. Expired ones are dropped.
    pub fn active(&mut self) -> &[Alert] {
        self.prune_expired();
        &self.alerts
    }

    fn prune_expired(&mut self) {
        let now = self.clock.now();
        self.alerts.retain(|alert| alert.expires_at > now);
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    /// Most recent alert still within its lifetime.
    pub fn latest(&mut self) -> Option<&Alert> {
        self.prune_expired();
        self.alerts.last()
    }
}
