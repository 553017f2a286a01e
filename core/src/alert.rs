//! Alert records and the bounded alert store.
//!
//! RULE: The store is newest-first. Insertion is always at the front;
//! when the cap is exceeded the oldest (tail) record is evicted. The
//! only mutation after creation is the one-way "mark handled" flag.

use crate::types::{AlertId, RiskScore, TimestampMs};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Risk scores strictly above this value auto-block at creation.
pub const AUTO_BLOCK_THRESHOLD: RiskScore = 85;

/// Closed category set. The order here is the bar-chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertCategory {
    Payment,
    Account,
    Chargeback,
    Velocity,
    Other,
}

impl AlertCategory {
    pub const ALL: [AlertCategory; 5] = [
        AlertCategory::Payment,
        AlertCategory::Account,
        AlertCategory::Chargeback,
        AlertCategory::Velocity,
        AlertCategory::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Payment => "Payment",
            Self::Account => "Account",
            Self::Chargeback => "Chargeback",
            Self::Velocity => "Velocity",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// True iff a score is high enough to auto-block (strictly greater).
pub fn auto_blocks(risk: RiskScore) -> bool {
    risk > AUTO_BLOCK_THRESHOLD
}

/// A single flagged event requiring operator attention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id:           AlertId,
    pub time:         TimestampMs,
    pub category:     AlertCategory,
    pub risk:         RiskScore,
    pub entity:       String,
    pub handled:      bool,
    pub auto_blocked: bool,
}

/// Bounded, newest-first alert feed.
pub struct AlertStore {
    alerts:   VecDeque<Alert>,
    capacity: usize,
}

impl AlertStore {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            alerts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front; returns the evicted record when over cap.
    pub fn insert(&mut self, alert: Alert) -> Option<Alert> {
        self.alerts.push_front(alert);
        if self.alerts.len() > self.capacity {
            self.alerts.pop_back()
        } else {
            None
        }
    }

    /// One-way, idempotent handled flag. A miss on a no-longer-retained
    /// id is a silent no-op. Returns whether a record changed state.
    pub fn mark_handled(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(a) if !a.handled => {
                a.handled = true;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Newest-first iteration (feed order).
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    /// Oldest-first iteration (insertion order, for export).
    pub fn iter_chronological(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().rev()
    }

    pub fn newest(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn oldest(&self) -> Option<&Alert> {
        self.alerts.back()
    }

    /// Per-category counts over the retained window, in bar-chart order.
    pub fn category_counts(&self) -> [(AlertCategory, usize); 5] {
        AlertCategory::ALL.map(|cat| {
            let n = self.alerts.iter().filter(|a| a.category == cat).count();
            (cat, n)
        })
    }

    /// Auto-blocked records over the retained window (not time-windowed).
    pub fn blocked_count(&self) -> usize {
        self.alerts.iter().filter(|a| a.auto_blocked).count()
    }

    /// Records not yet marked handled.
    pub fn active_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.handled).count()
    }

    /// Records created at or after `cutoff_ms`.
    pub fn count_since(&self, cutoff_ms: TimestampMs) -> usize {
        self.alerts.iter().filter(|a| a.time >= cutoff_ms).count()
    }
}
