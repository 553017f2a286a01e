//! The risk-score series — recent aggregate score history.
//!
//! RULE: The series is oldest-first: points append at the tail and the
//! head is evicted past the cap (the reverse of the alert store's
//! policy; the two caps are enforced independently). Values are stored
//! exactly as given — callers clamp to [0, 100] before pushing.

use crate::types::{RiskScore, TimestampMs};
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One sample of the aggregate risk score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPoint {
    /// Human-readable sample time, `HH:MM:SS` in UTC.
    pub label: String,
    pub value: RiskScore,
}

/// Format a timestamp as a series label.
pub fn time_label(ts: TimestampMs) -> String {
    match Utc.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "??:??:??".to_string(),
    }
}

/// Bounded, oldest-first score history.
pub struct RiskSeries {
    points:   VecDeque<RiskPoint>,
    capacity: usize,
}

impl RiskSeries {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append at the tail; returns the evicted point when over cap.
    pub fn push(&mut self, point: RiskPoint) -> Option<RiskPoint> {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest-first iteration.
    pub fn iter(&self) -> impl Iterator<Item = &RiskPoint> {
        self.points.iter()
    }

    /// Raw values, oldest first.
    pub fn values(&self) -> impl Iterator<Item = RiskScore> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// The most recent point.
    pub fn last(&self) -> Option<&RiskPoint> {
        self.points.back()
    }

    /// The value `n` points back from the tail (0 = most recent).
    pub fn value_from_end(&self, n: usize) -> Option<RiskScore> {
        if n < self.points.len() {
            Some(self.points[self.points.len() - 1 - n].value)
        } else {
            None
        }
    }
}
