//! Summary figures — a pure function of the two stores and "now".
//!
//! Recomputed in full after every mutation. No caching, no incremental
//! update: the stores are capped at 200 entries, a full pass is cheap.

use crate::alert::AlertStore;
use crate::series::RiskSeries;
use crate::types::TimestampMs;
use serde::Serialize;
use std::fmt;

/// Rolling 24-hour window, in milliseconds.
pub const DAY_MS: TimestampMs = 24 * 3600 * 1000;

/// Direction of the overall score relative to the previous raw sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up(i64),
    Down(i64),
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up(n) => write!(f, "Up {n}"),
            Trend::Down(n) => write!(f, "Down {n}"),
            Trend::Stable => f.write_str("Stable"),
        }
    }
}

/// All five display figures.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Mean of the most recent `score_window` samples, rounded.
    pub overall:    i64,
    pub trend:      Trend,
    /// Same windowed mean as `overall` — one computation, one window.
    pub avg_24h:    i64,
    /// Alerts created within the last 24 hours.
    pub alerts_24h: usize,
    /// Auto-blocked alerts over the whole retained window.
    pub blocked:    usize,
    /// Alerts not yet marked handled.
    pub active:     usize,
}

/// Mean of the most recent up-to-`window` series values, rounded to the
/// nearest integer. 0 on an empty series.
pub fn overall_score(series: &RiskSeries, window: usize) -> i64 {
    let len = series.len();
    if len == 0 {
        return 0;
    }
    let take = window.min(len);
    let sum: u64 = series.values().skip(len - take).map(u64::from).sum();
    (sum as f64 / take as f64).round() as i64
}

impl Summary {
    pub fn empty() -> Self {
        Self {
            overall:    0,
            trend:      Trend::Stable,
            avg_24h:    0,
            alerts_24h: 0,
            blocked:    0,
            active:     0,
        }
    }

    pub fn compute(
        alerts: &AlertStore,
        series: &RiskSeries,
        score_window: usize,
        now_ms: TimestampMs,
    ) -> Self {
        let overall = overall_score(series, score_window);

        // Compared against the second-most-recent raw sample, not the
        // previous windowed mean.
        let previous = series.value_from_end(1).map(i64::from).unwrap_or(overall);
        let trend = match overall - previous {
            d if d > 0 => Trend::Up(d),
            d if d < 0 => Trend::Down(-d),
            _ => Trend::Stable,
        };

        Self {
            overall,
            trend,
            avg_24h: overall,
            alerts_24h: alerts.count_since(now_ms - DAY_MS),
            blocked: alerts.blocked_count(),
            active: alerts.active_count(),
        }
    }
}
