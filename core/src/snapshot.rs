//! Serializable dashboard view — everything a front end renders.

use crate::alert::Alert;
use crate::engine::MonitorEngine;
use crate::notes::{Investigation, SuggestedStep};
use crate::series::RiskPoint;
use serde::Serialize;

/// The alert table shows only the newest slice of the feed.
pub const VISIBLE_ALERT_ROWS: usize = 80;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub overall_score:   i64,
    /// Rendered trend: "Up N" / "Down N" / "Stable".
    pub trend:           String,
    pub avg_24h:         i64,
    pub alerts_24h:      usize,
    pub blocked_count:   usize,
    pub active_alerts:   usize,
    pub last_update:     Option<String>,
    /// Newest-first visible slice (full feed is export-only).
    pub alerts:          Vec<Alert>,
    /// Category counts in bar-chart order.
    pub category_counts: Vec<(String, usize)>,
    /// Full series, oldest first.
    pub series:          Vec<RiskPoint>,
    pub suggested_steps: Vec<SuggestedStep>,
    pub investigations:  Vec<Investigation>,
}

impl DashboardSnapshot {
    pub fn capture(engine: &MonitorEngine) -> Self {
        let summary = engine.summary();
        Self {
            overall_score: summary.overall,
            trend: summary.trend.to_string(),
            avg_24h: summary.avg_24h,
            alerts_24h: summary.alerts_24h,
            blocked_count: summary.blocked,
            active_alerts: summary.active,
            last_update: engine.last_update().map(str::to_string),
            alerts: engine
                .alerts()
                .iter()
                .take(VISIBLE_ALERT_ROWS)
                .cloned()
                .collect(),
            category_counts: engine
                .alerts()
                .category_counts()
                .iter()
                .map(|(cat, n)| (cat.name().to_string(), *n))
                .collect(),
            series: engine.series().iter().cloned().collect(),
            suggested_steps: engine.notes().steps().to_vec(),
            investigations: engine.notes().investigations().to_vec(),
        }
    }
}
