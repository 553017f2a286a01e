//! Session configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Live channel endpoint (`host:port`). When set, the live source
    /// is selected and the simulator never starts.
    pub server_endpoint: Option<String>,
    /// Whether to run the simulator when no live source is available.
    pub simulation_enabled: bool,
    /// Seed the session with demo history and two starter alerts
    /// (simulated sessions only).
    pub seed_demo_data: bool,
    /// Simulator cadence for real-time drivers.
    pub tick_interval_ms: u64,
    pub alert_capacity: usize,
    pub series_capacity: usize,
    /// Number of recent samples in the overall-score window.
    pub score_window: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            server_endpoint: None,
            simulation_enabled: true,
            seed_demo_data: true,
            tick_interval_ms: 4000,
            alert_capacity: 200,
            series_capacity: 200,
            score_window: 48,
        }
    }
}

impl MonitorConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: MonitorConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Config for unit tests: no demo seeding, everything else default.
    pub fn default_test() -> Self {
        Self {
            seed_demo_data: false,
            ..Self::default()
        }
    }
}
