//! The monitoring engine — owner of all session state.
//!
//! RULES:
//!   - add_alert() is the only path that creates alert records;
//!     capacity eviction is the only path that removes them.
//!   - Every mutation ends with a full summary recompute.
//!   - Mutations run to completion on the caller's thread. The engine
//!     is single-threaded; a concurrent embedding must wrap it in its
//!     own mutual exclusion.
//!   - All randomness flows through the session DeskRng.

use crate::{
    alert::{auto_blocks, Alert, AlertCategory, AlertStore},
    clock::{TimeSource, WallClock},
    command::OperatorCommand,
    config::MonitorConfig,
    error::MonitorResult,
    event::{InboundMessage, MonitorEvent, DEFAULT_CATEGORY, DEFAULT_ENTITY, DEFAULT_RISK},
    export,
    notes::NoteBoard,
    rng::DeskRng,
    series::{time_label, RiskPoint, RiskSeries},
    snapshot::DashboardSnapshot,
    summary::Summary,
    types::{RiskScore, TimestampMs},
};
use std::path::Path;
use uuid::Uuid;

/// Clamp an arithmetic result into the [0, 100] score range.
fn clamp_score(v: i64) -> RiskScore {
    v.clamp(0, 100) as RiskScore
}

pub struct MonitorEngine {
    config:      MonitorConfig,
    rng:         DeskRng,
    time:        Box<dyn TimeSource>,
    alerts:      AlertStore,
    series:      RiskSeries,
    notes:       NoteBoard,
    summary:     Summary,
    last_update: Option<String>,
    sim_running: bool,
}

impl MonitorEngine {
    /// Build a wall-clock engine. The seed fixes the simulated event
    /// sequence for the whole session.
    pub fn build(config: MonitorConfig, seed: u64) -> Self {
        Self::with_time_source(config, seed, Box::new(WallClock))
    }

    /// Build with an explicit time source (tests pin "now" this way).
    pub fn with_time_source(
        config: MonitorConfig,
        seed: u64,
        time: Box<dyn TimeSource>,
    ) -> Self {
        let alerts = AlertStore::new(config.alert_capacity);
        let series = RiskSeries::new(config.series_capacity);
        Self {
            rng: DeskRng::new(seed),
            time,
            alerts,
            series,
            notes: NoteBoard::new(),
            summary: Summary::empty(),
            last_update: None,
            sim_running: false,
            config,
        }
    }

    fn refresh_summary(&mut self) {
        self.summary = Summary::compute(
            &self.alerts,
            &self.series,
            self.config.score_window,
            self.time.now_ms(),
        );
    }

    // ── Mutation entry points ──────────────────────────────────

    /// The single alert-ingestion entry point: fresh id, current
    /// timestamp, front insert, tail evict past cap, suggested step,
    /// summary recompute.
    pub fn add_alert(
        &mut self,
        category: AlertCategory,
        risk: RiskScore,
        entity: String,
        auto_blocked: bool,
    ) -> MonitorEvent {
        let alert = Alert {
            id: Uuid::new_v4().to_string(),
            time: self.time.now_ms(),
            category,
            risk,
            entity,
            handled: false,
            auto_blocked,
        };
        let event = MonitorEvent::AlertRaised {
            id: alert.id.clone(),
            category,
            risk,
            entity: alert.entity.clone(),
            auto_blocked,
        };
        self.notes.push_step(&alert);
        if let Some(evicted) = self.alerts.insert(alert) {
            log::debug!("alert feed at capacity, evicted {}", evicted.id);
        }
        self.refresh_summary();
        event
    }

    /// Append one score sample. Values are recorded exactly as given —
    /// callers clamp to [0, 100] first.
    pub fn push_risk_point(&mut self, value: RiskScore, ts: TimestampMs) -> MonitorEvent {
        let label = time_label(ts);
        self.series.push(RiskPoint {
            label: label.clone(),
            value,
        });
        self.last_update = Some(label.clone());
        self.refresh_summary();
        MonitorEvent::RiskPointRecorded { label, value }
    }

    /// One-way handled flag. Returns None on a lookup miss or when the
    /// alert was already handled (both are silent no-ops).
    pub fn mark_handled(&mut self, alert_id: &str) -> Option<MonitorEvent> {
        if !self.alerts.mark_handled(alert_id) {
            return None;
        }
        self.notes.dim_step(alert_id);
        self.refresh_summary();
        Some(MonitorEvent::AlertHandled {
            id: alert_id.to_string(),
        })
    }

    /// Open an investigation note for an alert's entity. The note keeps
    /// only the entity name; the alert id is not retained.
    pub fn open_investigation(&mut self, alert_id: &str) -> Option<MonitorEvent> {
        let entity = self.alerts.get(alert_id)?.entity.clone();
        let note_id = Uuid::new_v4().to_string();
        let opened_at = self.time.now_ms();
        self.notes
            .open_investigation(note_id.clone(), entity.clone(), opened_at);
        Some(MonitorEvent::InvestigationOpened {
            note_id,
            entity,
            opened_at,
        })
    }

    pub fn complete_investigation(&mut self, note_id: &str) -> Option<MonitorEvent> {
        self.notes
            .complete_investigation(note_id)
            .then(|| MonitorEvent::InvestigationCompleted {
                note_id: note_id.to_string(),
            })
    }

    pub fn escalate_investigation(&mut self, note_id: &str) -> Option<MonitorEvent> {
        self.notes
            .escalate_investigation(note_id)
            .then(|| MonitorEvent::InvestigationEscalated {
                note_id: note_id.to_string(),
            })
    }

    /// Export the full retained feed (not just the visible slice).
    pub fn export_alerts(&self, path: Option<&str>) -> MonitorResult<MonitorEvent> {
        let path = path.unwrap_or(export::EXPORT_FILE_NAME);
        let rows = export::export_to_file(&self.alerts, Path::new(path))?;
        log::info!("exported {rows} alerts to {path}");
        Ok(MonitorEvent::AlertsExported {
            path: path.to_string(),
            rows,
        })
    }

    // ── Command dispatch ───────────────────────────────────────

    pub fn apply(&mut self, command: OperatorCommand) -> MonitorResult<Vec<MonitorEvent>> {
        let events = match command {
            OperatorCommand::SimulateEvent => self.simulate_event(),
            OperatorCommand::MarkHandled { alert_id } => {
                self.mark_handled(&alert_id).into_iter().collect()
            }
            OperatorCommand::OpenInvestigation { alert_id } => {
                self.open_investigation(&alert_id).into_iter().collect()
            }
            OperatorCommand::CompleteInvestigation { note_id } => {
                self.complete_investigation(&note_id).into_iter().collect()
            }
            OperatorCommand::EscalateInvestigation { note_id } => {
                self.escalate_investigation(&note_id).into_iter().collect()
            }
            OperatorCommand::ExportAlerts { path } => {
                vec![self.export_alerts(path.as_deref())?]
            }
        };
        Ok(events)
    }

    // ── Live ingestion ─────────────────────────────────────────

    /// Map one inbound live message into store mutations, substituting
    /// per-field defaults. A message with no payload at all is dropped.
    pub fn apply_inbound(&mut self, message: InboundMessage) -> Vec<MonitorEvent> {
        let InboundMessage::Event { payload } = message;
        let Some(p) = payload else {
            log::debug!("dropping inbound message with no payload");
            return Vec::new();
        };

        let category = p.category.unwrap_or(DEFAULT_CATEGORY);
        let risk = p.risk.unwrap_or(DEFAULT_RISK);
        let entity = p.entity.unwrap_or_else(|| DEFAULT_ENTITY.to_string());
        let auto_blocked = p.auto_blocked.unwrap_or(false);

        let mut events = vec![self.add_alert(category, risk, entity, auto_blocked)];

        // The score sample follows the reported risk; without one, a
        // mid-band draw keeps the chart moving.
        let value = match p.risk {
            Some(r) => r.min(100),
            None => self.rng.int_in_range(5, 80) as RiskScore,
        };
        let now = self.time.now_ms();
        events.push(self.push_risk_point(value, now));
        events
    }

    // ── Simulator ──────────────────────────────────────────────

    /// Start the simulated source. Ticks are driven by the caller.
    pub fn start_simulator(&mut self) {
        self.sim_running = true;
    }

    /// Stop the simulated source; pending ticks become no-ops.
    pub fn stop_simulator(&mut self) {
        self.sim_running = false;
    }

    pub fn simulator_running(&self) -> bool {
        self.sim_running
    }

    /// One simulator interval: 55% a full synthesized alert event,
    /// otherwise a drift sample around the current overall score.
    pub fn simulator_tick(&mut self) -> Vec<MonitorEvent> {
        if !self.sim_running {
            return Vec::new();
        }
        if self.rng.chance(0.55) {
            self.simulate_event()
        } else {
            let drift = self.rng.int_in_range(-6, 6);
            let value = clamp_score(self.summary.overall + drift);
            let now = self.time.now_ms();
            vec![self.push_risk_point(value, now)]
        }
    }

    /// Synthesize one full random alert event and its derived score
    /// sample. Also the `simulate_event` operator command.
    pub fn simulate_event(&mut self) -> Vec<MonitorEvent> {
        let category = AlertCategory::ALL[self.rng.next_u64_below(5) as usize];
        let risk = self.rng.int_in_range(5, 95) as RiskScore;
        let entity = format!("user_{}", self.rng.int_in_range(1000, 9999));
        let auto_blocked = auto_blocks(risk);

        let mut events = vec![self.add_alert(category, risk, entity, auto_blocked)];

        let noise = self.rng.int_in_range(-6, 6);
        let value = clamp_score((risk as f64 * 0.4).round() as i64 + noise);
        let now = self.time.now_ms();
        events.push(self.push_risk_point(value, now));
        events
    }

    /// Seed a fresh simulated session: 18 historical score samples at
    /// 5-minute spacing, then two starter alerts.
    pub fn seed_demo_data(&mut self) -> Vec<MonitorEvent> {
        let now = self.time.now_ms();
        let mut events = Vec::with_capacity(20);
        for i in 0..18i64 {
            let base = 20 + ((i as f64 / 3.0).sin() * 12.0).round() as i64;
            let value = clamp_score(base + self.rng.int_in_range(-3, 3));
            let ts = now - (18 - i) * 5 * 60 * 1000;
            events.push(self.push_risk_point(value, ts));
        }
        events.push(self.add_alert(AlertCategory::Payment, 72, "user_8791".into(), true));
        events.push(self.add_alert(AlertCategory::Account, 46, "user_2371".into(), false));
        events
    }

    // ── Read access ────────────────────────────────────────────

    pub fn alerts(&self) -> &AlertStore {
        &self.alerts
    }

    pub fn series(&self) -> &RiskSeries {
        &self.series
    }

    pub fn notes(&self) -> &NoteBoard {
        &self.notes
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn last_update(&self) -> Option<&str> {
        self.last_update.as_deref()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::capture(self)
    }
}
