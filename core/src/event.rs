//! Wire messages and engine-emitted events.
//!
//! Inbound live-channel messages are modelled with explicit optional
//! fields and documented defaults — no ad hoc fallback chains. Engine
//! events are the runner's observation feed; they are never persisted.

use crate::alert::AlertCategory;
use crate::types::{AlertId, NoteId, RiskScore, TimestampMs};
use serde::{Deserialize, Serialize};

/// Default category when an inbound payload omits `type`.
pub const DEFAULT_CATEGORY: AlertCategory = AlertCategory::Other;
/// Default risk when an inbound payload omits `risk`.
pub const DEFAULT_RISK: RiskScore = 30;
/// Default entity when an inbound payload omits `entity`.
pub const DEFAULT_ENTITY: &str = "unknown";

/// A message received on the live channel:
/// `{"type": "event", "payload": {...}}`.
///
/// A message whose payload is wholly absent is dropped — defaults are
/// substituted per field, never for a missing payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    Event {
        #[serde(default)]
        payload: Option<EventPayload>,
    },
}

/// The event payload, every field optional. Field names match the wire
/// format of the upstream feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "type", default)]
    pub category: Option<AlertCategory>,
    #[serde(default)]
    pub risk: Option<RiskScore>,
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(rename = "autoBlocked", default)]
    pub auto_blocked: Option<bool>,
}

/// Everything the engine reports back to its driver.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MonitorEvent {
    AlertRaised {
        id: AlertId,
        category: AlertCategory,
        risk: RiskScore,
        entity: String,
        auto_blocked: bool,
    },
    RiskPointRecorded {
        label: String,
        value: RiskScore,
    },
    AlertHandled {
        id: AlertId,
    },
    InvestigationOpened {
        note_id: NoteId,
        entity: String,
        opened_at: TimestampMs,
    },
    InvestigationCompleted {
        note_id: NoteId,
    },
    InvestigationEscalated {
        note_id: NoteId,
    },
    AlertsExported {
        path: String,
        rows: usize,
    },
}
