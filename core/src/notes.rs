//! Operator note board — suggested next steps and investigations.
//!
//! Notes are render-only bookkeeping: prepend-only, uncapped, never
//! exported, and they retain no durable link back to an alert beyond
//! the entity name shown at creation.

use crate::alert::{Alert, AlertCategory};
use crate::types::{AlertId, NoteId, RiskScore, TimestampMs};
use serde::Serialize;

/// Advice text for a risk band.
pub fn advice_for(risk: RiskScore) -> &'static str {
    if risk >= 80 {
        "Block card/account. Contact customer. Full investigation."
    } else if risk >= 50 {
        "Temporarily hold transaction. Request verification."
    } else {
        "Monitor and flag for review."
    }
}

/// A suggested next step, created automatically for every alert.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestedStep {
    pub alert_id: AlertId,
    pub category: AlertCategory,
    pub risk:     RiskScore,
    pub entity:   String,
    pub time:     TimestampMs,
    pub advice:   &'static str,
    /// Set when the matching alert is marked handled.
    pub dimmed:   bool,
}

/// A free-form record of manual follow-up on an entity.
///
/// `complete` and `escalated` are independent visual flags, not a
/// single state enum: escalating after completing (or vice versa)
/// simply applies both. Each flag is set-once idempotent.
#[derive(Debug, Clone, Serialize)]
pub struct Investigation {
    pub id:        NoteId,
    pub entity:    String,
    pub opened_at: TimestampMs,
    pub complete:  bool,
    pub escalated: bool,
}

/// Both note lists, newest-first.
#[derive(Default)]
pub struct NoteBoard {
    steps:          Vec<SuggestedStep>,
    investigations: Vec<Investigation>,
}

impl NoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a suggested step for a freshly ingested alert.
    pub fn push_step(&mut self, alert: &Alert) {
        self.steps.insert(
            0,
            SuggestedStep {
                alert_id: alert.id.clone(),
                category: alert.category,
                risk:     alert.risk,
                entity:   alert.entity.clone(),
                time:     alert.time,
                advice:   advice_for(alert.risk),
                dimmed:   false,
            },
        );
    }

    /// Dim the step belonging to a handled alert. Miss is a no-op.
    pub fn dim_step(&mut self, alert_id: &str) {
        if let Some(step) = self.steps.iter_mut().find(|s| s.alert_id == alert_id) {
            step.dimmed = true;
        }
    }

    /// Prepend a new investigation note for an entity.
    pub fn open_investigation(
        &mut self,
        id: NoteId,
        entity: String,
        opened_at: TimestampMs,
    ) -> &Investigation {
        self.investigations.insert(
            0,
            Investigation {
                id,
                entity,
                opened_at,
                complete: false,
                escalated: false,
            },
        );
        &self.investigations[0]
    }

    /// Flag an investigation complete. Returns false on miss or if the
    /// flag was already set.
    pub fn complete_investigation(&mut self, note_id: &str) -> bool {
        match self.investigations.iter_mut().find(|n| n.id == note_id) {
            Some(n) if !n.complete => {
                n.complete = true;
                true
            }
            _ => false,
        }
    }

    /// Flag an investigation escalated. Same no-op rules as completion.
    pub fn escalate_investigation(&mut self, note_id: &str) -> bool {
        match self.investigations.iter_mut().find(|n| n.id == note_id) {
            Some(n) if !n.escalated => {
                n.escalated = true;
                true
            }
            _ => false,
        }
    }

    pub fn steps(&self) -> &[SuggestedStep] {
        &self.steps
    }

    pub fn investigations(&self) -> &[Investigation] {
        &self.investigations
    }
}
