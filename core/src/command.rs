use crate::types::{AlertId, NoteId};
use serde::{Deserialize, Serialize};

/// All operator-issued commands — the full interactive surface.
///
/// Commands on an id no longer in the capped stores are silent no-ops;
/// the engine degrades rather than interrupting the display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum OperatorCommand {
    /// Force one synthesized alert event through the pipeline.
    SimulateEvent,
    MarkHandled { alert_id: AlertId },
    OpenInvestigation { alert_id: AlertId },
    CompleteInvestigation { note_id: NoteId },
    EscalateInvestigation { note_id: NoteId },
    /// Defaults to `corepay-alerts.csv` in the working directory.
    ExportAlerts { path: Option<String> },
}
