//! Dashboard surface tests — snapshots and the operator command set.

use corepay_core::{
    alert::AlertCategory,
    clock::ManualClock,
    command::OperatorCommand,
    config::MonitorConfig,
    engine::MonitorEngine,
    snapshot::VISIBLE_ALERT_ROWS,
};

fn test_engine() -> MonitorEngine {
    MonitorEngine::with_time_source(
        MonitorConfig::default_test(),
        42,
        Box::new(ManualClock::at(1_000_000)),
    )
}

/// The snapshot shows at most the newest 80 alerts; the feed retains
/// the rest for export.
#[test]
fn snapshot_limits_the_visible_slice() {
    let mut engine = test_engine();
    for i in 0..120 {
        engine.add_alert(AlertCategory::Other, 20, format!("e{i}"), false);
    }

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.alerts.len(), VISIBLE_ALERT_ROWS);
    assert_eq!(snapshot.alerts[0].entity, "e119", "visible slice is newest-first");
    assert_eq!(engine.alerts().len(), 120);
}

/// Snapshot figures mirror the summary and the note board.
#[test]
fn snapshot_mirrors_summary_and_notes() {
    let mut engine = test_engine();
    engine.add_alert(AlertCategory::Payment, 72, "user_8791".into(), true);
    engine.push_risk_point(40, 1_000_000);
    engine.push_risk_point(60, 1_001_000);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.overall_score, 50);
    assert_eq!(snapshot.trend, "Up 10");
    assert_eq!(snapshot.blocked_count, 1);
    assert_eq!(snapshot.active_alerts, 1);
    assert_eq!(snapshot.last_update.as_deref(), engine.last_update());
    assert_eq!(snapshot.suggested_steps.len(), 1);
    assert_eq!(snapshot.category_counts[0], ("Payment".to_string(), 1));
    assert_eq!(snapshot.series.len(), 2);
}

/// Commands parse from their wire form and dispatch through apply().
#[test]
fn commands_parse_and_dispatch() {
    let mut engine = test_engine();
    engine.add_alert(AlertCategory::Velocity, 90, "e0".into(), true);
    let id = engine.alerts().newest().unwrap().id.clone();

    let raw = format!(r#"{{"cmd":"mark_handled","alert_id":"{id}"}}"#);
    let command: OperatorCommand = serde_json::from_str(&raw).unwrap();
    let events = engine.apply(command).unwrap();
    assert_eq!(events.len(), 1);
    assert!(engine.alerts().get(&id).unwrap().handled);

    // simulate_event drives the full ingestion pipeline once.
    let command: OperatorCommand = serde_json::from_str(r#"{"cmd":"simulate_event"}"#).unwrap();
    let events = engine.apply(command).unwrap();
    assert_eq!(events.len(), 2, "one alert plus one score sample");
    assert_eq!(engine.alerts().len(), 2);

    // Commands against stale ids produce no events and no errors.
    let command: OperatorCommand =
        serde_json::from_str(r#"{"cmd":"open_investigation","alert_id":"gone"}"#).unwrap();
    assert!(engine.apply(command).unwrap().is_empty());
}
