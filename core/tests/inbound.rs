//! Live-channel ingestion tests — wire parsing, per-field defaults,
//! and the drop rules for bad messages.

use corepay_core::{
    alert::AlertCategory,
    clock::ManualClock,
    config::MonitorConfig,
    engine::MonitorEngine,
    event::InboundMessage,
    source::{EventSource, LiveSource},
};
use std::io::Cursor;

fn test_engine() -> MonitorEngine {
    MonitorEngine::with_time_source(
        MonitorConfig::default_test(),
        42,
        Box::new(ManualClock::at(1_700_000_000_000)),
    )
}

fn parse(raw: &str) -> InboundMessage {
    serde_json::from_str(raw).expect("wire message should parse")
}

/// The documented wire shape maps straight through to an alert and a
/// score sample.
#[test]
fn full_payload_maps_through() {
    let mut engine = test_engine();
    let msg = parse(r#"{"type":"event","payload":{"risk":34,"type":"Payment","entity":"user_123"}}"#);
    let events = engine.apply_inbound(msg);
    assert_eq!(events.len(), 2, "one alert plus one score sample");

    let alert = engine.alerts().newest().unwrap();
    assert_eq!(alert.category, AlertCategory::Payment);
    assert_eq!(alert.risk, 34);
    assert_eq!(alert.entity, "user_123");
    assert!(!alert.auto_blocked);
    assert_eq!(engine.series().last().unwrap().value, 34);
}

/// Every payload field is optional, with fixed defaults.
#[test]
fn missing_fields_take_documented_defaults() {
    let mut engine = test_engine();
    engine.apply_inbound(parse(r#"{"type":"event","payload":{}}"#));

    let alert = engine.alerts().newest().unwrap();
    assert_eq!(alert.category, AlertCategory::Other);
    assert_eq!(alert.risk, 30);
    assert_eq!(alert.entity, "unknown");
    assert!(!alert.auto_blocked);

    // Without a reported risk the sample is a mid-band draw.
    let value = engine.series().last().unwrap().value;
    assert!((5..=80).contains(&value), "sample {value} outside [5, 80]");
}

/// A message with a wholly absent payload is dropped — no defaults.
#[test]
fn absent_payload_drops_the_message() {
    let mut engine = test_engine();
    let events = engine.apply_inbound(parse(r#"{"type":"event"}"#));

    assert!(events.is_empty());
    assert_eq!(engine.alerts().len(), 0);
    assert_eq!(engine.series().len(), 0);
}

/// autoBlocked passes through from the wire.
#[test]
fn auto_blocked_passes_through() {
    let mut engine = test_engine();
    engine.apply_inbound(parse(
        r#"{"type":"event","payload":{"risk":40,"autoBlocked":true}}"#,
    ));
    assert!(engine.alerts().newest().unwrap().auto_blocked);
    assert_eq!(engine.summary().blocked, 1);
}

/// The live source drops malformed lines and payload-less messages,
/// keeps pumping, and reports exhaustion at EOF without falling back.
#[test]
fn live_source_drops_bad_lines_and_ends_at_eof() {
    let feed = concat!(
        r#"{"type":"event","payload":{"risk":90,"type":"Velocity","entity":"user_9","autoBlocked":true}}"#,
        "\n",
        "this is not json\n",
        r#"{"type":"event"}"#,
        "\n",
    );
    let mut engine = test_engine();
    let mut source = LiveSource::new(Cursor::new(feed.as_bytes()));

    assert!(source.pump(&mut engine).unwrap());
    assert!(source.pump(&mut engine).unwrap(), "bad line is dropped, not fatal");
    assert!(source.pump(&mut engine).unwrap(), "payload-less line is dropped");
    assert!(!source.pump(&mut engine).unwrap(), "EOF exhausts the source");
    assert!(!source.is_connected());

    assert_eq!(engine.alerts().len(), 1);
    let alert = engine.alerts().newest().unwrap();
    assert_eq!(alert.entity, "user_9");
    assert!(alert.auto_blocked);
}
