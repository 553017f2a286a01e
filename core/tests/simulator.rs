//! Simulated source tests — generator ranges, the auto-block boundary,
//! determinism, and the start/stop lifecycle.

use corepay_core::{
    alert::{auto_blocks, AlertCategory},
    clock::ManualClock,
    config::MonitorConfig,
    engine::MonitorEngine,
};

fn seeded_engine(seed: u64) -> MonitorEngine {
    MonitorEngine::with_time_source(
        MonitorConfig::default_test(),
        seed,
        Box::new(ManualClock::at(1_700_000_000_000)),
    )
}

/// The block boundary is strictly greater-than 85.
#[test]
fn auto_block_boundary_is_strict() {
    assert!(!auto_blocks(85));
    assert!(auto_blocks(86));
    assert!(auto_blocks(90));
    assert!(!auto_blocks(0));
}

/// Synthesized alerts stay inside the generator ranges, and the
/// auto-block flag always matches the drawn risk.
#[test]
fn simulated_events_respect_generator_ranges() {
    let mut engine = seeded_engine(42);
    for _ in 0..150 {
        engine.simulate_event();
    }

    for alert in engine.alerts().iter() {
        assert!(
            (5..=95).contains(&alert.risk),
            "risk {} outside [5, 95]",
            alert.risk
        );
        let suffix = alert.entity.strip_prefix("user_").expect("entity prefix");
        let n: u32 = suffix.parse().expect("numeric entity suffix");
        assert!((1000..=9999).contains(&n), "entity {}", alert.entity);
        assert_eq!(
            alert.auto_blocked,
            alert.risk > 85,
            "auto_blocked must match risk {}",
            alert.risk
        );
    }

    // Every synthesized event also pushes a derived, clamped sample.
    for point in engine.series().iter() {
        assert!(point.value <= 100);
    }
}

/// The same seed replays the same event sequence.
#[test]
fn same_seed_same_sequence() {
    let mut a = seeded_engine(7);
    let mut b = seeded_engine(7);
    a.start_simulator();
    b.start_simulator();
    for _ in 0..100 {
        a.simulator_tick();
        b.simulator_tick();
    }

    let drawn = |e: &MonitorEngine| -> Vec<(AlertCategory, u8, String, bool)> {
        e.alerts()
            .iter()
            .map(|al| (al.category, al.risk, al.entity.clone(), al.auto_blocked))
            .collect()
    };
    assert_eq!(drawn(&a), drawn(&b));

    let values = |e: &MonitorEngine| -> Vec<u8> { e.series().values().collect() };
    assert_eq!(values(&a), values(&b));
}

/// Ticks split between full alert events and pure drift samples.
#[test]
fn ticks_mix_alert_events_and_drift_points() {
    let mut engine = seeded_engine(42);
    engine.start_simulator();
    for _ in 0..100 {
        engine.simulator_tick();
    }

    let alerts = engine.alerts().len();
    assert!(alerts > 0, "expected some synthesized alerts");
    assert!(alerts < 100, "expected some pure drift ticks");
    assert_eq!(engine.series().len(), 100, "every tick pushes one sample");
}

/// A simulator that was never started (or was stopped) does nothing.
#[test]
fn stopped_simulator_ticks_are_noops() {
    let mut engine = seeded_engine(42);
    assert!(engine.simulator_tick().is_empty());
    assert_eq!(engine.series().len(), 0);

    engine.start_simulator();
    engine.simulator_tick();
    let after_one = engine.series().len();
    assert_eq!(after_one, 1);

    engine.stop_simulator();
    assert!(engine.simulator_tick().is_empty());
    assert_eq!(engine.series().len(), after_one);
}

/// Demo seeding: 18 historical samples, then the two starter alerts.
#[test]
fn demo_seed_populates_history_and_starter_alerts() {
    let mut engine = seeded_engine(42);
    engine.seed_demo_data();

    assert_eq!(engine.series().len(), 18);
    assert_eq!(engine.alerts().len(), 2);
    assert_eq!(engine.summary().blocked, 1);
    assert_eq!(engine.summary().active, 2);
    assert_eq!(engine.alerts().oldest().unwrap().entity, "user_8791");
    assert_eq!(engine.alerts().newest().unwrap().entity, "user_2371");
    for point in engine.series().iter() {
        assert!(point.value <= 100);
    }
}
