//! Event sources — the two interchangeable feeds behind the dashboard.
//!
//! RULE: Exactly one source is active per session. The live source is
//! selected only when an endpoint is configured and the connection
//! succeeds; otherwise the simulator runs if simulation is enabled. A
//! live connection that drops after setup never starts the simulator.

use crate::{
    engine::MonitorEngine,
    error::MonitorResult,
    event::{InboundMessage, MonitorEvent},
};
use std::io::BufRead;

/// The capability both variants share: produce alert-shaped events
/// into the engine, one pump at a time.
pub trait EventSource {
    fn name(&self) -> &'static str;

    /// Advance the source once (one timer interval or one inbound
    /// message). Returns false once the source is exhausted.
    fn pump(&mut self, engine: &mut MonitorEngine) -> MonitorResult<bool>;
}

/// Timer-driven random generator. The engine owns the actual draw
/// logic and the start/stop lifecycle; this wrapper is the session
/// driver's handle on it.
pub struct SimulatedSource;

impl SimulatedSource {
    pub fn start(engine: &mut MonitorEngine) -> Self {
        engine.start_simulator();
        Self
    }
}

impl EventSource for SimulatedSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn pump(&mut self, engine: &mut MonitorEngine) -> MonitorResult<bool> {
        for event in engine.simulator_tick() {
            log::debug!("simulator: {event:?}");
        }
        Ok(engine.simulator_running())
    }
}

/// Live push channel: newline-delimited JSON `InboundMessage`s from
/// any buffered reader (a TcpStream in the runner, a cursor in tests).
pub struct LiveSource<R: BufRead> {
    reader:    R,
    connected: bool,
}

impl<R: BufRead> LiveSource<R> {
    pub fn new(reader: R) -> Self {
        log::info!("live channel connected");
        Self {
            reader,
            connected: true,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl<R: BufRead> EventSource for LiveSource<R> {
    fn name(&self) -> &'static str {
        "live"
    }

    fn pump(&mut self, engine: &mut MonitorEngine) -> MonitorResult<bool> {
        if !self.connected {
            return Ok(false);
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            // EOF: the channel dropped. No simulator fallback.
            log::info!("live channel disconnected");
            self.connected = false;
            return Ok(false);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }

        match serde_json::from_str::<InboundMessage>(trimmed) {
            Ok(message) => {
                for event in engine.apply_inbound(message) {
                    if let MonitorEvent::AlertRaised { entity, risk, .. } = &event {
                        log::debug!("live alert: {entity} risk {risk}");
                    }
                }
            }
            Err(e) => {
                // Malformed messages are dropped whole.
                log::warn!("dropping malformed live message: {e}");
            }
        }
        Ok(true)
    }
}
