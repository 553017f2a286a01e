//! Time source seam — wall clock in production, pinned time in tests.
//!
//! The 24-hour alert count and the series labels are both "now"-relative,
//! so the engine never reads the system clock directly.

use crate::types::TimestampMs;
use chrono::Utc;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

pub trait TimeSource: Send {
    fn now_ms(&self) -> TimestampMs;
}

/// Real wall-clock time.
pub struct WallClock;

impl TimeSource for WallClock {
    fn now_ms(&self) -> TimestampMs {
        Utc::now().timestamp_millis()
    }
}

/// Manually controlled time. Clone it before handing it to the engine
/// so the test keeps a handle for advancing it.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn at(ms: TimestampMs) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(ms)),
        }
    }

    pub fn set(&self, ms: TimestampMs) {
        self.now.store(ms, Ordering::Relaxed);
    }

    pub fn advance(&self, delta_ms: TimestampMs) {
        self.now.fetch_add(delta_ms, Ordering::Relaxed);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> TimestampMs {
        self.now.load(Ordering::Relaxed)
    }
}
