//! Shared primitive types used across the monitoring engine.

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;

/// A stable, unique identifier for an alert (uuid v4, never reused).
pub type AlertId = String;

/// A stable, unique identifier for an investigation note.
pub type NoteId = String;

/// A risk score in [0, 100].
pub type RiskScore = u8;
