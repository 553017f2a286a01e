//! CorePay Risk Desk — core monitoring engine.
//!
//! A headless fraud/risk monitoring pipeline: a bounded alert feed, a
//! bounded risk-score series, summary figures recomputed after every
//! mutation, operator investigation notes, CSV export, and two
//! interchangeable event sources (live NDJSON channel or deterministic
//! simulator).
//!
//! Data flow is one-directional and synchronous:
//! source → store mutation → summary recompute → snapshot.

pub mod alert;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod export;
pub mod notes;
pub mod rng;
pub mod series;
pub mod snapshot;
pub mod source;
pub mod summary;
pub mod types;
