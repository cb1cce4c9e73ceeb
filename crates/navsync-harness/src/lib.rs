#![forbid(unsafe_code)]

//! Test harness: deterministic scenario driving for the navigation engine.
//!
//! Everything here runs on the manual clock — no sleeps, no real timers —
//! so scenarios step through debounce windows and poll intervals exactly.
//! [`RecordingHistory`] wraps a backend and keeps a ledger of effective
//! writes, which is what the idempotence and debounce-collapse properties
//! assert against. [`Scenario`] bundles engine, clock, and ledger behind
//! step helpers used by the e2e tests and the replay binary.

pub mod recording;
pub mod scenario;

pub use recording::{RecordingHistory, WriteKind, WriteRecord};
pub use scenario::Scenario;
