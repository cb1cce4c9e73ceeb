#![forbid(unsafe_code)]

//! Runtime: debounced history reconciliation and deep-link tracking.
//!
//! # Role in navsync
//! `navsync-engine` is the control loop. It owns the current
//! [`ViewState`](navsync_core::ViewState), collapses bursts of view changes
//! into single history writes through `navsync-history`, arbitrates between
//! "the user clicked" (new history entry) and "the view settled as a side
//! effect" (replace in place), and detects deep-link fragments with a
//! polling fallback.
//!
//! # Primary responsibilities
//! - **NavEngine**: the host-facing entry point; cooperative, host-driven.
//! - **ReconcileScheduler**: the debounce window and back-navigation latch.
//! - **DeepLinkTracker / PollTicker**: once-per-id fragment consumption.
//! - **EngineConfig**: clamped tuning, env overrides, optional TOML loading.
//! - **EngineClock**: all time flows through a trait, so every behavior is
//!   deterministic under the manual clock.
//!
//! # Event sources
//! Four sources interleave on the host loop: dispatched actions, the
//! debounce deadline, back/forward restorations, and fragment changes (or
//! their polled fallback). The latches that keep them from feeding back
//! into each other are owned fields here, set while handling one event and
//! cleared by the end of the next reconciliation pass.

pub mod clock;
pub mod config;
pub mod engine;
pub mod scheduler;
pub mod tracker;

pub use clock::{EngineClock, ManualClock, MonotonicClock};
#[cfg(feature = "config-load")]
pub use config::ConfigError;
pub use config::EngineConfig;
pub use engine::{EngineEvent, NavEngine};
pub use scheduler::{FlushRequest, ReconcileScheduler, select_mode};
pub use tracker::{DeepLinkTracker, PollTicker};
