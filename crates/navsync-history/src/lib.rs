#![forbid(unsafe_code)]

//! Session-history boundary and canonical-path bridge.
//!
//! # Role in navsync
//! This crate owns the line between the engine and whatever implements the
//! browser's history/location API. [`HistoryBackend`] is the platform trait
//! (a DOM host implements it over `window.history`; [`MemoryHistory`] is the
//! in-crate reference with a real back/forward stack). [`HistoryBridge`]
//! translates view states to canonical paths and back, and performs
//! idempotent, fragment-preserving history writes.
//!
//! # How it fits in the system
//! The runtime (`navsync-engine`) never touches a backend directly for
//! writes: its scheduler decides *when* and *how* (append vs. replace), and
//! the bridge decides *whether* a write is redundant and what URL is
//! actually written.

pub mod backend;
pub mod bridge;

pub use backend::{HistoryBackend, Location, MemoryHistory};
pub use bridge::{CommitMode, CommitOutcome, HistoryBridge, canonical_path, decode_path};
