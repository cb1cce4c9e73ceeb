#![forbid(unsafe_code)]

//! Core: view states, navigation actions, and deep-link decoding.
//!
//! # Role in navsync
//! `navsync-core` is the leaf layer. It owns the canonical [`ViewState`]
//! vocabulary, the pure transition function that maps user intents onto it,
//! and the decoder for the fragment-encoded deep-link route. Nothing in this
//! crate touches a clock, the history stack, or any other I/O.
//!
//! # Primary responsibilities
//! - **ViewState**: the single source of truth for which screen is active.
//! - **NavAction**: one variant per user intent, consumed by [`transition`].
//! - **Deep links**: decoding of the `#/resource/<id>` fragment shape.
//! - **SharedView**: a wait-free published snapshot for screen renderers.
//! - **AuthProbe**: the boundary trait for the external session service.
//!
//! # How it fits in the system
//! The runtime (`navsync-engine`) owns the current `ViewState` and drives it
//! through `transition`; the history layer (`navsync-history`) maps states to
//! canonical paths. Keeping this crate pure means the state machine is
//! unit-testable without simulating a browser.

pub mod action;
pub mod auth;
pub mod deep_link;
pub mod shared;
pub mod transition;
pub mod view;

pub use action::NavAction;
pub use auth::{AuthProbe, StaticAuth};
pub use deep_link::{DeepLinkRoute, canonical_fragment, parse_fragment};
pub use shared::SharedView;
pub use transition::{TransitionError, transition};
pub use view::ViewState;
