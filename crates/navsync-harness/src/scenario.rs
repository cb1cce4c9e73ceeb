#![forbid(unsafe_code)]

//! Scenario driver: engine + manual clock + write ledger in one place.
//!
//! Steps are explicit and synchronous. Time only moves through
//! [`advance_ms`](Scenario::advance_ms), which also runs one engine tick,
//! so a test reads like the event timeline it simulates:
//!
//! ```
//! use navsync_core::{NavAction, ViewState};
//! use navsync_harness::Scenario;
//!
//! let mut s = Scenario::new();
//! s.dispatch(NavAction::ShowLogin);
//! s.settle();
//! assert_eq!(s.view(), ViewState::Login);
//! assert_eq!(s.url(), "/login");
//! ```

use navsync_core::{NavAction, StaticAuth, ViewState};
use navsync_engine::{EngineConfig, EngineEvent, ManualClock, NavEngine};
use navsync_history::{HistoryBackend, MemoryHistory};
use web_time::Duration;

use crate::recording::{RecordingHistory, WriteRecord};

type ScenarioEngine = NavEngine<RecordingHistory<MemoryHistory>, StaticAuth, ManualClock>;

/// Drives a [`NavEngine`] through a scripted event timeline.
pub struct Scenario {
    engine: ScenarioEngine,
    clock: ManualClock,
}

impl Scenario {
    /// Start at `/`, unauthenticated, default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::at_url("/")
    }

    /// Start at an arbitrary URL (it may include a fragment).
    #[must_use]
    pub fn at_url(url: &str) -> Self {
        Self::with_config(url, EngineConfig::default())
    }

    /// Start with explicit tuning.
    #[must_use]
    pub fn with_config(url: &str, config: EngineConfig) -> Self {
        let clock = ManualClock::new();
        let backend = RecordingHistory::new(MemoryHistory::with_initial(url));
        let engine = NavEngine::new(backend, StaticAuth::default(), clock.clone(), config);
        Self { engine, clock }
    }

    /// Dispatch a user action.
    pub fn dispatch(&mut self, action: NavAction) {
        self.engine.dispatch(action);
    }

    /// Apply a programmatic (non-click) action.
    pub fn side_effect(&mut self, action: NavAction) {
        self.engine.apply_side_effect(action);
    }

    /// Mark the session active, as the auth service would after a login.
    pub fn login(&mut self) {
        self.engine.auth_mut().login();
    }

    /// Advance the clock and run one engine tick.
    pub fn advance_ms(&mut self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
        self.engine.tick();
    }

    /// Step just past the default debounce window so pending writes flush.
    pub fn settle(&mut self) {
        self.advance_ms(60);
    }

    /// Browser back. Returns `false` at the bottom of the stack.
    pub fn back(&mut self) -> bool {
        let moved = self.engine.backend_mut().inner_mut().back().is_some();
        if moved {
            tracing::debug!("delivering back restoration");
            self.engine.on_external_navigation();
        }
        moved
    }

    /// Browser forward. Returns `false` at the top of the stack.
    pub fn forward(&mut self) -> bool {
        let moved = self.engine.backend_mut().inner_mut().forward().is_some();
        if moved {
            tracing::debug!("delivering forward restoration");
            self.engine.on_external_navigation();
        }
        moved
    }

    /// Mutate the fragment and deliver the change notification, as an
    /// address-bar edit would.
    pub fn set_fragment(&mut self, fragment: Option<&str>) {
        self.engine.backend_mut().inner_mut().set_fragment(fragment);
        self.engine.on_fragment_changed();
    }

    /// Mutate the fragment *without* a notification — the case the polling
    /// fallback exists for.
    pub fn set_fragment_silently(&mut self, fragment: Option<&str>) {
        self.engine.backend_mut().inner_mut().set_fragment(fragment);
    }

    /// The engine's current view.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.engine.current_view()
    }

    /// The full URL at the current stack position.
    #[must_use]
    pub fn url(&self) -> String {
        let Ok(loc) = self.engine.backend().location();
        loc.to_url()
    }

    /// Stack depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.engine.backend().inner().depth()
    }

    /// Stack cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.engine.backend().inner().position()
    }

    /// The ledger of effective history writes so far.
    #[must_use]
    pub fn writes(&self) -> &[WriteRecord] {
        self.engine.backend().writes()
    }

    /// Drop recorded writes at a phase boundary.
    pub fn clear_writes(&mut self) {
        self.engine.backend_mut().clear_writes();
    }

    /// Drain engine events accumulated since the last call.
    pub fn events(&mut self) -> Vec<EngineEvent> {
        self.engine.drain_events()
    }

    /// Direct engine access for checks the helpers do not cover.
    pub fn engine_mut(&mut self) -> &mut ScenarioEngine {
        &mut self.engine
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}
