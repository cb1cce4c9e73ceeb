#![forbid(unsafe_code)]

//! The top-level navigation engine.
//!
//! [`NavEngine`] owns the current view and arbitrates between the four event
//! sources feeding it: dispatched actions, the debounce deadline, the
//! browser's back/forward notification, and fragment-change detection with
//! its polling fallback. Everything runs cooperatively on the host's loop —
//! the host calls [`dispatch`](NavEngine::dispatch), the `on_*` handlers,
//! and [`tick`](NavEngine::tick); [`next_deadline`](NavEngine::next_deadline)
//! tells it when the next tick is worth scheduling.
//!
//! The engine renders nothing. Screens read
//! [`current_view`](NavEngine::current_view) (or the wait-free
//! [`shared_view`](NavEngine::shared_view) handle) and react to the events
//! drained from [`drain_events`](NavEngine::drain_events).

use std::collections::VecDeque;

use navsync_core::{AuthProbe, NavAction, SharedView, ViewState, transition};
use navsync_history::{HistoryBackend, HistoryBridge, canonical_path};
use web_time::Duration;

use crate::clock::EngineClock;
use crate::config::EngineConfig;
use crate::scheduler::{FlushRequest, ReconcileScheduler, select_mode};
use crate::tracker::{DeepLinkTracker, PollTicker};

/// Outbound notification for the host, drained in FIFO order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The current view changed; re-render.
    ViewChanged(ViewState),
    /// A deep link was decoded; the resource screen should fetch its data.
    ResourceRequested(u32),
}

/// Keeps the current view and the session-history stack consistent.
pub struct NavEngine<B: HistoryBackend, A: AuthProbe, C: EngineClock> {
    backend: B,
    auth: A,
    clock: C,
    view: ViewState,
    shared: SharedView,
    bridge: HistoryBridge,
    scheduler: ReconcileScheduler,
    tracker: DeepLinkTracker,
    ticker: PollTicker,
    events: VecDeque<EngineEvent>,
}

impl<B: HistoryBackend, A: AuthProbe, C: EngineClock> NavEngine<B, A, C> {
    /// Create an engine adopting the backend's current entry.
    ///
    /// The initial view is decoded from the current location (unknown paths
    /// land on `Landing`); no write-back happens until something changes.
    /// A deep-link fragment present at startup is picked up by the first
    /// fragment poll, restoring an in-progress resource view after reload.
    pub fn new(backend: B, auth: A, clock: C, config: EngineConfig) -> Self {
        let mut bridge = HistoryBridge::new();
        let view = match backend.location() {
            Ok(loc) => bridge.on_external_navigation(&loc),
            Err(err) => {
                tracing::error!(error = %err, "failed to read initial location");
                ViewState::Landing
            }
        };
        let shared = SharedView::new(view.clone());
        Self {
            backend,
            auth,
            clock,
            view,
            shared,
            bridge,
            scheduler: ReconcileScheduler::new(config.debounce_window),
            tracker: DeepLinkTracker::new(),
            ticker: PollTicker::new(config.poll_interval),
            events: VecDeque::new(),
        }
    }

    /// The sole write entry point for navigation-affecting UI controls.
    pub fn dispatch(&mut self, action: NavAction) {
        self.apply(action, true);
    }

    /// Apply a view change that is a consequence of something else, not a
    /// click — it may only replace the current history entry, never append.
    pub fn apply_side_effect(&mut self, action: NavAction) {
        self.apply(action, false);
    }

    fn apply(&mut self, action: NavAction, user_initiated: bool) {
        let authenticated = self.auth.is_authenticated();
        let is_logout = matches!(action, NavAction::Logout);
        let name = action.name();
        match transition(&self.view, action, authenticated) {
            Ok(next) => {
                if is_logout {
                    self.auth.logout();
                }
                self.set_view(next, user_initiated);
            }
            Err(err) => {
                // Recovered locally: the already-rendered view stays up.
                tracing::warn!(action = name, error = %err, "navigation action rejected");
            }
        }
    }

    /// Install `next` as the current view and queue the write-back.
    fn set_view(&mut self, next: ViewState, user_initiated: bool) {
        if next == self.view {
            return;
        }
        if next.clears_resource_context() {
            self.tracker.reset();
        }
        if let ViewState::ResourceDetail { resource_id } = &next {
            // Keep the tracker in sync with UI-opened resources so the
            // fragment the engine itself writes is not re-consumed.
            self.tracker.mark_processed(*resource_id);
        }
        let now = self.clock.now_mono();
        self.scheduler.notify(next.clone(), user_initiated, now);
        self.shared.publish(next.clone());
        self.events.push_back(EngineEvent::ViewChanged(next.clone()));
        tracing::debug!(view = next.name(), user_initiated, "view changed");
        self.view = next;
    }

    /// The browser itself moved within the stack (back/forward).
    ///
    /// Decodes the restored entry, raises the suppression latch so the next
    /// reconciliation pass does not re-commit what the browser just did,
    /// and lets the fragment path pick up any deep link the restored entry
    /// carries.
    pub fn on_external_navigation(&mut self) {
        let loc = match self.backend.location() {
            Ok(loc) => loc,
            Err(err) => {
                tracing::error!(error = %err, "failed to read restored location");
                return;
            }
        };
        let restored = self.bridge.on_external_navigation(&loc);
        if restored != self.view {
            self.scheduler.suppress_next_write();
            self.set_view(restored, false);
        }
        self.poll_deep_link();
    }

    /// The fragment changed (address bar edit, or a host that does get
    /// change notifications).
    pub fn on_fragment_changed(&mut self) {
        self.poll_deep_link();
    }

    fn poll_deep_link(&mut self) {
        let authenticated = self.auth.is_authenticated();
        let loc = match self.backend.location() {
            Ok(loc) => loc,
            Err(err) => {
                tracing::error!(error = %err, "failed to read location for fragment poll");
                return;
            }
        };
        if let Some(route) = self.tracker.poll(loc.fragment.as_deref(), authenticated) {
            self.events
                .push_back(EngineEvent::ResourceRequested(route.resource_id));
            self.apply(NavAction::OpenResource(route.resource_id), false);
        }
    }

    /// Cooperative heartbeat: run the polling fallback and flush the
    /// scheduler when due.
    pub fn tick(&mut self) {
        let now = self.clock.now_mono();

        // The fallback only runs while a deep link is plausible.
        if self.auth.is_authenticated() {
            if !self.ticker.is_armed() {
                self.ticker.arm(now);
            }
        } else {
            self.ticker.disarm();
        }
        if self.ticker.due(now) {
            self.poll_deep_link();
            self.ticker.arm(now);
        }

        if let Some(flush) = self.scheduler.take_due(now) {
            self.commit_flush(&flush);
        }
    }

    fn commit_flush(&mut self, flush: &FlushRequest) {
        let path = canonical_path(&flush.view);
        let mode = select_mode(flush.user_initiated, path, self.bridge.last_known_path());
        let preserve = match self.backend.location() {
            Ok(loc) => self.tracker.would_consume(loc.fragment.as_deref()),
            Err(_) => false,
        };
        match self
            .bridge
            .commit(&mut self.backend, &flush.view, mode, preserve)
        {
            Ok(_) => {
                // Once no fragment remains in the written URL, the consumed
                // id may be forgotten so the same deep link works again
                // later (explicit exit has completed).
                let fragmentless = self
                    .bridge
                    .last_known_url()
                    .is_some_and(|url| !url.contains('#'));
                if fragmentless {
                    self.tracker.reset();
                }
            }
            Err(err) => {
                // A broken history write must never block rendering.
                tracing::error!(error = %err, path, "history write failed");
            }
        }
    }

    /// When the next [`tick`](Self::tick) has work to do, if anything is
    /// scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.scheduler.next_deadline(), self.ticker.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Snapshot of the current view.
    #[must_use]
    pub fn current_view(&self) -> ViewState {
        self.view.clone()
    }

    /// Wait-free handle renderers can keep across engine updates.
    #[must_use]
    pub fn shared_view(&self) -> SharedView {
        self.shared.clone()
    }

    /// Drain pending outbound events in FIFO order.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    /// The history backend (tests drive back/forward through this).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The history backend, read-only.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The auth probe (tests flip session state through this).
    pub fn auth_mut(&mut self) -> &mut A {
        &mut self.auth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use navsync_core::StaticAuth;
    use navsync_history::MemoryHistory;
    use pretty_assertions::assert_eq;

    type TestEngine = NavEngine<MemoryHistory, StaticAuth, ManualClock>;

    fn engine() -> (TestEngine, ManualClock) {
        let clock = ManualClock::new();
        let engine = NavEngine::new(
            MemoryHistory::new(),
            StaticAuth::default(),
            clock.clone(),
            EngineConfig::default(),
        );
        (engine, clock)
    }

    /// Step past the debounce window so the pending write flushes.
    fn settle(engine: &mut TestEngine, clock: &ManualClock) {
        clock.advance(Duration::from_millis(60));
        engine.tick();
    }

    #[test]
    fn starts_by_adopting_current_entry() {
        let clock = ManualClock::new();
        let engine = NavEngine::new(
            MemoryHistory::with_initial("/login"),
            StaticAuth::default(),
            clock,
            EngineConfig::default(),
        );
        assert_eq!(engine.current_view(), ViewState::Login);
    }

    #[test]
    fn unknown_initial_path_lands() {
        let clock = ManualClock::new();
        let engine = NavEngine::new(
            MemoryHistory::with_initial("/stale-campaign-link"),
            StaticAuth::default(),
            clock,
            EngineConfig::default(),
        );
        assert_eq!(engine.current_view(), ViewState::Landing);
    }

    #[test]
    fn dispatch_appends_after_window() {
        let (mut engine, clock) = engine();
        engine.dispatch(NavAction::ShowLogin);
        assert_eq!(engine.current_view(), ViewState::Login);

        // Nothing written until the window expires.
        engine.tick();
        assert_eq!(engine.backend().depth(), 1);

        settle(&mut engine, &clock);
        assert_eq!(engine.backend().depth(), 2);
        assert_eq!(engine.backend().location().unwrap().path, "/login");
    }

    #[test]
    fn burst_collapses_to_one_write() {
        let (mut engine, clock) = engine();
        engine.dispatch(NavAction::ShowLogin);
        engine.auth_mut().login();
        engine.dispatch(NavAction::LoginSucceeded);

        settle(&mut engine, &clock);
        // One Append for the whole burst, carrying the settled view.
        assert_eq!(engine.backend().depth(), 2);
        assert_eq!(engine.backend().location().unwrap().path, "/dashboard");
    }

    #[test]
    fn rejected_action_changes_nothing() {
        let (mut engine, clock) = engine();
        engine.dispatch(NavAction::OpenResource(5));
        assert_eq!(engine.current_view(), ViewState::Landing);
        assert!(engine.drain_events().is_empty());

        settle(&mut engine, &clock);
        assert_eq!(engine.backend().depth(), 1);
    }

    #[test]
    fn view_changes_are_reported_in_order() {
        let (mut engine, _clock) = engine();
        engine.dispatch(NavAction::ShowAbout);
        engine.dispatch(NavAction::ShowLogin);
        assert_eq!(
            engine.drain_events(),
            vec![
                EngineEvent::ViewChanged(ViewState::About),
                EngineEvent::ViewChanged(ViewState::Login),
            ]
        );
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn redundant_dispatch_is_quiet() {
        let (mut engine, _clock) = engine();
        engine.dispatch(NavAction::ShowAbout);
        engine.drain_events();
        engine.dispatch(NavAction::ShowAbout);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn shared_view_tracks_engine() {
        let (mut engine, _clock) = engine();
        let shared = engine.shared_view();
        engine.dispatch(NavAction::ShowAbout);
        assert_eq!(shared.get(), ViewState::About);
    }

    #[test]
    fn logout_always_returns_to_landing() {
        let (mut engine, clock) = engine();
        engine.auth_mut().login();
        engine.dispatch(NavAction::ShowLogin);
        engine.dispatch(NavAction::LoginSucceeded);
        settle(&mut engine, &clock);

        engine.dispatch(NavAction::Logout);
        assert_eq!(engine.current_view(), ViewState::Landing);
        assert!(!engine.auth_mut().is_authenticated());

        settle(&mut engine, &clock);
        assert_eq!(engine.backend().location().unwrap().path, "/");
    }

    #[test]
    fn deep_link_consumed_once_by_polling() {
        let (mut engine, clock) = engine();
        engine.auth_mut().login();
        engine.dispatch(NavAction::ShowLogin);
        engine.dispatch(NavAction::LoginSucceeded);
        settle(&mut engine, &clock);
        engine.drain_events();

        engine.backend_mut().set_fragment(Some("#/resource/42"));

        // Fragment present continuously; several poll intervals elapse.
        for _ in 0..4 {
            clock.advance(Duration::from_millis(450));
            engine.tick();
        }

        assert_eq!(
            engine.current_view(),
            ViewState::ResourceDetail { resource_id: 42 }
        );
        let requests: Vec<_> = engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, EngineEvent::ResourceRequested(_)))
            .collect();
        assert_eq!(requests, vec![EngineEvent::ResourceRequested(42)]);
    }

    #[test]
    fn deep_link_ignored_while_unauthenticated() {
        let (mut engine, clock) = engine();
        engine.backend_mut().set_fragment(Some("#/resource/42"));
        for _ in 0..4 {
            clock.advance(Duration::from_millis(450));
            engine.tick();
        }
        assert_eq!(engine.current_view(), ViewState::Landing);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn resource_commit_replaces_and_carries_fragment() {
        let (mut engine, clock) = engine();
        engine.auth_mut().login();
        engine.dispatch(NavAction::ShowLogin);
        engine.dispatch(NavAction::LoginSucceeded);
        settle(&mut engine, &clock);
        let depth = engine.backend().depth();

        engine.dispatch(NavAction::OpenResource(7));
        settle(&mut engine, &clock);

        // No new top-level depth for resource navigation.
        assert_eq!(engine.backend().depth(), depth);
        assert_eq!(
            engine.backend().location().unwrap().to_url(),
            "/dashboard#/resource/7"
        );
    }

    #[test]
    fn close_resource_drops_fragment_and_allows_reentry() {
        let (mut engine, clock) = engine();
        engine.auth_mut().login();
        engine.dispatch(NavAction::ShowLogin);
        engine.dispatch(NavAction::LoginSucceeded);
        settle(&mut engine, &clock);

        engine.dispatch(NavAction::OpenResource(7));
        settle(&mut engine, &clock);

        engine.dispatch(NavAction::CloseResource);
        settle(&mut engine, &clock);
        assert_eq!(engine.current_view(), ViewState::AuthenticatedHome);
        assert_eq!(engine.backend().location().unwrap().to_url(), "/dashboard");

        // The same id deep-links again after the explicit exit.
        engine.drain_events();
        engine.backend_mut().set_fragment(Some("#/resource/7"));
        engine.on_fragment_changed();
        assert_eq!(
            engine.current_view(),
            ViewState::ResourceDetail { resource_id: 7 }
        );
        assert!(
            engine
                .drain_events()
                .contains(&EngineEvent::ResourceRequested(7))
        );
    }

    #[test]
    fn back_navigation_is_not_rewritten() {
        let (mut engine, clock) = engine();
        engine.dispatch(NavAction::ShowLogin);
        settle(&mut engine, &clock);
        engine.auth_mut().login();
        engine.dispatch(NavAction::LoginSucceeded);
        settle(&mut engine, &clock);
        assert_eq!(engine.backend().depth(), 3);

        // Browser back: /dashboard -> /login.
        engine.backend_mut().back().unwrap();
        engine.on_external_navigation();
        assert_eq!(engine.current_view(), ViewState::Login);

        // The re-render settles; no write may happen.
        settle(&mut engine, &clock);
        assert_eq!(engine.backend().depth(), 3);
        assert_eq!(engine.backend().location().unwrap().path, "/login");
        assert_eq!(engine.backend().position(), 1);
    }

    #[test]
    fn next_deadline_covers_both_timers() {
        let (mut engine, _clock) = engine();
        assert_eq!(engine.next_deadline(), None);

        engine.dispatch(NavAction::ShowLogin);
        assert_eq!(engine.next_deadline(), Some(Duration::from_millis(50)));

        // Authenticated tick arms the poll fallback.
        engine.auth_mut().login();
        engine.tick();
        assert_eq!(engine.next_deadline(), Some(Duration::from_millis(50)));
    }
}
