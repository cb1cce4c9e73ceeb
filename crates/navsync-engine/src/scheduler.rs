#![forbid(unsafe_code)]

//! Debounced reconciliation of view changes into history writes.
//!
//! A single logical user action (say, a login) can fan out into several
//! sequential view updates before the UI settles. Each one lands here via
//! [`ReconcileScheduler::notify`]; within the reconciliation window they
//! collapse into a single pending write carrying the *last* view. A pending
//! deadline is replaced by each new notify, never stacked.
//!
//! The scheduler also owns the back-navigation latch: after the browser
//! itself restored an entry, the next due flush is consumed without
//! producing a write (the stack already holds the correct entry). The latch
//! is single-generation — set while handling one event, cleared by the end
//! of the next reconciliation pass — and it outranks a user-initiated
//! navigation racing the same window.

use navsync_core::ViewState;
use navsync_history::CommitMode;
use web_time::Duration;

/// A settled view ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushRequest {
    /// The view at the end of the window.
    pub view: ViewState,
    /// Whether any change in the window was user initiated.
    pub user_initiated: bool,
}

#[derive(Debug, Clone)]
struct Pending {
    view: ViewState,
    user_initiated: bool,
    deadline: Duration,
}

/// Collapses bursts of view changes into single history writes.
#[derive(Debug, Clone)]
pub struct ReconcileScheduler {
    window: Duration,
    pending: Option<Pending>,
    back_nav_pending: bool,
}

impl ReconcileScheduler {
    /// Create a scheduler with the given reconciliation window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            back_nav_pending: false,
        }
    }

    /// Record a view change at `now`.
    ///
    /// Replaces any pending write: the view is latest-wins, the deadline
    /// restarts, and `user_initiated` accumulates across the window — a
    /// burst containing one real click commits as user initiated.
    pub fn notify(&mut self, view: ViewState, user_initiated: bool, now: Duration) {
        let user_initiated =
            user_initiated || self.pending.as_ref().is_some_and(|p| p.user_initiated);
        self.pending = Some(Pending {
            view,
            user_initiated,
            deadline: now + self.window,
        });
    }

    /// Raise the back-navigation latch: the next due flush is swallowed.
    pub fn suppress_next_write(&mut self) {
        self.back_nav_pending = true;
    }

    /// Whether the latch is currently raised.
    #[must_use]
    pub fn is_back_nav_pending(&self) -> bool {
        self.back_nav_pending
    }

    /// Whether a write is waiting for its window to expire.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending write becomes due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending write if its window has expired.
    ///
    /// While the latch is raised the due flush is consumed *without* a
    /// write and the latch clears — the browser already holds the entry,
    /// and a user navigation that raced into the same window loses to the
    /// restoration.
    pub fn take_due(&mut self, now: Duration) -> Option<FlushRequest> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;

        if self.back_nav_pending {
            self.back_nav_pending = false;
            tracing::debug!(
                view = pending.view.name(),
                "write suppressed after external navigation"
            );
            return None;
        }

        Some(FlushRequest {
            view: pending.view,
            user_initiated: pending.user_initiated,
        })
    }
}

/// Choose how a flush lands on the stack.
///
/// `Append` only when the change was user initiated *and* moves to a
/// different canonical path; everything else — side effects, settling
/// updates, fragment-only changes — overwrites in place.
#[must_use]
pub fn select_mode(
    user_initiated: bool,
    path: &str,
    last_known_path: Option<&str>,
) -> CommitMode {
    if user_initiated && last_known_path != Some(path) {
        CommitMode::Append
    } else {
        CommitMode::Replace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW_MS: u64 = 50;
    const WINDOW: Duration = Duration::from_millis(WINDOW_MS);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn nothing_due_before_window_expires() {
        let mut sched = ReconcileScheduler::new(WINDOW);
        sched.notify(ViewState::Login, true, ms(0));
        assert_eq!(sched.take_due(ms(49)), None);
        assert!(sched.has_pending());
    }

    #[test]
    fn flush_carries_last_view_of_burst() {
        let mut sched = ReconcileScheduler::new(WINDOW);
        sched.notify(ViewState::Login, true, ms(0));
        sched.notify(ViewState::AuthenticatedHome, false, ms(10));
        sched.notify(ViewState::ResourceDetail { resource_id: 3 }, false, ms(20));

        // Deadline restarted at 20ms; due at 70ms.
        assert_eq!(sched.take_due(ms(69)), None);
        let flush = sched.take_due(ms(70)).unwrap();
        assert_eq!(flush.view, ViewState::ResourceDetail { resource_id: 3 });
        assert!(flush.user_initiated);
        assert!(!sched.has_pending());
    }

    #[test]
    fn burst_produces_exactly_one_flush() {
        let mut sched = ReconcileScheduler::new(WINDOW);
        for i in 0..10 {
            sched.notify(ViewState::Login, false, ms(i));
        }
        assert!(sched.take_due(ms(100)).is_some());
        assert_eq!(sched.take_due(ms(200)), None);
    }

    #[test]
    fn provenance_accumulates_across_window() {
        let mut sched = ReconcileScheduler::new(WINDOW);
        sched.notify(ViewState::Login, false, ms(0));
        sched.notify(ViewState::AuthenticatedHome, true, ms(5));
        sched.notify(ViewState::AuthenticatedHome, false, ms(10));

        let flush = sched.take_due(ms(100)).unwrap();
        assert!(flush.user_initiated);
    }

    #[test]
    fn latch_swallows_next_flush_and_clears() {
        let mut sched = ReconcileScheduler::new(WINDOW);
        sched.suppress_next_write();
        sched.notify(ViewState::Login, false, ms(0));

        assert_eq!(sched.take_due(ms(100)), None);
        assert!(!sched.is_back_nav_pending());

        // A later change flushes normally.
        sched.notify(ViewState::Landing, true, ms(200));
        assert!(sched.take_due(ms(300)).is_some());
    }

    #[test]
    fn latch_outranks_racing_user_navigation() {
        let mut sched = ReconcileScheduler::new(WINDOW);
        sched.suppress_next_write();
        sched.notify(ViewState::Login, false, ms(0));
        // User clicks while the restoration is still settling.
        sched.notify(ViewState::About, true, ms(10));

        assert_eq!(sched.take_due(ms(100)), None);
        assert!(!sched.is_back_nav_pending());
    }

    #[test]
    fn latch_alone_does_not_expire() {
        let mut sched = ReconcileScheduler::new(WINDOW);
        sched.suppress_next_write();
        assert_eq!(sched.take_due(ms(1000)), None);
        assert!(sched.is_back_nav_pending());
    }

    #[test]
    fn next_deadline_tracks_latest_notify() {
        let mut sched = ReconcileScheduler::new(WINDOW);
        assert_eq!(sched.next_deadline(), None);
        sched.notify(ViewState::Login, true, ms(0));
        assert_eq!(sched.next_deadline(), Some(ms(50)));
        sched.notify(ViewState::Login, true, ms(30));
        assert_eq!(sched.next_deadline(), Some(ms(80)));
    }

    proptest! {
        #[test]
        fn arbitrary_in_window_bursts_collapse_to_one_flush(
            gaps in prop::collection::vec(0..WINDOW_MS, 1..20),
        ) {
            let mut sched = ReconcileScheduler::new(WINDOW);
            let mut t = 0;
            for (i, gap) in gaps.iter().enumerate() {
                // Every gap is shorter than the window, so each notify
                // lands before the previous deadline expires.
                t += gap;
                sched.notify(ViewState::Login, i == 0, ms(t));
            }
            let flush = sched.take_due(ms(t + WINDOW_MS)).unwrap();
            prop_assert!(flush.user_initiated);
            prop_assert_eq!(flush.view, ViewState::Login);
            prop_assert_eq!(sched.take_due(ms(t + 10 * WINDOW_MS)), None);
        }
    }

    #[test]
    fn mode_append_needs_user_intent_and_new_path() {
        assert_eq!(select_mode(true, "/login", Some("/")), CommitMode::Append);
        assert_eq!(select_mode(true, "/login", None), CommitMode::Append);
        assert_eq!(
            select_mode(true, "/login", Some("/login")),
            CommitMode::Replace
        );
        assert_eq!(select_mode(false, "/login", Some("/")), CommitMode::Replace);
        assert_eq!(
            select_mode(false, "/login", Some("/login")),
            CommitMode::Replace
        );
    }
}
