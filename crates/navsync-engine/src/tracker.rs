#![forbid(unsafe_code)]

//! Deep-link detection: change-driven with a polling fallback.
//!
//! Fragment mutations performed by the application's own code do not
//! reliably raise change notifications in every runtime environment, while
//! mutations from the address bar or back/forward do. [`DeepLinkTracker`] is
//! therefore fed from two paths: the host's explicit fragment-change
//! notification, and [`PollTicker`], a named periodic fallback that runs
//! only while a deep link is plausible (authenticated).
//!
//! Repeated polling over an unchanged fragment must be a no-op, so the
//! tracker remembers the last id it handed out and yields each distinct id
//! at most once until it is reset by an explicit exit from the resource
//! view (never by the fragment merely disappearing — the fragment is
//! intentionally left in place to support the browser's own back button).

use navsync_core::{DeepLinkRoute, parse_fragment};
use web_time::Duration;

/// Detects new deep-link ids in the URL fragment.
#[derive(Debug, Clone, Default)]
pub struct DeepLinkTracker {
    last_processed: Option<u32>,
}

impl DeepLinkTracker {
    /// Create a tracker with no consumed id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id most recently handed out, if any.
    #[must_use]
    pub fn last_processed(&self) -> Option<u32> {
        self.last_processed
    }

    /// Record an id as already handled.
    ///
    /// The engine calls this when the resource view is entered through a
    /// direct UI action, so the fragment the engine itself writes back is
    /// not re-consumed as a fresh deep link.
    pub fn mark_processed(&mut self, resource_id: u32) {
        self.last_processed = Some(resource_id);
    }

    /// Whether a fragment would yield a route right now.
    ///
    /// Used by the engine to decide if a dashboard commit should carry the
    /// current fragment through (the deep link is still in flight).
    #[must_use]
    pub fn would_consume(&self, fragment: Option<&str>) -> bool {
        fragment
            .and_then(parse_fragment)
            .is_some_and(|route| Some(route.resource_id) != self.last_processed)
    }

    /// Inspect the current fragment and yield a route on a genuinely new id.
    ///
    /// Gated on `authenticated`: deep links only make sense into the
    /// resource view. Malformed fragments and already-consumed ids yield
    /// `None`, so calling this from both the change notification and the
    /// timer never duplicates work.
    pub fn poll(&mut self, fragment: Option<&str>, authenticated: bool) -> Option<DeepLinkRoute> {
        if !authenticated {
            return None;
        }
        let route = parse_fragment(fragment?)?;
        if Some(route.resource_id) == self.last_processed {
            return None;
        }
        self.last_processed = Some(route.resource_id);
        tracing::debug!(resource_id = route.resource_id, "deep link consumed");
        Some(route)
    }

    /// Forget the consumed id.
    ///
    /// Called on explicit exit from the resource view (after the fragment
    /// has been dropped from the URL) and when entering a screen that
    /// discards resource context, so the same id can deep-link again later.
    pub fn reset(&mut self) {
        self.last_processed = None;
    }
}

/// Cooperative interval gate for the polling fallback.
///
/// No threads: the host drives `NavEngine::tick`, and the ticker just
/// answers "is a poll due at `now`?". Disarmed while unauthenticated so the
/// fallback costs nothing when no deep link is plausible.
#[derive(Debug, Clone)]
pub struct PollTicker {
    interval: Duration,
    next_due: Option<Duration>,
}

impl PollTicker {
    /// Create a disarmed ticker with the given interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Whether the ticker is currently scheduled.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedule the next poll one interval after `now`.
    pub fn arm(&mut self, now: Duration) {
        self.next_due = Some(now + self.interval);
    }

    /// Stop polling.
    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Whether a poll is due at `now`.
    #[must_use]
    pub fn due(&self, now: Duration) -> bool {
        self.next_due.is_some_and(|d| now >= d)
    }

    /// When the next poll is due, if armed.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }
}
