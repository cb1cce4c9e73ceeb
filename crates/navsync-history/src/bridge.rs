#![forbid(unsafe_code)]

//! Canonical-path codec and idempotent history writes.
//!
//! [`HistoryBridge`] translates a settled view state into a concrete history
//! write (append vs. in-place replace) and, in the other direction, decodes a
//! restored entry back into a view state when the user moves through the
//! stack. It owns only `last_known_url` — the last value it wrote or
//! observed — which it uses to suppress redundant writes. The backend owns
//! the actual stack.
//!
//! # Canonical paths
//!
//! | state | path |
//! |-------|------|
//! | `Landing` | `/` |
//! | `About` | `/about` |
//! | `ProfessionalLanding`, `ProfessionalRegistration` | `/professionals` |
//! | `Login` | `/login` |
//! | `Register` | `/register` |
//! | `InitialAssessment` | `/initial-assessment` |
//! | `AuthenticatedHome`, `ResourceDetail` | `/dashboard` |
//!
//! `ResourceDetail` shares `/dashboard` on purpose: the resource id rides in
//! the fragment, so opening and switching resources never adds top-level
//! history depth. Decoding collapses the shared paths to
//! `ProfessionalLanding` and `AuthenticatedHome` respectively; payload not
//! encoded in the path does not survive a round trip.
//!
//! # Fragments
//!
//! The path alone determines the view, with one exception: committing a
//! `ResourceDetail` writes the canonical `#/resource/<id>` fragment, and a
//! dashboard commit may carry an *unconsumed* deep-link fragment through
//! verbatim (so a reload or a login hand-off does not lose the pending
//! resource view). Any other commit drops the fragment.

use navsync_core::{ViewState, canonical_fragment, parse_fragment};

use crate::backend::{HistoryBackend, Location};

/// How a commit lands on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Create a new stack entry.
    Append,
    /// Overwrite the current entry.
    Replace,
}

/// Whether a commit actually wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The backend performed a write.
    Written,
    /// The entry already matched; no write was issued.
    Skipped,
}

/// The deterministic path for a view state. Total over all states.
#[must_use]
pub const fn canonical_path(view: &ViewState) -> &'static str {
    match view {
        ViewState::Landing => "/",
        ViewState::About => "/about",
        ViewState::ProfessionalLanding | ViewState::ProfessionalRegistration => "/professionals",
        ViewState::Login => "/login",
        ViewState::Register { .. } => "/register",
        ViewState::InitialAssessment => "/initial-assessment",
        ViewState::AuthenticatedHome | ViewState::ResourceDetail { .. } => "/dashboard",
    }
}

/// Strip a trailing slash (except on the root path) and map the empty
/// string to the root.
fn normalize(path: &str) -> &str {
    if path.is_empty() {
        return "/";
    }
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// The inverse of [`canonical_path`] for paths that have one.
fn decode_known(path: &str) -> Option<ViewState> {
    match normalize(path) {
        "/" => Some(ViewState::Landing),
        "/about" => Some(ViewState::About),
        "/professionals" => Some(ViewState::ProfessionalLanding),
        "/login" => Some(ViewState::Login),
        "/register" => Some(ViewState::Register {
            prior_session_id: None,
        }),
        "/initial-assessment" => Some(ViewState::InitialAssessment),
        "/dashboard" => Some(ViewState::AuthenticatedHome),
        _ => None,
    }
}

/// Decode a path back into a view state.
///
/// Paths with no known inverse fall back to `Landing`: a restored entry the
/// engine cannot classify must still render *something*, and the landing
/// page is the safe default.
#[must_use]
pub fn decode_path(path: &str) -> ViewState {
    decode_known(path).unwrap_or(ViewState::Landing)
}

/// Translates settled view states into history writes and restored entries
/// back into view states.
#[derive(Debug, Clone, Default)]
pub struct HistoryBridge {
    /// The last URL this bridge wrote or observed, if any.
    last_known_url: Option<String>,
}

impl HistoryBridge {
    /// Create a bridge that has not yet written or observed anything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last URL written or observed.
    #[must_use]
    pub fn last_known_url(&self) -> Option<&str> {
        self.last_known_url.as_deref()
    }

    /// The path component of the last URL written or observed.
    ///
    /// This is what append-vs-replace selection compares against: fragment
    /// changes never justify new history depth.
    #[must_use]
    pub fn last_known_path(&self) -> Option<&str> {
        self.last_known_url
            .as_deref()
            .map(|url| url.split_once('#').map_or(url, |(path, _)| path))
    }

    /// Write the entry for `view` to the stack.
    ///
    /// The write is skipped entirely when the target URL equals both
    /// `last_known_url` and the backend's current URL — committing the same
    /// entry twice must be a no-op.
    ///
    /// Fragment policy:
    /// - `ResourceDetail` always writes its canonical fragment.
    /// - Other dashboard commits keep the current fragment verbatim when
    ///   `preserve_fragment` is set and the fragment is a valid deep link
    ///   (the caller passes `true` while the deep link is still unconsumed).
    /// - Everything else writes the bare path, dropping any fragment.
    pub fn commit<B: HistoryBackend>(
        &mut self,
        backend: &mut B,
        view: &ViewState,
        mode: CommitMode,
        preserve_fragment: bool,
    ) -> Result<CommitOutcome, B::Error> {
        let path = canonical_path(view);
        let current = backend.location()?;

        let mut url = path.to_string();
        match view {
            ViewState::ResourceDetail { resource_id } => {
                url.push_str(&canonical_fragment(*resource_id));
            }
            _ if path == "/dashboard" && preserve_fragment => {
                if let Some(frag) = current.fragment.as_deref() {
                    if parse_fragment(frag).is_some() {
                        url.push_str(frag);
                    }
                }
            }
            _ => {}
        }

        if self.last_known_url.as_deref() == Some(url.as_str()) && current.to_url() == url {
            tracing::debug!(%url, "history commit skipped, entry already current");
            return Ok(CommitOutcome::Skipped);
        }

        match mode {
            CommitMode::Append => backend.push(&url)?,
            CommitMode::Replace => backend.replace(&url)?,
        }
        tracing::debug!(%url, ?mode, "history commit written");
        self.last_known_url = Some(url);
        Ok(CommitOutcome::Written)
    }

    /// Decode an entry the browser itself restored (back/forward).
    ///
    /// Updates `last_known_url` so the engine's next reconciliation pass
    /// does not re-commit what the browser just did. The caller raises the
    /// suppression latch on its scheduler.
    pub fn on_external_navigation(&mut self, restored: &Location) -> ViewState {
        let path = normalize(&restored.path);
        let mut url = path.to_string();
        if let Some(frag) = restored.fragment.as_deref() {
            url.push_str(frag);
        }
        self.last_known_url = Some(url);

        match decode_known(path) {
            Some(view) => {
                tracing::debug!(path, view = view.name(), "restored history entry");
                view
            }
            None => {
                tracing::warn!(path, "restored path has no inverse, falling back to landing");
                ViewState::Landing
            }
        }
    }
}
