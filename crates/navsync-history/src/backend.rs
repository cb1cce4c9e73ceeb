#![forbid(unsafe_code)]

//! History backend trait and the in-memory reference implementation.
//!
//! The backend is the platform boundary: a DOM host implements
//! [`HistoryBackend`] over `window.history` / `window.location`, while
//! [`MemoryHistory`] provides the same semantics over a plain `Vec` so the
//! engine can be driven deterministically in tests and native hosts.
//!
//! The backend owns the actual entry stack; the engine only ever learns the
//! current [`Location`] and asks for `push`/`replace` writes.

use std::convert::Infallible;

/// A parsed URL as the backend reports it: path plus optional fragment.
///
/// The fragment, when present, includes its leading `#` (matching what
/// `location.hash` reports in a browser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The path component, always starting with `/`.
    pub path: String,
    /// The fragment component including the leading `#`, if any.
    pub fragment: Option<String>,
}

impl Location {
    /// Split a URL string into path and fragment at the first `#`.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        match url.split_once('#') {
            Some((path, frag)) => Self {
                path: path.to_string(),
                fragment: Some(format!("#{frag}")),
            },
            None => Self {
                path: url.to_string(),
                fragment: None,
            },
        }
    }

    /// Reassemble the URL string.
    #[must_use]
    pub fn to_url(&self) -> String {
        match &self.fragment {
            Some(frag) => format!("{}{frag}", self.path),
            None => self.path.clone(),
        }
    }
}

/// Platform abstraction over the session-history stack.
///
/// Implementations must apply `push` and `replace` synchronously from the
/// engine's point of view: a `location()` call immediately after a write
/// reports the written URL.
pub trait HistoryBackend {
    /// Platform-specific error type.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// The URL at the current stack position.
    fn location(&self) -> Result<Location, Self::Error>;

    /// Append a new entry after the current position, discarding any
    /// forward entries.
    fn push(&mut self, url: &str) -> Result<(), Self::Error>;

    /// Overwrite the entry at the current position.
    fn replace(&mut self, url: &str) -> Result<(), Self::Error>;
}

/// In-memory history stack with browser-like back/forward semantics.
///
/// Starts with a single root entry (`/`). `back()`/`forward()` move the
/// cursor and return the restored location, which tests feed to the engine
/// the way a browser would deliver a `popstate` event.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    cursor: usize,
}

impl MemoryHistory {
    /// Create a stack holding the given initial URL.
    #[must_use]
    pub fn with_initial(url: &str) -> Self {
        Self {
            entries: vec![Location::parse(url)],
            cursor: 0,
        }
    }

    /// Create a stack positioned at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_initial("/")
    }

    /// Move one entry backward, returning the restored location.
    ///
    /// Returns `None` at the bottom of the stack (a real browser would
    /// leave the page; the engine never observes that).
    pub fn back(&mut self) -> Option<Location> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Move one entry forward, returning the restored location.
    pub fn forward(&mut self) -> Option<Location> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Overwrite the current fragment in place, as address-bar hash edits
    /// and programmatic `location.hash` writes do.
    pub fn set_fragment(&mut self, fragment: Option<&str>) {
        self.entries[self.cursor].fragment = fragment.map(|f| {
            if f.starts_with('#') {
                f.to_string()
            } else {
                format!("#{f}")
            }
        });
    }

    /// Number of entries on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Current cursor position (0 = oldest entry).
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBackend for MemoryHistory {
    type Error = Infallible;

    fn location(&self) -> Result<Location, Self::Error> {
        Ok(self.entries[self.cursor].clone())
    }

    fn push(&mut self, url: &str) -> Result<(), Self::Error> {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Location::parse(url));
        self.cursor += 1;
        Ok(())
    }

    fn replace(&mut self, url: &str) -> Result<(), Self::Error> {
        self.entries[self.cursor] = Location::parse(url);
        Ok(())
    }
}
