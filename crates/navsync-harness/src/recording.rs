#![forbid(unsafe_code)]

//! A history backend wrapper that keeps a ledger of effective writes.
//!
//! The bridge is supposed to skip redundant writes entirely; asserting that
//! requires seeing the writes that actually reached the backend, not the
//! commits that were attempted. Wrap any backend in [`RecordingHistory`]
//! and read the ledger back after the scenario ran.

use navsync_history::{HistoryBackend, Location};

/// Which write primitive the backend performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// A new stack entry was appended.
    Push,
    /// The current entry was overwritten.
    Replace,
}

/// One effective write, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    /// Push or replace.
    pub kind: WriteKind,
    /// The full URL that was written.
    pub url: String,
}

/// Wraps a backend, recording every `push`/`replace` that reaches it.
#[derive(Debug, Clone)]
pub struct RecordingHistory<B> {
    inner: B,
    writes: Vec<WriteRecord>,
}

impl<B> RecordingHistory<B> {
    /// Wrap a backend with an empty ledger.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            writes: Vec::new(),
        }
    }

    /// The writes that actually happened, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[WriteRecord] {
        &self.writes
    }

    /// Forget recorded writes (scenario phase boundaries).
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// The wrapped backend.
    #[must_use]
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// The wrapped backend, mutable (for driving back/forward).
    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }
}

impl<B: HistoryBackend> HistoryBackend for RecordingHistory<B> {
    type Error = B::Error;

    fn location(&self) -> Result<Location, Self::Error> {
        self.inner.location()
    }

    fn push(&mut self, url: &str) -> Result<(), Self::Error> {
        self.inner.push(url)?;
        self.writes.push(WriteRecord {
            kind: WriteKind::Push,
            url: url.to_string(),
        });
        Ok(())
    }

    fn replace(&mut self, url: &str) -> Result<(), Self::Error> {
        self.inner.replace(url)?;
        self.writes.push(WriteRecord {
            kind: WriteKind::Replace,
            url: url.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navsync_history::MemoryHistory;

    #[test]
    fn ledger_records_in_order() {
        let mut h = RecordingHistory::new(MemoryHistory::new());
        h.push("/login").unwrap();
        h.replace("/register").unwrap();

        assert_eq!(
            h.writes(),
            &[
                WriteRecord {
                    kind: WriteKind::Push,
                    url: "/login".into()
                },
                WriteRecord {
                    kind: WriteKind::Replace,
                    url: "/register".into()
                },
            ]
        );
        assert_eq!(h.inner().location().unwrap().path, "/register");
    }

    #[test]
    fn reads_are_not_recorded() {
        let h = RecordingHistory::new(MemoryHistory::new());
        let _ = h.location().unwrap();
        assert!(h.writes().is_empty());
    }

    #[test]
    fn clear_writes_empties_ledger() {
        let mut h = RecordingHistory::new(MemoryHistory::new());
        h.push("/login").unwrap();
        h.clear_writes();
        assert!(h.writes().is_empty());
    }
}
