#![forbid(unsafe_code)]

//! Published view snapshot for renderers.
//!
//! Screen renderers only ever *read* the current view; the engine is the sole
//! writer. [`SharedView`] gives renderers a wait-free snapshot via
//! [`arc_swap::ArcSwap`], so a render pass never contends with the engine.
//!
//! - `get()`: wait-free, clones the current state out of a guard.
//! - `publish()`: allocates one `Arc`, atomically swaps.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::view::ViewState;

/// A cloneable handle to the engine's published [`ViewState`].
#[derive(Clone)]
pub struct SharedView {
    inner: Arc<ArcSwap<ViewState>>,
}

impl SharedView {
    /// Create a handle publishing an initial state.
    #[must_use]
    pub fn new(initial: ViewState) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// Read the current snapshot.
    #[must_use]
    pub fn get(&self) -> ViewState {
        let guard = self.inner.load();
        ViewState::clone(&guard)
    }

    /// Atomically replace the published snapshot.
    ///
    /// Only the engine calls this.
    pub fn publish(&self, view: ViewState) {
        self.inner.store(Arc::new(view));
    }
}

impl Default for SharedView {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}

impl std::fmt::Debug for SharedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedView").field(&self.get()).finish()
    }
}
