//! Atomically replaceable dispatcher.
//!
//! # Responsibilities
//! - Hold the live dispatcher behind an `ArcSwap`
//! - Publish a rebuilt dispatcher in one step
//!
//! # Design Decisions
//! - Replacements are built off to the side and must be built before they are
//!   stored, so readers never see a half-populated tree
//! - Readers keep the dispatcher they loaded until their call returns

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::handler::Params;
use crate::dispatch::types::{DispatchError, DispatchResult, Matched, Resolved};

/// A built dispatcher that can be swapped while other threads dispatch.
pub struct SharedDispatcher<T> {
    current: ArcSwap<Dispatcher<T>>,
}

impl<T> SharedDispatcher<T> {
    /// Wrap a built dispatcher.
    pub fn new(dispatcher: Dispatcher<T>) -> DispatchResult<Self> {
        if !dispatcher.is_built() {
            return Err(DispatchError::NotPrepared);
        }
        Ok(Self {
            current: ArcSwap::from_pointee(dispatcher),
        })
    }

    /// Snapshot of the dispatcher currently in use.
    pub fn load(&self) -> Arc<Dispatcher<T>> {
        self.current.load_full()
    }

    /// Replace the live dispatcher with a built one.
    pub fn store(&self, dispatcher: Dispatcher<T>) -> DispatchResult<()> {
        if !dispatcher.is_built() {
            return Err(DispatchError::NotPrepared);
        }
        tracing::info!(templates = dispatcher.len(), "Dispatcher replaced");
        self.current.store(Arc::new(dispatcher));
        Ok(())
    }

    pub fn find(&self, text: &str) -> DispatchResult<Option<Resolved<T>>> {
        self.current.load().find(text)
    }

    pub fn dispatch(&self, text: &str) -> DispatchResult<Option<Matched<T>>> {
        self.current.load().dispatch(text)
    }

    pub fn dispatch_with(&self, text: &str, extras: &Params) -> DispatchResult<Option<Matched<T>>> {
        self.current.load().dispatch_with(text, extras)
    }
}
