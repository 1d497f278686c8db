//! Handlers bound to templates.
//!
//! # Responsibilities
//! - Wrap a callable with a name and the parameter names it accepts
//! - Assemble the named values passed on invocation
//!
//! # Design Decisions
//! - Captured names the handler does not declare are an invocation error
//! - Caller-supplied extras the handler does not declare are dropped
//! - Handler failures are not caught here; a fallible handler returns a
//!   `Result` as its output and the caller decides what to do with it

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::types::DispatchError;

/// Named values passed to a handler.
pub type Params = BTreeMap<String, String>;

type HandlerFn<T> = dyn Fn(&Params) -> T + Send + Sync;

/// A named callable that one or more templates dispatch to.
pub struct Handler<T> {
    name: Arc<str>,
    accepts: Arc<[String]>,
    func: Arc<HandlerFn<T>>,
}

impl<T> Handler<T> {
    /// Create a handler accepting exactly the names in `accepts`.
    pub fn new<F>(name: impl Into<String>, accepts: &[&str], func: F) -> Self
    where
        F: Fn(&Params) -> T + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            accepts: accepts.iter().map(|s| s.to_string()).collect(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepted(&self) -> &[String] {
        &self.accepts
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.accepts.iter().any(|a| a == name)
    }

    /// Merge `captures` over the accepted `extras`.
    pub fn bind(&self, captures: Params, extras: &Params) -> Result<Params, DispatchError> {
        let mut params: Params = extras
            .iter()
            .filter(|(name, _)| self.accepts(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        for (name, value) in captures {
            if !self.accepts(&name) {
                return Err(DispatchError::UnexpectedCapture {
                    handler: self.name.to_string(),
                    name,
                });
            }
            params.insert(name, value);
        }
        Ok(params)
    }

    pub fn call(&self, params: &Params) -> T {
        (self.func)(params)
    }
}

// Manual impl: cloning shares the callable and does not need `T: Clone`.
impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            accepts: Arc::clone(&self.accepts),
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("accepts", &self.accepts)
            .finish_non_exhaustive()
    }
}
