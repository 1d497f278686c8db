//! Dispatch results and error definitions.

use std::sync::Arc;

use thiserror::Error;

use crate::dispatch::dispatcher::Route;
use crate::dispatch::handler::Params;
use crate::pattern::PatternError;

/// Errors surfaced by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The template failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Registration after `build` without preserve mode.
    #[error("cannot register `{template}`: dispatcher is built and preserve_on_rebuild is off")]
    RegistrationAfterBuild { template: String },

    /// Matching was attempted before `build`.
    #[error("dispatcher must be built before matching")]
    NotPrepared,

    /// A template captured a name its handler does not declare.
    #[error("handler `{handler}` does not accept captured value `{name}`")]
    UnexpectedCapture { handler: String, name: String },

    /// Rejected dispatcher options.
    #[error("invalid dispatcher configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// The template that fully matched an input, with its captures.
pub struct Resolved<T> {
    pub route: Arc<Route<T>>,
    pub captures: Params,
}

impl<T> Resolved<T> {
    pub fn template(&self) -> &str {
        self.route.pattern().raw()
    }

    pub fn handler_name(&self) -> &str {
        self.route.handler().name()
    }
}

/// A successful dispatch: the winning route, the values it was called with
/// and what the handler returned.
pub struct Matched<T> {
    pub route: Arc<Route<T>>,
    pub params: Params,
    pub value: T,
}

impl<T> Matched<T> {
    pub fn template(&self) -> &str {
        self.route.pattern().raw()
    }

    pub fn handler_name(&self) -> &str {
        self.route.handler().name()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Matched<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matched")
            .field("template", &self.template())
            .field("handler", &self.handler_name())
            .field("params", &self.params)
            .field("value", &self.value)
            .finish()
    }
}

impl<T> std::fmt::Debug for Resolved<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("template", &self.template())
            .field("handler", &self.handler_name())
            .field("captures", &self.captures)
            .finish()
    }
}
