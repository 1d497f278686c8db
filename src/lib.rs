//! Pattern dispatch engine.
//!
//! Compiles human-authored templates such as `open <app>` or
//! `GET:/<filepath>` into anchored matchers, organises them in a bounded-depth
//! prefix tree and dispatches input text to the handler of the best match.
//!
//! ```text
//! templates → pattern (compile) → tree (insert) → built Dispatcher
//! input     → tree (lookup) → candidates → first full match → handler
//! ```

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod observability;
pub mod pattern;
pub mod tree;

pub use config::{CatalogConfig, DispatcherConfig};
pub use dispatch::{DispatchError, Dispatcher, Handler, Matched, Params, SharedDispatcher};
pub use pattern::{compile, CompiledPattern, PatternError, Weight};
pub use tree::CandidateOrder;
