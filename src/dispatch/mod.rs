//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! register(template, handler)
//!     → pattern::compile (fails fast on bad syntax)
//!     → pending routes
//!
//! build()
//!     → resolve max_depth
//!     → tree::PatternTree::insert for every pending route
//!     → built (read-only)
//!
//! dispatch(text)
//!     → tree lookup → ordered candidates
//!     → first full regex match wins
//!     → handler invoked with captured names → Matched | None
//! ```
//!
//! # Design Decisions
//! - "No match" is `Ok(None)`, never an error
//! - Live rebuilds go through `SharedDispatcher`, which swaps whole trees

pub mod dispatcher;
pub mod handler;
pub mod shared;
pub mod types;

pub use dispatcher::{Dispatcher, Route};
pub use handler::{Handler, Params};
pub use shared::SharedDispatcher;
pub use types::{DispatchError, DispatchResult, Matched, Resolved};
