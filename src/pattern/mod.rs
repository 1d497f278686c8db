//! Template compilation subsystem.
//!
//! # Data Flow
//! ```text
//! Raw template ("play <song> with <app=(spotify|itunes)>")
//!     → template.rs (split on separator, classify tokens)
//!     → compiler.rs (reassemble as anchored case-insensitive regex)
//!     → CompiledPattern { template, weight, regex }
//! ```
//!
//! # Design Decisions
//! - Compilation happens at registration; a bad template never reaches the tree
//! - Compiled patterns are immutable and shared across threads
//! - Literal-only templates always outrank templates with variables

pub mod compiler;
pub mod template;
pub mod types;

pub use compiler::{compile, CompiledPattern, Weight};
pub use template::{Template, Token};
pub use types::PatternError;
