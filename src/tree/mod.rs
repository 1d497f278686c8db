//! Pattern tree subsystem.
//!
//! # Data Flow
//! ```text
//! Build (once, single writer):
//!     CompiledPattern + tokens
//!     → pattern_tree.rs (walk leading literals, up to max_depth)
//!     → node.rs (branch children / variable bucket / terminal / leaf)
//!     → candidates.rs (keep each list sorted by weight)
//!
//! Lookup (concurrent readers):
//!     input text → split on separator
//!     → route first token from the root
//!     → gather buckets along the walk
//!     → ordered candidate list
//! ```
//!
//! # Design Decisions
//! - Nodes are a tagged enum rather than a map with sentinel keys
//! - The tree only narrows; every candidate is still checked by its regex
//! - Immutable once built

pub mod candidates;
pub mod node;
pub mod pattern_tree;

pub use candidates::{Candidate, CandidateList, CandidateOrder};
pub use node::{Branch, Node};
pub use pattern_tree::PatternTree;
