//! Weighted candidate bookkeeping.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pattern::Weight;

/// Anything the tree can route to.
pub trait Candidate {
    fn weight(&self) -> Weight;

    /// Raw template text, for diagnostics.
    fn template(&self) -> &str;
}

/// How the segments gathered during a lookup are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateOrder {
    /// Stable sort of the whole result by descending weight.
    #[default]
    Weighted,
    /// Segments concatenated in the order the walk visited them.
    Traversal,
}

/// A list kept sorted by descending weight; equal weights keep insertion order.
#[derive(Debug)]
pub struct CandidateList<C> {
    items: Vec<Arc<C>>,
}

impl<C: Candidate> CandidateList<C> {
    pub fn insert(&mut self, candidate: Arc<C>) {
        let weight = candidate.weight();
        let at = self.items.partition_point(|c| c.weight() >= weight);
        self.items.insert(at, candidate);
    }
}

impl<C> CandidateList<C> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<C>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<C> Default for CandidateList<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Append `segment` to `out`, skipping candidates already present.
pub(crate) fn extend_unique<C>(out: &mut Vec<Arc<C>>, segment: &CandidateList<C>) {
    for candidate in segment.iter() {
        if !out.iter().any(|seen| Arc::ptr_eq(seen, candidate)) {
            out.push(Arc::clone(candidate));
        }
    }
}

/// Apply `order` to a concatenated lookup result.
pub(crate) fn arrange<C: Candidate>(found: &mut [Arc<C>], order: CandidateOrder) {
    if order == CandidateOrder::Weighted {
        found.sort_by(|a, b| b.weight().cmp(&a.weight()));
    }
}
