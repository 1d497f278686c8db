//! Token-keyed routing tree.
//!
//! # Responsibilities
//! - Place each compiled template under the path of its leading literals
//! - Route input text to a small, ordered candidate set
//!
//! # Design Decisions
//! - Only the first `max_depth` tokens route; the regex validates the rest
//! - A variable token ends the walk for that template (it lands in the
//!   branch's variable bucket)
//! - Keys are lowercased on both sides, matching the case-insensitive regex
//! - Read-only after construction, so lookups need no locking

use std::fmt;
use std::sync::Arc;

use crate::pattern::Token;
use crate::tree::candidates::{arrange, extend_unique, Candidate, CandidateList, CandidateOrder};
use crate::tree::node::{Branch, Node};

/// Bounded-depth prefix tree of candidates.
#[derive(Debug)]
pub struct PatternTree<C> {
    root: Branch<C>,
    max_depth: usize,
    separator: String,
    order: CandidateOrder,
    len: usize,
}

impl<C: Candidate> PatternTree<C> {
    /// Create an empty tree. A `max_depth` of zero is treated as one.
    pub fn new(max_depth: usize, separator: impl Into<String>, order: CandidateOrder) -> Self {
        Self {
            root: Branch::new(),
            max_depth: max_depth.max(1),
            separator: separator.into(),
            order,
            len: 0,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn order(&self) -> CandidateOrder {
        self.order
    }

    /// Number of inserted candidates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `candidate` along the path described by `tokens`.
    pub fn insert(&mut self, tokens: &[Token], candidate: Arc<C>) {
        let max_depth = self.max_depth;
        let depth = max_depth.min(tokens.len());
        self.len += 1;

        let mut branch = &mut self.root;
        for (pos, token) in tokens.iter().take(depth).enumerate() {
            let key = match token {
                Token::Variable { .. } => {
                    branch.variables.insert(candidate);
                    return;
                }
                Token::Literal(text) => text.to_lowercase(),
            };

            let child = branch.children.entry(key).or_insert_with(|| {
                if pos + 1 == max_depth {
                    Node::Leaf(CandidateList::new())
                } else {
                    Node::Branch(Branch::new())
                }
            });

            match child {
                Node::Branch(next) => branch = next,
                Node::Leaf(list) => {
                    list.insert(candidate);
                    return;
                }
            }
        }

        // Ran out of tokens before reaching leaf depth.
        branch.terminal.insert(candidate);
    }

    /// Collect the candidates that could match `text`, in trial order.
    pub fn lookup(&self, text: &str) -> Vec<Arc<C>> {
        let mut words = text.split(self.separator.as_str());
        let mut node = match words.next().and_then(|first| self.root.child(&first.to_lowercase())) {
            Some(node) => node,
            None => return Vec::new(),
        };

        let mut found = Vec::new();
        for word in words.take(self.max_depth) {
            let branch = match node {
                Node::Branch(branch) => branch,
                Node::Leaf(_) => break,
            };
            match branch.child(&word.to_lowercase()) {
                Some(child) => node = child,
                None => extend_unique(&mut found, &branch.variables),
            }
        }

        match node {
            Node::Branch(branch) => extend_unique(&mut found, &branch.terminal),
            Node::Leaf(list) => extend_unique(&mut found, list),
        }

        arrange(&mut found, self.order);
        found
    }
}

impl<C: Candidate> fmt::Display for PatternTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.root.describe(0, &mut out)?;
        f.write_str(&out)
    }
}
