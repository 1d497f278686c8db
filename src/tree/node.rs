//! Tree node variants.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use crate::tree::candidates::{Candidate, CandidateList};

/// A node below the root.
///
/// Nodes at depth `max_depth` are always leaves; every shallower node is a
/// branch. Keeping the two apart as variants means a literal token can never
/// collide with a bucket.
#[derive(Debug)]
pub enum Node<C> {
    Branch(Branch<C>),
    Leaf(CandidateList<C>),
}

/// An interior node.
#[derive(Debug)]
pub struct Branch<C> {
    /// Children keyed by lowercased literal token.
    pub(crate) children: HashMap<String, Node<C>>,
    /// Templates whose next token is a variable; resolved by their regex alone.
    pub(crate) variables: CandidateList<C>,
    /// Literal-only templates that end at this node.
    pub(crate) terminal: CandidateList<C>,
}

impl<C> Branch<C> {
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            variables: CandidateList::new(),
            terminal: CandidateList::new(),
        }
    }

    pub fn child(&self, token: &str) -> Option<&Node<C>> {
        self.children.get(token)
    }
}

impl<C> Default for Branch<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Candidate> Branch<C> {
    /// Render this branch and everything below it, one entry per line.
    pub(crate) fn describe(&self, indent: usize, out: &mut String) -> fmt::Result {
        describe_list(out, indent, "<VAR>", &self.variables)?;
        describe_list(out, indent, "<END>", &self.terminal)?;

        let mut keys: Vec<_> = self.children.keys().collect();
        keys.sort();
        for key in keys {
            writeln!(out, "{:indent$}{:?}", "", key, indent = indent)?;
            match &self.children[key] {
                Node::Branch(branch) => branch.describe(indent + 2, out)?,
                Node::Leaf(list) => describe_list(out, indent + 2, "<LEAF>", list)?,
            }
        }
        Ok(())
    }
}

fn describe_list<C: Candidate>(
    out: &mut String,
    indent: usize,
    label: &str,
    list: &CandidateList<C>,
) -> fmt::Result {
    if list.is_empty() {
        return Ok(());
    }
    writeln!(out, "{:indent$}{}", "", label, indent = indent)?;
    for candidate in list.iter() {
        writeln!(
            out,
            "{:indent$}[{}] {}",
            "",
            candidate.weight(),
            candidate.template(),
            indent = indent + 2
        )?;
    }
    Ok(())
}
