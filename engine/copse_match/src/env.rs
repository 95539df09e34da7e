//! Slot storage threaded through a single evaluation.

use std::ops::Deref;

use copse_ir::{Child, TreeNode};
use smallvec::{smallvec, SmallVec};

/// One recorded capture: a single child, or the slice of children a
/// captured ellipsis consumed.
#[derive(Debug, Clone)]
pub enum Captured<N: TreeNode> {
    Value(Child<N>),
    List(Vec<Child<N>>),
}

impl<N: TreeNode + PartialEq> PartialEq for Captured<N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Captured::Value(a), Captured::Value(b)) => a == b,
            (Captured::List(a), Captured::List(b)) => a == b,
            _ => false,
        }
    }
}

/// Captures of a successful match, in pattern source order.
///
/// Dereferences to a slice, so `captures[0]` is the first `$` in the
/// pattern text.
#[derive(Debug, Clone)]
pub struct Captures<N: TreeNode>(Vec<Captured<N>>);

impl<N: TreeNode + PartialEq> PartialEq for Captures<N> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<N: TreeNode> Captures<N> {
    #[must_use]
    pub fn into_inner(self) -> Vec<Captured<N>> {
        self.0
    }
}

impl<N: TreeNode> Deref for Captures<N> {
    type Target = [Captured<N>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Mutable state of one evaluation attempt. Union branches clone the
/// environment so a failed alternative cannot leak bindings into the
/// next one.
#[derive(Debug, Clone)]
pub(crate) struct Env<N: TreeNode> {
    binds: SmallVec<[Option<Child<N>>; 4]>,
    caps: SmallVec<[Option<Captured<N>>; 4]>,
}

impl<N: TreeNode> Env<N> {
    pub(crate) fn new(binds: usize, caps: usize) -> Self {
        Env {
            binds: smallvec![None; binds],
            caps: smallvec![None; caps],
        }
    }

    /// The child a named wildcard slot is unified with, if any yet.
    pub(crate) fn bound(&self, slot: usize) -> Option<&Child<N>> {
        self.binds[slot].as_ref()
    }

    pub(crate) fn bind(&mut self, slot: usize, value: Child<N>) {
        self.binds[slot] = Some(value);
    }

    pub(crate) fn record(&mut self, slot: usize, value: Captured<N>) {
        self.caps[slot] = Some(value);
    }

    /// Finalizes a successful match. Slot allocation guarantees every
    /// capture slot was written on whichever path succeeded.
    pub(crate) fn into_captures(self) -> Captures<N> {
        let mut out = Vec::with_capacity(self.caps.len());
        for slot in self.caps {
            debug_assert!(slot.is_some(), "capture slot left unfilled by a successful match");
            if let Some(value) = slot {
                out.push(value);
            }
        }
        Captures(out)
    }
}
