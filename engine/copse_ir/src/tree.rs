//! The capability trait through which candidate trees are consumed.

use crate::scalar::Scalar;
use crate::stack::with_headroom;

/// A host syntax-tree node.
///
/// The engine never builds nodes, it only asks these four questions.
/// `Clone` on the handle is expected to be cheap (an `Arc` bump or an
/// (arena, index) pair); handles are cloned freely while binding and
/// capturing.
pub trait TreeNode: Clone {
    /// The node's type tag, e.g. `"send"` or `"int"`.
    fn kind(&self) -> &str;

    fn child_count(&self) -> usize;

    /// Child at `index`; `None` once `index >= child_count()`.
    fn child(&self, index: usize) -> Option<Child<Self>>;

    /// Parent node, absent at the root.
    fn parent(&self) -> Option<Self>;
}

/// One child position: a nested node or a scalar leaf.
#[derive(Debug, Clone)]
pub enum Child<N> {
    Node(N),
    Value(Scalar),
}

impl<N: TreeNode + PartialEq> PartialEq for Child<N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Child::Node(a), Child::Node(b)) => a == b,
            (Child::Value(a), Child::Value(b)) => a == b,
            _ => false,
        }
    }
}

/// Structural equality over children: scalars by value, nodes by
/// [`node_eq`].
pub fn child_eq<N: TreeNode>(a: &Child<N>, b: &Child<N>) -> bool {
    match (a, b) {
        (Child::Value(x), Child::Value(y)) => x == y,
        (Child::Node(x), Child::Node(y)) => node_eq(x, y),
        _ => false,
    }
}

/// Structural equality over nodes: same kind, same child count, children
/// pairwise equal. This is what unification, `%N` comparison, and the
/// `equal?` builtin use, so hosts need no `Eq` of their own.
pub fn node_eq<N: TreeNode>(a: &N, b: &N) -> bool {
    if a.kind() != b.kind() || a.child_count() != b.child_count() {
        return false;
    }
    with_headroom(|| {
        (0..a.child_count()).all(|i| match (a.child(i), b.child(i)) {
            (Some(x), Some(y)) => child_eq(&x, &y),
            _ => false,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::{child_eq, node_eq, Child};
    use crate::scalar::Scalar;
    use crate::sexp;

    #[test]
    fn equal_trees_compare_equal_across_arenas() {
        let a = sexp!((send (int 5) :inc));
        let b = sexp!((send (int 5) :inc));
        assert!(node_eq(&a.root(), &b.root()));
    }

    #[test]
    fn kind_and_children_both_matter() {
        let a = sexp!((send (int 5) :inc));
        assert!(!node_eq(&a.root(), &sexp!((csend (int 5) :inc)).root()));
        assert!(!node_eq(&a.root(), &sexp!((send (int 6) :inc)).root()));
        assert!(!node_eq(&a.root(), &sexp!((send (int 5) :inc nil)).root()));
    }

    #[test]
    fn scalars_never_equal_nodes() {
        let tree = sexp!((int 5));
        let node = Child::Node(tree.root());
        let value: Child<sexp::SexpNode> = Child::Value(Scalar::Int(5));
        assert!(!child_eq(&node, &value));
    }
}
