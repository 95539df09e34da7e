//! Owned s-expression trees.
//!
//! Hosts normally implement [`TreeNode`] on their own syntax type. Tests,
//! and embedders without an AST of their own, can build little trees out
//! of [`Elem`] values instead, most conveniently with the [`sexp!`] macro:
//!
//! ```
//! use copse_ir::{sexp, TreeNode};
//!
//! // 5.inc
//! let tree = sexp!((send (int 5) :inc));
//! assert_eq!(tree.root().kind(), "send");
//! assert_eq!(tree.root().child_count(), 2);
//! ```
//!
//! All nodes of a tree live in one arena behind an `Arc`; a [`SexpNode`]
//! handle is an (arena, index) pair, so cloning a handle or walking to a
//! parent never copies the tree.

use std::sync::Arc;

use crate::scalar::Scalar;
use crate::tree::{node_eq, Child, TreeNode};

/// Builder element: a node to be, or a leaf scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Elem {
    Node(String, Vec<Elem>),
    Leaf(Scalar),
}

impl Elem {
    #[must_use]
    pub fn node(kind: &str, children: Vec<Elem>) -> Elem {
        Elem::Node(kind.to_owned(), children)
    }

    #[must_use]
    pub fn sym(name: &str) -> Elem {
        Elem::Leaf(Scalar::sym(name))
    }

    #[must_use]
    pub fn nil() -> Elem {
        Elem::Leaf(Scalar::Nil)
    }
}

impl From<i64> for Elem {
    fn from(value: i64) -> Elem {
        Elem::Leaf(Scalar::Int(value))
    }
}

impl From<f64> for Elem {
    fn from(value: f64) -> Elem {
        Elem::Leaf(Scalar::Float(value))
    }
}

impl From<&str> for Elem {
    fn from(value: &str) -> Elem {
        Elem::Leaf(Scalar::string(value))
    }
}

#[derive(Debug)]
struct NodeData {
    kind: Box<str>,
    children: Vec<Slot>,
    parent: Option<usize>,
}

#[derive(Debug)]
enum Slot {
    Node(usize),
    Value(Scalar),
}

/// An owned tree rooted at a node.
#[derive(Debug, Clone)]
pub struct SexpTree {
    nodes: Arc<[NodeData]>,
}

impl SexpTree {
    /// Builds a tree whose root node has `kind` and `children`.
    #[must_use]
    pub fn new(kind: &str, children: Vec<Elem>) -> SexpTree {
        let mut nodes = vec![NodeData {
            kind: kind.into(),
            children: Vec::new(),
            parent: None,
        }];
        let slots = intern_children(&mut nodes, 0, children);
        nodes[0].children = slots;
        SexpTree {
            nodes: nodes.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> SexpNode {
        SexpNode {
            nodes: Arc::clone(&self.nodes),
            index: 0,
        }
    }
}

fn intern_children(nodes: &mut Vec<NodeData>, parent: usize, elems: Vec<Elem>) -> Vec<Slot> {
    elems
        .into_iter()
        .map(|elem| match elem {
            Elem::Leaf(scalar) => Slot::Value(scalar),
            Elem::Node(kind, children) => {
                let index = nodes.len();
                nodes.push(NodeData {
                    kind: kind.into(),
                    children: Vec::new(),
                    parent: Some(parent),
                });
                let slots = intern_children(nodes, index, children);
                nodes[index].children = slots;
                Slot::Node(index)
            }
        })
        .collect()
}

/// Handle to one node of a [`SexpTree`]; cheap to clone.
#[derive(Debug, Clone)]
pub struct SexpNode {
    nodes: Arc<[NodeData]>,
    index: usize,
}

impl TreeNode for SexpNode {
    fn kind(&self) -> &str {
        &self.nodes[self.index].kind
    }

    fn child_count(&self) -> usize {
        self.nodes[self.index].children.len()
    }

    fn child(&self, index: usize) -> Option<Child<Self>> {
        self.nodes[self.index]
            .children
            .get(index)
            .map(|slot| match slot {
                Slot::Value(scalar) => Child::Value(scalar.clone()),
                Slot::Node(child) => Child::Node(SexpNode {
                    nodes: Arc::clone(&self.nodes),
                    index: *child,
                }),
            })
    }

    fn parent(&self) -> Option<Self> {
        self.nodes[self.index].parent.map(|index| SexpNode {
            nodes: Arc::clone(&self.nodes),
            index,
        })
    }
}

impl PartialEq for SexpNode {
    fn eq(&self, other: &Self) -> bool {
        node_eq(self, other)
    }
}

/// Builds a [`SexpTree`] from literal s-expression syntax.
///
/// Children may be nested `(kind ...)` forms, integer, float, or string
/// literals, `:symbols` (operator symbols like `:+` included), or `nil`.
#[macro_export]
macro_rules! sexp {
    ( ( $kind:ident $($child:tt)* ) ) => {
        $crate::sexp::SexpTree::new(stringify!($kind), $crate::sexp_elems!($($child)*))
    };
}

/// Child-list builder behind [`sexp!`]; exported because macro expansion
/// crosses crate boundaries.
#[doc(hidden)]
#[macro_export]
macro_rules! sexp_elems {
    (@go [$($acc:expr,)*]) => {
        ::std::vec![$($acc,)*]
    };
    (@go [$($acc:expr,)*] nil $($rest:tt)*) => {
        $crate::sexp_elems!(@go [$($acc,)* $crate::sexp::Elem::nil(),] $($rest)*)
    };
    (@go [$($acc:expr,)*] : $name:tt $($rest:tt)*) => {
        $crate::sexp_elems!(@go [$($acc,)* $crate::sexp::Elem::sym(stringify!($name)),] $($rest)*)
    };
    (@go [$($acc:expr,)*] ( $kind:ident $($child:tt)* ) $($rest:tt)*) => {
        $crate::sexp_elems!(@go [
            $($acc,)*
            $crate::sexp::Elem::node(stringify!($kind), $crate::sexp_elems!($($child)*)),
        ] $($rest)*)
    };
    (@go [$($acc:expr,)*] - $lit:literal $($rest:tt)*) => {
        $crate::sexp_elems!(@go [$($acc,)* $crate::sexp::Elem::from(-$lit),] $($rest)*)
    };
    (@go [$($acc:expr,)*] $lit:literal $($rest:tt)*) => {
        $crate::sexp_elems!(@go [$($acc,)* $crate::sexp::Elem::from($lit),] $($rest)*)
    };
    ($($elems:tt)*) => {
        $crate::sexp_elems!(@go [] $($elems)*)
    };
}
