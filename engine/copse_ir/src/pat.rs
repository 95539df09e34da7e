//! The pattern AST the parser produces and the compiler lowers.

use std::sync::Arc;

use crate::scalar::Scalar;

/// One pattern element.
///
/// A whole pattern is a single `Pat`; bracketed forms nest. The parser
/// guarantees bracket balance and operator attachment; arity and placement
/// rules that need a whole-tree view (one ellipsis per sequence, union
/// capture arity, head restrictions) are enforced when lowering.
#[derive(Debug, Clone, PartialEq)]
pub enum Pat {
    /// `(head child ...)`; element 0 matches the node's type tag.
    Seq(Vec<Pat>),
    /// `{a b}` alternatives, first match wins.
    Union(Vec<Pat>),
    /// `[a b]`, all members against the same candidate.
    Allof(Vec<Pat>),
    /// `!pat`.
    Not(Box<Pat>),
    /// `$pat`.
    Capture(Box<Pat>),
    /// `_` or `_name`; named wildcards unify.
    Wildcard(Option<Arc<str>>),
    /// Bare identifier such as `send`; matches a node by type tag.
    NodeType(Arc<str>),
    /// `:sym`, `"str"`, `42`, `1.5`.
    Lit(Lit),
    /// `name?` or `name?(args)`.
    Pred { name: Arc<str>, args: Vec<CallArg> },
    /// `#name` or `#name(args)`.
    Call { name: Arc<str>, args: Vec<CallArg> },
    /// `%N`; index 0 is the original match target, 1-based indexes are the
    /// caller's extra arguments. Bare `%` is resolved to an index while
    /// parsing.
    Param(usize),
    /// `^pat`, `^^pat`, ...
    Ascend { levels: usize, inner: Box<Pat> },
    /// `...`, only as a direct sequence element.
    Ellipsis,
}

impl Pat {
    #[must_use]
    pub fn not(inner: Pat) -> Pat {
        Pat::Not(Box::new(inner))
    }

    #[must_use]
    pub fn capture(inner: Pat) -> Pat {
        Pat::Capture(Box::new(inner))
    }

    #[must_use]
    pub fn ascend(levels: usize, inner: Pat) -> Pat {
        Pat::Ascend {
            levels,
            inner: Box::new(inner),
        }
    }
}

/// A literal pattern leaf. Distinct from [`Scalar`] because bare `nil` in
/// pattern text is the nil node type, not a literal; scalar nil is matched
/// with the `nil?` predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    Sym(Arc<str>),
    Str(Arc<str>),
    Int(i64),
    Float(f64),
}

impl Lit {
    /// The scalar this literal compares against.
    #[must_use]
    pub fn to_scalar(&self) -> Scalar {
        match self {
            Lit::Sym(name) => Scalar::Sym(Arc::clone(name)),
            Lit::Str(value) => Scalar::Str(Arc::clone(value)),
            Lit::Int(value) => Scalar::Int(*value),
            Lit::Float(value) => Scalar::Float(*value),
        }
    }
}

/// Argument of a predicate or function call: a literal value or a caller
/// parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    Lit(Lit),
    Param(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Lit, Pat};
    use crate::scalar::Scalar;

    #[test]
    fn literal_scalars_compare_structurally() {
        assert_eq!(Lit::Int(3).to_scalar(), Scalar::Int(3));
        assert_eq!(Lit::Sym("inc".into()).to_scalar(), Scalar::sym("inc"));
        assert_eq!(Lit::Float(1.0).to_scalar(), Scalar::Int(1));
    }

    #[test]
    fn helpers_box_their_inner_pattern() {
        let pat = Pat::not(Pat::capture(Pat::Wildcard(None)));
        assert_eq!(
            pat,
            Pat::Not(Box::new(Pat::Capture(Box::new(Pat::Wildcard(None)))))
        );
    }
}
