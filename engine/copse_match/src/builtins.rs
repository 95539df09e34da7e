//! Predicates the engine evaluates natively.

use std::cmp::Ordering;

use copse_ir::tree::child_eq;
use copse_ir::{Child, Scalar, TreeNode};

/// A predicate name resolved at lowering time.
///
/// Builtins are total over the value domain: asked about a value outside
/// their domain they decline rather than error, so `odd?` against a
/// string is an ordinary non-match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Builtin {
    /// True only for the literal nil value, never for a node.
    Nil,
    Odd,
    Even,
    Zero,
    /// Structural equality against the first argument.
    Equal,
    /// Inclusive range check against two arguments.
    Between,
    /// `send_type?` and every other `<kind>_type?` form.
    KindIs(Box<str>),
}

impl Builtin {
    /// Resolves a predicate name (without the `?`); `None` defers to the
    /// capability table.
    pub(crate) fn resolve(name: &str) -> Option<Builtin> {
        match name {
            "nil" => Some(Builtin::Nil),
            "odd" => Some(Builtin::Odd),
            "even" => Some(Builtin::Even),
            "zero" => Some(Builtin::Zero),
            "equal" => Some(Builtin::Equal),
            "between" => Some(Builtin::Between),
            _ => name.strip_suffix("_type").map(|kind| Builtin::KindIs(kind.into())),
        }
    }

    pub(crate) fn eval<N: TreeNode>(&self, candidate: &Child<N>, args: &[Child<N>]) -> bool {
        match self {
            Builtin::Nil => matches!(candidate, Child::Value(Scalar::Nil)),
            Builtin::Odd => int_of(candidate).is_some_and(|i| i.rem_euclid(2) == 1),
            Builtin::Even => int_of(candidate).is_some_and(|i| i.rem_euclid(2) == 0),
            Builtin::Zero => matches!(candidate, Child::Value(value) if *value == Scalar::Int(0)),
            Builtin::Equal => args.first().is_some_and(|arg| child_eq(candidate, arg)),
            Builtin::Between => match (args.first(), args.get(1)) {
                (Some(lo), Some(hi)) => {
                    matches!(child_cmp(candidate, lo), Some(Ordering::Greater | Ordering::Equal))
                        && matches!(child_cmp(candidate, hi), Some(Ordering::Less | Ordering::Equal))
                }
                _ => false,
            },
            Builtin::KindIs(kind) => {
                matches!(candidate, Child::Node(node) if node.kind() == &**kind)
            }
        }
    }
}

fn int_of<N: TreeNode>(candidate: &Child<N>) -> Option<i64> {
    match candidate {
        Child::Value(Scalar::Int(i)) => Some(*i),
        _ => None,
    }
}

/// Ordering between two children where one exists: numbers compare across
/// the int/float divide, strings and symbols lexically within their own
/// class, everything else not at all.
#[allow(
    clippy::cast_precision_loss,
    reason = "range comparison across numeric variants is by value"
)]
fn child_cmp<N: TreeNode>(a: &Child<N>, b: &Child<N>) -> Option<Ordering> {
    let (Child::Value(a), Child::Value(b)) = (a, b) else {
        return None;
    };
    match (a, b) {
        (Scalar::Int(x), Scalar::Int(y)) => Some(x.cmp(y)),
        (Scalar::Float(x), Scalar::Float(y)) => x.partial_cmp(y),
        (Scalar::Int(x), Scalar::Float(y)) => (*x as f64).partial_cmp(y),
        (Scalar::Float(x), Scalar::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Scalar::Str(x), Scalar::Str(y)) | (Scalar::Sym(x), Scalar::Sym(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
