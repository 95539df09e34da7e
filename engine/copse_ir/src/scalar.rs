//! Leaf values of host syntax trees.

use std::sync::Arc;

/// A non-node child of a syntax node: the scalar literals trees carry
/// directly, without a wrapping node.
///
/// String payloads are `Arc<str>` so cloning a scalar out of a tree is a
/// refcount bump.
#[derive(Debug, Clone)]
pub enum Scalar {
    Nil,
    Sym(Arc<str>),
    Str(Arc<str>),
    Int(i64),
    Float(f64),
}

impl Scalar {
    #[must_use]
    pub fn sym(name: &str) -> Self {
        Scalar::Sym(Arc::from(name))
    }

    #[must_use]
    pub fn string(value: &str) -> Self {
        Scalar::Str(Arc::from(value))
    }
}

/// Equality is structural, with one numeric wrinkle: `Int` and `Float`
/// compare by value across the two variants, so `1` equals `1.0`. `NaN`
/// equals nothing, itself included.
impl PartialEq for Scalar {
    #[allow(
        clippy::cast_precision_loss,
        clippy::float_cmp,
        reason = "literal equality across numeric variants is by value"
    )]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Nil, Scalar::Nil) => true,
            (Scalar::Sym(a), Scalar::Sym(b)) | (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Int(i), Scalar::Float(f)) | (Scalar::Float(f), Scalar::Int(i)) => {
                (*i as f64) == *f
            }
            _ => false,
        }
    }
}
