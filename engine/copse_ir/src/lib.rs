//! Shared data types for the copse pattern engine.
//!
//! Everything the pipeline crates agree on lives here: byte [`Span`]s, the
//! [`Scalar`] leaf values of host trees, lexer [`Token`]s, the pattern AST
//! ([`Pat`]), the [`TreeNode`] capability trait through which candidate
//! trees are consumed, and the [`InvalidPattern`] error surfaced when a
//! pattern fails to compile.

pub mod error;
pub mod pat;
pub mod scalar;
pub mod sexp;
pub mod span;
pub mod stack;
pub mod token;
pub mod tree;

pub use error::{InvalidPattern, InvalidPatternKind};
pub use pat::{CallArg, Lit, Pat};
pub use scalar::Scalar;
pub use sexp::{Elem, SexpNode, SexpTree};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tree::{Child, TreeNode};
