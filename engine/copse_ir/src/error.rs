//! The one error the engine raises: a pattern that fails to compile.

use thiserror::Error;

use crate::span::Span;

/// Why a pattern string was rejected.
///
/// Everything here is detected while lexing, parsing, or lowering the
/// pattern; matching itself never errors, it only declines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPatternKind {
    #[error("unexpected `{0}`")]
    UnexpectedToken(Box<str>),
    #[error("pattern ended before an element completed")]
    UnexpectedEnd,
    #[error("empty `{0}` group")]
    EmptyGroup(char),
    #[error("`{0}` must be followed by an element")]
    DanglingPrefix(char),
    #[error("`...` cannot be negated")]
    NegatedEllipsis,
    #[error("`...` is only valid inside a sequence")]
    MisplacedEllipsis,
    #[error("a sequence may contain at most one `...`")]
    DoubledEllipsis,
    #[error("a comma may only separate two elements")]
    StrayComma,
    #[error("a sequence cannot open with a nested sequence")]
    HeadSequence,
    #[error("`$` captures are not allowed inside `!`")]
    NegatedCapture,
    #[error("union alternatives bind different numbers of captures")]
    UnionArityMismatch,
    #[error("extra input after the pattern")]
    TrailingTokens,
    #[error("unrecognized token")]
    MalformedToken,
}

/// A pattern string that does not compile.
///
/// `span` is the byte range of the offending text, or [`Span::DUMMY`] for
/// structural checks performed after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pattern: {kind}")]
pub struct InvalidPattern {
    pub kind: InvalidPatternKind,
    pub span: Span,
}

impl InvalidPattern {
    #[must_use]
    pub fn new(kind: InvalidPatternKind, span: Span) -> Self {
        InvalidPattern { kind, span }
    }
}
