//! Parses lexed pattern tokens into the pattern AST.
//!
//! The parser owns bracket balance, prefix-operator attachment, the comma
//! rule, and the one-pattern-per-string rule. Placement rules needing a
//! whole-tree view (ellipsis position, union capture arity, head
//! restrictions) are left to the lowering step, which sees the finished
//! AST.
//!
//! Comma rule: a comma is insignificant separator noise only when exactly
//! one stands between two elements of a bracketed list. Leading, trailing,
//! doubled, and top-level commas are invalid.

mod cursor;
mod grammar;


use copse_ir::{InvalidPattern, InvalidPatternKind, Pat, Span, Token};
use tracing::trace;

use crate::cursor::Cursor;

/// Parses a complete pattern: exactly one element, then end of input.
pub fn parse(tokens: &[Token]) -> Result<Pat, InvalidPattern> {
    if tokens.is_empty() {
        return Err(InvalidPattern::new(
            InvalidPatternKind::UnexpectedEnd,
            Span::new(0, 0),
        ));
    }
    trace!(tokens = tokens.len(), "parsing pattern");
    Parser::new(tokens).parse_pattern()
}

struct Parser<'t> {
    cursor: Cursor<'t>,
    /// Next index handed to a bare `%`; counts independently of explicit
    /// `%N` references.
    implicit_param: u32,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            implicit_param: 0,
        }
    }
}
