//! Token cursor.

use copse_ir::{Span, Token, TokenKind};

/// Read position over a lexed token list.
///
/// The list is expected to end with [`TokenKind::Eof`] (the lexer
/// guarantees it); the cursor clamps there, so peeking past the end keeps
/// returning `Eof`.
pub(crate) struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        debug_assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "token list must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    fn clamped(&self) -> usize {
        self.pos.min(self.tokens.len().saturating_sub(1))
    }

    #[inline]
    pub(crate) fn peek(&self) -> &TokenKind {
        &self.tokens[self.clamped()].kind
    }

    #[inline]
    pub(crate) fn span(&self) -> Span {
        self.tokens[self.clamped()].span
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }
}
