//! Pattern-string tokenizer.
//!
//! [`lex`] never fails: lexically malformed input comes back as
//! [`TokenKind::Error`] tokens carrying their span, and the parser turns
//! those into [`InvalidPattern`](copse_ir::InvalidPattern) reports. The
//! token list always ends with [`TokenKind::Eof`].

mod convert;
mod raw;


use copse_ir::{Span, Token, TokenKind};
use logos::Logos;

use crate::convert::convert_token;
use crate::raw::RawToken;

/// Tokenizes one pattern string.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);
    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let kind = match result {
            Ok(raw) => convert_token(raw, lexer.slice()),
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token::new(kind, span));
    }
    tokens.push(Token::new(
        TokenKind::Eof,
        Span::from_range(source.len()..source.len()),
    ));
    tokens
}
