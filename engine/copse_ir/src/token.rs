//! Lexed pattern tokens.

use std::fmt;

use crate::span::Span;

/// One token of pattern source, with its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// What a token is, payloads already cooked.
///
/// `Display` renders the canonical spelling; the façade's
/// whitespace-insensitive equality compares patterns by this rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Bang,
    Dollar,
    Comma,
    Ellipsis,
    /// A run of `^`, one per ancestor level.
    Carets(u32),
    /// `_` or `_name` (name stored without the underscore).
    Wildcard(Option<Box<str>>),
    /// Bare lowercase identifier; hyphens already normalized to
    /// underscores.
    NodeType(Box<str>),
    /// `name?`, question mark stripped. `args_open` records an adjacent
    /// `(`, which opens the predicate's argument list; a space before `(`
    /// starts an unrelated sequence instead.
    Pred { name: Box<str>, args_open: bool },
    /// `#name`, hash stripped, same `args_open` rule as [`TokenKind::Pred`].
    Call { name: Box<str>, args_open: bool },
    /// `%` (implicit index) or `%N`.
    Param(Option<u32>),
    Sym(Box<str>),
    Str(Box<str>),
    Int(i64),
    /// Bit representation of the `f64`, keeping this type `Eq + Hash`.
    Float(u64),
    /// Input the lexer did not recognize; the parser reports it.
    Error,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::Bang => f.write_str("!"),
            TokenKind::Dollar => f.write_str("$"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Ellipsis => f.write_str("..."),
            TokenKind::Carets(n) => {
                for _ in 0..*n {
                    f.write_str("^")?;
                }
                Ok(())
            }
            TokenKind::Wildcard(None) => f.write_str("_"),
            TokenKind::Wildcard(Some(name)) => write!(f, "_{name}"),
            TokenKind::NodeType(name) => f.write_str(name),
            TokenKind::Pred { name, args_open } => {
                write!(f, "{name}?{}", if *args_open { "(" } else { "" })
            }
            TokenKind::Call { name, args_open } => {
                write!(f, "#{name}{}", if *args_open { "(" } else { "" })
            }
            TokenKind::Param(None) => f.write_str("%"),
            TokenKind::Param(Some(n)) => write!(f, "%{n}"),
            TokenKind::Sym(name) => write!(f, ":{name}"),
            TokenKind::Str(value) => write!(f, "\"{value}\""),
            TokenKind::Int(value) => write!(f, "{value}"),
            TokenKind::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            TokenKind::Error => f.write_str("<error>"),
            TokenKind::Eof => Ok(()),
        }
    }
}
