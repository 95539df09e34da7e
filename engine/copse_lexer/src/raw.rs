//! Raw token definitions driven by logos.
//!
//! Shapes only; payload cooking (hyphen normalization, prefix stripping,
//! float bit-packing) happens in [`convert`](crate::convert). Two lexical
//! rules worth calling out:
//!
//! - `name?(` and `#name(` with the paren ADJACENT are single tokens, so
//!   that `equal?(%1)` opens an argument list while `equal? (%1)` is a
//!   predicate followed by a new sequence.
//! - There is no standalone `-`; signs are part of number literals, and
//!   hyphens inside identifiers belong to node-type names like `op-asgn`.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("!")]
    Bang,
    #[token("$")]
    Dollar,
    #[token(",")]
    Comma,
    #[token("...")]
    Ellipsis,

    /// One token per run; the count is the ascent level.
    #[regex(r"\^+")]
    Carets,

    #[token("_")]
    Wildcard,
    #[regex(r"_[a-zA-Z0-9_]+")]
    NamedWildcard,

    /// Node-type name; interior hyphens allowed.
    #[regex(r"[a-z][a-zA-Z0-9_-]*")]
    Ident,

    #[regex(r"[a-z_][a-zA-Z0-9_]*\?")]
    Pred,
    #[regex(r"[a-z_][a-zA-Z0-9_]*\?\(")]
    PredOpen,

    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_]*[?!]?")]
    Call,
    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_]*[?!]?\(")]
    CallOpen,

    #[token("%")]
    Param,
    #[regex(r"%\d+", |lex| lex.slice()[1..].parse::<u32>().ok())]
    ParamN(u32),

    /// Word, bracket-index, and operator symbols.
    #[regex(r":[a-zA-Z_][a-zA-Z0-9_]*[?!=]?")]
    #[regex(r":\[\]=?")]
    #[regex(r":[+\-*/%<>=!~&|^]+")]
    Sym,

    /// Either quote style; equality is on content.
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Str,

    #[regex(r"[-+]?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),
    #[regex(r"[-+]?[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),
}
