//! Raw-to-cooked token conversion.

use copse_ir::TokenKind;

use crate::raw::RawToken;

/// Cooks a raw token into its [`TokenKind`], using the matched `slice` for
/// payload extraction.
pub(crate) fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Dollar => TokenKind::Dollar,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Carets => {
            TokenKind::Carets(u32::try_from(slice.len()).unwrap_or(u32::MAX))
        }
        RawToken::Wildcard => TokenKind::Wildcard(None),
        RawToken::NamedWildcard => TokenKind::Wildcard(Some(slice[1..].into())),
        RawToken::Ident => TokenKind::NodeType(normalize_kind(slice)),
        RawToken::Pred => TokenKind::Pred {
            name: slice.strip_suffix('?').unwrap_or(slice).into(),
            args_open: false,
        },
        RawToken::PredOpen => TokenKind::Pred {
            name: slice.strip_suffix("?(").unwrap_or(slice).into(),
            args_open: true,
        },
        RawToken::Call => TokenKind::Call {
            name: slice.strip_prefix('#').unwrap_or(slice).into(),
            args_open: false,
        },
        RawToken::CallOpen => {
            let name = slice.strip_prefix('#').unwrap_or(slice);
            TokenKind::Call {
                name: name.strip_suffix('(').unwrap_or(name).into(),
                args_open: true,
            }
        }
        RawToken::Param => TokenKind::Param(None),
        RawToken::ParamN(index) => TokenKind::Param(Some(index)),
        RawToken::Sym => TokenKind::Sym(slice[1..].into()),
        RawToken::Str => TokenKind::Str(slice[1..slice.len() - 1].into()),
        RawToken::Int(value) => TokenKind::Int(value),
        RawToken::Float(value) => TokenKind::Float(value.to_bits()),
    }
}

/// Pattern text spells some node types with hyphens (`op-asgn`); trees
/// spell them with underscores. Normalized here once so every later stage
/// compares one spelling.
fn normalize_kind(name: &str) -> Box<str> {
    if name.contains('-') {
        name.replace('-', "_").into()
    } else {
        name.into()
    }
}
