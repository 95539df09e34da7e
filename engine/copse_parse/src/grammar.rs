//! Recursive-descent grammar over the token stream.

use std::sync::Arc;

use copse_ir::stack::with_headroom;
use copse_ir::{CallArg, InvalidPattern, InvalidPatternKind, Lit, Pat, Span, TokenKind};

use crate::Parser;

fn err(kind: InvalidPatternKind, span: Span) -> InvalidPattern {
    InvalidPattern::new(kind, span)
}

impl Parser<'_> {
    pub(crate) fn parse_pattern(mut self) -> Result<Pat, InvalidPattern> {
        let pat = self.parse_element()?;
        let span = self.cursor.span();
        match self.cursor.peek() {
            TokenKind::Eof => Ok(pat),
            TokenKind::Comma => Err(err(InvalidPatternKind::StrayComma, span)),
            _ => Err(err(InvalidPatternKind::TrailingTokens, span)),
        }
    }

    /// One element, prefix operators included.
    fn parse_element(&mut self) -> Result<Pat, InvalidPattern> {
        with_headroom(|| self.element_inner())
    }

    fn element_inner(&mut self) -> Result<Pat, InvalidPattern> {
        let span = self.cursor.span();
        let kind = self.cursor.peek().clone();
        match kind {
            TokenKind::LParen => {
                self.cursor.bump();
                Ok(Pat::Seq(self.list_body(&TokenKind::RParen, '(', span)?))
            }
            TokenKind::LBrace => {
                self.cursor.bump();
                Ok(Pat::Union(self.list_body(&TokenKind::RBrace, '{', span)?))
            }
            TokenKind::LBracket => {
                self.cursor.bump();
                Ok(Pat::Allof(self.list_body(&TokenKind::RBracket, '[', span)?))
            }
            TokenKind::Bang => {
                self.cursor.bump();
                if matches!(self.cursor.peek(), TokenKind::Ellipsis) {
                    let end = self.cursor.span();
                    return Err(err(InvalidPatternKind::NegatedEllipsis, span.merge(end)));
                }
                Ok(Pat::not(self.prefix_operand('!', span)?))
            }
            TokenKind::Carets(levels) => {
                self.cursor.bump();
                Ok(Pat::ascend(
                    levels as usize,
                    self.prefix_operand('^', span)?,
                ))
            }
            TokenKind::Dollar => {
                self.cursor.bump();
                if matches!(self.cursor.peek(), TokenKind::Ellipsis) {
                    self.cursor.bump();
                    return Ok(Pat::capture(Pat::Ellipsis));
                }
                Ok(Pat::capture(self.prefix_operand('$', span)?))
            }
            TokenKind::Ellipsis => {
                self.cursor.bump();
                Ok(Pat::Ellipsis)
            }
            TokenKind::Wildcard(name) => {
                self.cursor.bump();
                Ok(Pat::Wildcard(name.map(Arc::from)))
            }
            TokenKind::NodeType(name) => {
                self.cursor.bump();
                Ok(Pat::NodeType(Arc::from(name)))
            }
            TokenKind::Pred { name, args_open } => {
                self.cursor.bump();
                let args = if args_open {
                    self.call_args(span)?
                } else {
                    Vec::new()
                };
                Ok(Pat::Pred {
                    name: Arc::from(name),
                    args,
                })
            }
            TokenKind::Call { name, args_open } => {
                self.cursor.bump();
                let args = if args_open {
                    self.call_args(span)?
                } else {
                    Vec::new()
                };
                Ok(Pat::Call {
                    name: Arc::from(name),
                    args,
                })
            }
            TokenKind::Param(index) => {
                self.cursor.bump();
                Ok(Pat::Param(self.resolve_param(index)))
            }
            TokenKind::Sym(name) => {
                self.cursor.bump();
                Ok(Pat::Lit(Lit::Sym(Arc::from(name))))
            }
            TokenKind::Str(value) => {
                self.cursor.bump();
                Ok(Pat::Lit(Lit::Str(Arc::from(value))))
            }
            TokenKind::Int(value) => {
                self.cursor.bump();
                Ok(Pat::Lit(Lit::Int(value)))
            }
            TokenKind::Float(bits) => {
                self.cursor.bump();
                Ok(Pat::Lit(Lit::Float(f64::from_bits(bits))))
            }
            TokenKind::Comma => Err(err(InvalidPatternKind::StrayComma, span)),
            TokenKind::Error => Err(err(InvalidPatternKind::MalformedToken, span)),
            TokenKind::Eof => Err(err(InvalidPatternKind::UnexpectedEnd, span)),
            other @ (TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket) => Err(err(
                InvalidPatternKind::UnexpectedToken(other.to_string().into()),
                span,
            )),
        }
    }

    /// Element after a prefix operator; a close bracket, comma, or end of
    /// input right there means the operator dangles.
    fn prefix_operand(&mut self, op: char, op_span: Span) -> Result<Pat, InvalidPattern> {
        match self.cursor.peek() {
            TokenKind::Eof
            | TokenKind::Comma
            | TokenKind::RParen
            | TokenKind::RBrace
            | TokenKind::RBracket => Err(err(InvalidPatternKind::DanglingPrefix(op), op_span)),
            _ => self.parse_element(),
        }
    }

    /// Elements until `close`. At most one comma may stand between two
    /// elements; an empty group is invalid.
    fn list_body(
        &mut self,
        close: &TokenKind,
        open: char,
        open_span: Span,
    ) -> Result<Vec<Pat>, InvalidPattern> {
        let mut elems = Vec::new();
        let mut pending_comma: Option<Span> = None;
        loop {
            let span = self.cursor.span();
            let kind = self.cursor.peek().clone();
            if kind == *close {
                if let Some(comma) = pending_comma {
                    return Err(err(InvalidPatternKind::StrayComma, comma));
                }
                self.cursor.bump();
                if elems.is_empty() {
                    return Err(err(
                        InvalidPatternKind::EmptyGroup(open),
                        open_span.merge(span),
                    ));
                }
                return Ok(elems);
            }
            match kind {
                TokenKind::Comma => {
                    if elems.is_empty() || pending_comma.is_some() {
                        return Err(err(InvalidPatternKind::StrayComma, span));
                    }
                    pending_comma = Some(span);
                    self.cursor.bump();
                }
                TokenKind::Eof => {
                    return Err(err(
                        InvalidPatternKind::UnexpectedEnd,
                        open_span.merge(span),
                    ));
                }
                _ => {
                    elems.push(self.parse_element()?);
                    pending_comma = None;
                }
            }
        }
    }

    /// Arguments of `name?(` / `#name(`: literals and params only, same
    /// comma rule, closed by `)`. Empty lists are fine.
    fn call_args(&mut self, open_span: Span) -> Result<Vec<CallArg>, InvalidPattern> {
        let mut args = Vec::new();
        let mut pending_comma: Option<Span> = None;
        loop {
            let span = self.cursor.span();
            let kind = self.cursor.peek().clone();
            match kind {
                TokenKind::RParen => {
                    if let Some(comma) = pending_comma {
                        return Err(err(InvalidPatternKind::StrayComma, comma));
                    }
                    self.cursor.bump();
                    return Ok(args);
                }
                TokenKind::Comma => {
                    if args.is_empty() || pending_comma.is_some() {
                        return Err(err(InvalidPatternKind::StrayComma, span));
                    }
                    pending_comma = Some(span);
                    self.cursor.bump();
                }
                TokenKind::Eof => {
                    return Err(err(
                        InvalidPatternKind::UnexpectedEnd,
                        open_span.merge(span),
                    ));
                }
                other => {
                    args.push(self.call_arg(other, span)?);
                    pending_comma = None;
                }
            }
        }
    }

    fn call_arg(&mut self, kind: TokenKind, span: Span) -> Result<CallArg, InvalidPattern> {
        let arg = match kind {
            TokenKind::Sym(name) => CallArg::Lit(Lit::Sym(Arc::from(name))),
            TokenKind::Str(value) => CallArg::Lit(Lit::Str(Arc::from(value))),
            TokenKind::Int(value) => CallArg::Lit(Lit::Int(value)),
            TokenKind::Float(bits) => CallArg::Lit(Lit::Float(f64::from_bits(bits))),
            TokenKind::Param(index) => CallArg::Param(self.resolve_param(index)),
            other => {
                return Err(err(
                    InvalidPatternKind::UnexpectedToken(other.to_string().into()),
                    span,
                ));
            }
        };
        self.cursor.bump();
        Ok(arg)
    }

    fn resolve_param(&mut self, index: Option<u32>) -> usize {
        match index {
            Some(explicit) => explicit as usize,
            None => {
                self.implicit_param += 1;
                self.implicit_param as usize
            }
        }
    }
}
