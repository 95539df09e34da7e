//! Lowering from the pattern AST to the matcher tree.
//!
//! Slot allocation happens here, in pattern source order, which is what
//! fixes the public capture indices. Validation the grammar cannot
//! express also lives here: every error is reported before any pattern
//! is accepted for evaluation, so a [`CompiledPattern`] never fails
//! structurally at match time.

use std::sync::Arc;

use copse_ir::stack::with_headroom;
use copse_ir::{CallArg, InvalidPattern, InvalidPatternKind, Pat, Scalar, Span};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::builtins::Builtin;
use crate::matcher::{ArgSource, Matcher, Mid, SeqHead};

/// A pattern lowered to its executable form.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPattern {
    root: Matcher,
    binds: usize,
    captures: usize,
}

impl CompiledPattern {
    pub(crate) fn root(&self) -> &Matcher {
        &self.root
    }

    pub(crate) fn bind_slots(&self) -> usize {
        self.binds
    }

    /// Number of capture slots a successful match will fill.
    #[must_use]
    pub fn capture_slots(&self) -> usize {
        self.captures
    }
}

/// Lowers a parsed pattern, rejecting structures the grammar admits but
/// the matcher cannot run.
///
/// # Errors
///
/// Returns [`InvalidPattern`] for misplaced or doubled ellipses, a
/// sequence in head position, captures under negation, and union
/// branches that disagree on capture count.
pub fn compile(pat: &Pat) -> Result<CompiledPattern, InvalidPattern> {
    let mut lowerer = Lowerer::default();
    let root = lowerer.lower(pat, Mode::Value)?;
    debug!(
        captures = lowerer.captures,
        binds = lowerer.binds.len(),
        "lowered pattern"
    );
    Ok(CompiledPattern {
        root,
        binds: lowerer.binds.len(),
        captures: lowerer.captures,
    })
}

fn err(kind: InvalidPatternKind) -> InvalidPattern {
    InvalidPattern::new(kind, Span::DUMMY)
}

/// Position being lowered for, which decides what a type name means.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// A child value or the whole target node.
    Value,
    /// A sequence head, matching the node's type tag as a symbol.
    Head,
}

#[derive(Default)]
struct Lowerer {
    /// Named wildcards share one namespace across the whole pattern.
    binds: FxHashMap<Arc<str>, usize>,
    captures: usize,
}

impl Lowerer {
    fn lower(&mut self, pat: &Pat, mode: Mode) -> Result<Matcher, InvalidPattern> {
        with_headroom(|| self.lower_inner(pat, mode))
    }

    fn lower_inner(&mut self, pat: &Pat, mode: Mode) -> Result<Matcher, InvalidPattern> {
        match pat {
            Pat::Seq(elems) => {
                if mode == Mode::Head {
                    return Err(err(InvalidPatternKind::HeadSequence));
                }
                self.lower_seq(elems)
            }
            Pat::Union(alts) => self.lower_union(alts, mode),
            Pat::Allof(members) => {
                let members = members
                    .iter()
                    .map(|member| self.lower(member, mode))
                    .collect::<Result<_, _>>()?;
                Ok(Matcher::Allof(members))
            }
            Pat::Not(inner) => {
                let before = self.captures;
                let matcher = self.lower(inner, mode)?;
                if self.captures != before {
                    return Err(err(InvalidPatternKind::NegatedCapture));
                }
                Ok(Matcher::Not(Box::new(matcher)))
            }
            Pat::Capture(inner) => {
                if matches!(**inner, Pat::Ellipsis) {
                    // `$...` is positional; only a sequence can host it.
                    return Err(err(InvalidPatternKind::MisplacedEllipsis));
                }
                let slot = self.captures;
                self.captures += 1;
                let inner = self.lower(inner, mode)?;
                Ok(Matcher::Capture {
                    slot,
                    inner: Box::new(inner),
                })
            }
            Pat::Wildcard(None) => Ok(Matcher::Wildcard),
            Pat::Wildcard(Some(name)) => {
                let next = self.binds.len();
                let slot = *self.binds.entry(Arc::clone(name)).or_insert(next);
                Ok(Matcher::Unify(slot))
            }
            Pat::NodeType(name) => Ok(match mode {
                Mode::Head => Matcher::Lit(Scalar::Sym(Arc::clone(name))),
                Mode::Value => Matcher::Kind(Arc::clone(name)),
            }),
            Pat::Lit(lit) => Ok(Matcher::Lit(lit.to_scalar())),
            Pat::Pred { name, args } => {
                let args = lower_args(args);
                Ok(match Builtin::resolve(name) {
                    Some(builtin) => Matcher::Pred { builtin, args },
                    None => Matcher::External {
                        name: Arc::clone(name),
                        args,
                    },
                })
            }
            Pat::Call { name, args } => Ok(Matcher::External {
                name: Arc::clone(name),
                args: lower_args(args),
            }),
            Pat::Param(index) => Ok(Matcher::Param(*index)),
            Pat::Ascend { levels, inner } => {
                let inner = self.lower(inner, Mode::Value)?;
                Ok(Matcher::Ascend {
                    levels: *levels,
                    inner: Box::new(inner),
                })
            }
            Pat::Ellipsis => Err(err(InvalidPatternKind::MisplacedEllipsis)),
        }
    }

    fn lower_seq(&mut self, elems: &[Pat]) -> Result<Matcher, InvalidPattern> {
        let mut head = None;
        let mut pre = Vec::new();
        let mut mid = Mid::Exact;
        let mut post = Vec::new();
        for (index, elem) in elems.iter().enumerate() {
            let ellipsis = match elem {
                Pat::Ellipsis => Some(None),
                Pat::Capture(inner) if matches!(**inner, Pat::Ellipsis) => {
                    let slot = self.captures;
                    self.captures += 1;
                    Some(Some(slot))
                }
                _ => None,
            };
            if let Some(slot) = ellipsis {
                if mid != Mid::Exact {
                    return Err(err(InvalidPatternKind::DoubledEllipsis));
                }
                mid = match slot {
                    Some(slot) => Mid::Capture(slot),
                    None => Mid::Skip,
                };
                if index == 0 {
                    head = Some(SeqHead::Elided);
                }
                continue;
            }
            if index == 0 {
                let matcher = self.lower(elem, Mode::Head)?;
                head = Some(match matcher {
                    Matcher::Lit(Scalar::Sym(kind)) => SeqHead::Kind(kind),
                    other => SeqHead::Free(Box::new(other)),
                });
            } else if mid == Mid::Exact {
                pre.push(self.lower(elem, Mode::Value)?);
            } else {
                post.push(self.lower(elem, Mode::Value)?);
            }
        }
        let Some(head) = head else {
            return Err(err(InvalidPatternKind::EmptyGroup('(')));
        };
        Ok(Matcher::Seq { head, pre, mid, post })
    }

    /// Branches reuse one capture slot range, so they must allocate the
    /// same number of slots for the indices to mean anything.
    fn lower_union(&mut self, alts: &[Pat], mode: Mode) -> Result<Matcher, InvalidPattern> {
        let base = self.captures;
        let mut lowered = Vec::with_capacity(alts.len());
        let mut arity = None;
        for alt in alts {
            self.captures = base;
            lowered.push(self.lower(alt, mode)?);
            let grew = self.captures - base;
            match arity {
                None => arity = Some(grew),
                Some(expected) if expected != grew => {
                    return Err(err(InvalidPatternKind::UnionArityMismatch));
                }
                Some(_) => {}
            }
        }
        Ok(Matcher::Union(lowered))
    }
}

fn lower_args(args: &[CallArg]) -> Vec<ArgSource> {
    args.iter()
        .map(|arg| match arg {
            CallArg::Lit(lit) => ArgSource::Lit(lit.to_scalar()),
            CallArg::Param(index) => ArgSource::Param(*index),
        })
        .collect()
}
