//! Matcher combinators and their evaluation.

use std::sync::Arc;

use copse_ir::stack::with_headroom;
use copse_ir::tree::child_eq;
use copse_ir::{Child, Scalar, TreeNode};
use smallvec::SmallVec;

use crate::builtins::Builtin;
use crate::capability::CapabilityTable;
use crate::compile::CompiledPattern;
use crate::env::{Captured, Captures, Env};

/// Argument of a predicate or capability call, evaluated per invocation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArgSource {
    Lit(Scalar),
    /// Index into the caller's parameters; `0` is the match target.
    Param(usize),
}

/// What a sequence requires of the node's type tag.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SeqHead {
    /// The common fast path: head was a literal type name.
    Kind(Arc<str>),
    /// Any other head element, evaluated against the tag as a symbol.
    Free(Box<Matcher>),
    /// An ellipsis stood first, so any tag is fine.
    Elided,
}

/// How a sequence treats children between its anchored prefix and suffix.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mid {
    /// No ellipsis: the child count must match exactly.
    Exact,
    /// `...`: any number of middle children.
    Skip,
    /// `$...`: the middle children are recorded into a capture slot.
    Capture(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Matcher {
    Seq {
        head: SeqHead,
        pre: Vec<Matcher>,
        mid: Mid,
        post: Vec<Matcher>,
    },
    Union(Vec<Matcher>),
    Allof(Vec<Matcher>),
    Not(Box<Matcher>),
    Capture { slot: usize, inner: Box<Matcher> },
    Wildcard,
    /// Named wildcard: first sight binds the slot, later sights must be
    /// structurally equal to it.
    Unify(usize),
    /// A type name in child position matches a whole node of that kind.
    Kind(Arc<str>),
    Lit(Scalar),
    Pred {
        builtin: Builtin,
        args: Vec<ArgSource>,
    },
    /// A `#function` or a predicate with no builtin, resolved against the
    /// capability table at evaluation time.
    External {
        name: Arc<str>,
        args: Vec<ArgSource>,
    },
    /// Structural equality against a caller parameter; `0` is the target.
    Param(usize),
    Ascend { levels: usize, inner: Box<Matcher> },
}

/// Per-invocation inputs shared by every combinator.
pub(crate) struct EvalContext<'a, N: TreeNode> {
    pub(crate) target: &'a Child<N>,
    pub(crate) params: &'a [Child<N>],
    pub(crate) capabilities: Option<&'a CapabilityTable<N>>,
}

impl Matcher {
    /// Evaluates against one candidate child. `None` means non-match; a
    /// returned environment carries whatever was bound along the way.
    pub(crate) fn eval<N: TreeNode>(
        &self,
        candidate: &Child<N>,
        env: Env<N>,
        cx: &EvalContext<'_, N>,
    ) -> Option<Env<N>> {
        with_headroom(|| self.eval_inner(candidate, env, cx))
    }

    fn eval_inner<N: TreeNode>(
        &self,
        candidate: &Child<N>,
        env: Env<N>,
        cx: &EvalContext<'_, N>,
    ) -> Option<Env<N>> {
        match self {
            Matcher::Wildcard => Some(env),
            Matcher::Lit(value) => {
                matches!(candidate, Child::Value(v) if v == value).then_some(env)
            }
            Matcher::Kind(kind) => {
                matches!(candidate, Child::Node(node) if node.kind() == &**kind).then_some(env)
            }
            Matcher::Unify(slot) => match env.bound(*slot).cloned() {
                Some(previous) => child_eq(&previous, candidate).then_some(env),
                None => {
                    let mut env = env;
                    env.bind(*slot, candidate.clone());
                    Some(env)
                }
            },
            Matcher::Capture { slot, inner } => {
                let mut env = inner.eval(candidate, env, cx)?;
                env.record(*slot, Captured::Value(candidate.clone()));
                Some(env)
            }
            Matcher::Not(inner) => match inner.eval(candidate, env.clone(), cx) {
                Some(_) => None,
                None => Some(env),
            },
            Matcher::Union(alts) => {
                for alt in alts {
                    if let Some(env) = alt.eval(candidate, env.clone(), cx) {
                        return Some(env);
                    }
                }
                None
            }
            Matcher::Allof(members) => {
                let mut env = env;
                for member in members {
                    env = member.eval(candidate, env, cx)?;
                }
                Some(env)
            }
            Matcher::Param(index) => {
                let expected = if *index == 0 {
                    cx.target
                } else {
                    cx.params.get(*index - 1)?
                };
                child_eq(candidate, expected).then_some(env)
            }
            Matcher::Pred { builtin, args } => {
                let args = resolve_args(args, cx)?;
                builtin.eval(candidate, &args).then_some(env)
            }
            Matcher::External { name, args } => {
                let args = resolve_args(args, cx)?;
                let Some(table) = cx.capabilities else {
                    panic!("pattern calls capability `{name}` but none were provided");
                };
                let Some(capability) = table.lookup(name) else {
                    panic!("pattern calls capability `{name}` but it is not registered");
                };
                capability(candidate, &args).then_some(env)
            }
            Matcher::Ascend { levels, inner } => {
                let Child::Node(node) = candidate else {
                    return None;
                };
                let mut node = node.clone();
                for _ in 0..*levels {
                    node = node.parent()?;
                }
                inner.eval(&Child::Node(node), env, cx)
            }
            Matcher::Seq { head, pre, mid, post } => {
                eval_seq(head, pre, mid, post, candidate, env, cx)
            }
        }
    }
}

fn eval_seq<N: TreeNode>(
    head: &SeqHead,
    pre: &[Matcher],
    mid: &Mid,
    post: &[Matcher],
    candidate: &Child<N>,
    env: Env<N>,
    cx: &EvalContext<'_, N>,
) -> Option<Env<N>> {
    let Child::Node(node) = candidate else {
        return None;
    };
    let count = node.child_count();
    match mid {
        Mid::Exact => {
            debug_assert!(post.is_empty(), "exact sequences put every child in the prefix");
            if count != pre.len() {
                return None;
            }
        }
        Mid::Skip | Mid::Capture(_) => {
            if count < pre.len() + post.len() {
                return None;
            }
        }
    }
    let mut env = match head {
        SeqHead::Kind(kind) => {
            if node.kind() != &**kind {
                return None;
            }
            env
        }
        SeqHead::Free(matcher) => {
            matcher.eval(&Child::Value(Scalar::sym(node.kind())), env, cx)?
        }
        SeqHead::Elided => env,
    };
    for (index, matcher) in pre.iter().enumerate() {
        env = matcher.eval(&node.child(index)?, env, cx)?;
    }
    if let Mid::Capture(slot) = mid {
        let middle = (pre.len()..count - post.len())
            .map(|index| node.child(index))
            .collect::<Option<Vec<_>>>()?;
        env.record(*slot, Captured::List(middle));
    }
    let base = count - post.len();
    for (offset, matcher) in post.iter().enumerate() {
        env = matcher.eval(&node.child(base + offset)?, env, cx)?;
    }
    Some(env)
}

fn resolve_args<N: TreeNode>(
    args: &[ArgSource],
    cx: &EvalContext<'_, N>,
) -> Option<SmallVec<[Child<N>; 2]>> {
    args.iter()
        .map(|arg| match arg {
            ArgSource::Lit(value) => Some(Child::Value(value.clone())),
            ArgSource::Param(index) => {
                if *index == 0 {
                    Some(cx.target.clone())
                } else {
                    cx.params.get(*index - 1).cloned()
                }
            }
        })
        .collect()
}

impl CompiledPattern {
    /// Runs the pattern against `node`. `None` is an ordinary non-match;
    /// on success the captures come back in pattern source order.
    ///
    /// # Panics
    ///
    /// Panics if the pattern calls a capability that `capabilities` does
    /// not supply. That is a host wiring bug, not a data condition, and
    /// only unknown names the evaluation actually reaches trip it.
    pub fn evaluate<N: TreeNode>(
        &self,
        node: &N,
        params: &[Child<N>],
        capabilities: Option<&CapabilityTable<N>>,
    ) -> Option<Captures<N>> {
        let target = Child::Node(node.clone());
        let cx = EvalContext {
            target: &target,
            params,
            capabilities,
        };
        let env = self.root().eval(&target, Env::new(self.bind_slots(), self.capture_slots()), &cx)?;
        Some(env.into_captures())
    }
}
