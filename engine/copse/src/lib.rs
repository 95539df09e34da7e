//! Pattern-based structural search over syntax trees.
//!
//! A [`NodePattern`] is compiled once from a small s-expression-like
//! string and then run against any tree whose nodes implement
//! [`TreeNode`]:
//!
//! ```
//! use copse::{sexp, NodePattern};
//!
//! // matches a `.inc` call on any integer literal
//! let pattern = NodePattern::new("(send (int $_) :inc)")?;
//!
//! let tree = sexp!((send (int 5) :inc));
//! assert!(pattern.matches(&tree.root()));
//! # Ok::<(), copse::InvalidPattern>(())
//! ```
//!
//! Pattern syntax, briefly:
//!
//! - `(send _ :inc)` is a node: the head matches the type tag, the rest
//!   match the children, one each, in order
//! - `{a b}` any of, `[a b]` all of, `!a` anything but
//! - `_` matches anything; `_name` matches the same thing at every sight
//! - `$a` captures what `a` matched; `...` skips any children; `$...`
//!   captures the skipped children
//! - `:sym`, `"str"`, `42`, `1.5` match literal children; `nil` is the
//!   nil node type, the nil value is matched by `nil?`
//! - `odd?`, `between?(1 10)`, `send_type?` are built in; `pure?` and
//!   `#pure` defer to a [`CapabilityTable`]
//! - `%1` compares against a caller argument, `^a` matches when the
//!   parent matches `a`
//!
//! Compiling is the only fallible step. Matching never errors; it
//! declines. Equality of two patterns ignores whitespace and comma
//! noise, and serde persists a pattern as its source string, so a
//! pattern survives any format round-trip with behavior intact.

mod cache;

#[cfg(test)]
mod tests;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use copse_ir::{Token, TokenKind};
use copse_lexer::lex;
use copse_match::compile;
use copse_parse::parse;

pub use cache::PatternCache;
pub use copse_ir::sexp;
pub use copse_ir::{
    Child, Elem, InvalidPattern, InvalidPatternKind, Scalar, SexpNode, SexpTree, Span, TreeNode,
};
pub use copse_match::{Capability, CapabilityTable, Captured, Captures, CompiledPattern};

#[derive(Debug)]
struct PatternCore {
    source: Box<str>,
    /// Token text joined with single spaces, commas dropped; the basis of
    /// equality and hashing.
    canonical: Box<str>,
    program: CompiledPattern,
}

/// A compiled pattern, ready to run against any [`TreeNode`] tree.
///
/// Cloning shares the compiled innards, so handing patterns around is
/// cheap.
#[derive(Debug, Clone)]
pub struct NodePattern {
    core: Arc<PatternCore>,
}

impl NodePattern {
    /// Compiles `source`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern`] when the text does not lex, parse, or
    /// lower; nothing about a pattern can fail later than here.
    pub fn new(source: &str) -> Result<Self, InvalidPattern> {
        let tokens = lex(source);
        let pat = parse(&tokens)?;
        let program = compile(&pat)?;
        let canonical = canonical_text(&tokens);
        trace!(pattern = source, "compiled pattern");
        Ok(NodePattern {
            core: Arc::new(PatternCore {
                source: source.into(),
                canonical: canonical.into(),
                program,
            }),
        })
    }

    /// The source string the pattern was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.core.source
    }

    /// Number of captures a successful match yields.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.core.program.capture_slots()
    }

    /// Whether the pattern matches `node`, captures discarded.
    #[must_use]
    pub fn matches<N: TreeNode>(&self, node: &N) -> bool {
        self.core.program.evaluate(node, &[], None).is_some()
    }

    /// Runs the pattern against `node`. `params` back the `%N` elements,
    /// compared structurally; `%1` is `params[0]`.
    ///
    /// # Panics
    ///
    /// Panics if evaluation reaches a predicate or `#function` that is
    /// neither built in nor supplied; use [`match_node_with`] to supply
    /// capabilities.
    ///
    /// [`match_node_with`]: NodePattern::match_node_with
    pub fn match_node<N: TreeNode>(&self, node: &N, params: &[Child<N>]) -> Option<Captures<N>> {
        self.core.program.evaluate(node, params, None)
    }

    /// [`match_node`](NodePattern::match_node) with host capabilities
    /// resolvable.
    pub fn match_node_with<N: TreeNode>(
        &self,
        node: &N,
        params: &[Child<N>],
        capabilities: &CapabilityTable<N>,
    ) -> Option<Captures<N>> {
        self.core.program.evaluate(node, params, Some(capabilities))
    }

    /// Calls `f` with the captures on success.
    pub fn match_then<N: TreeNode, R>(
        &self,
        node: &N,
        params: &[Child<N>],
        f: impl FnOnce(Captures<N>) -> R,
    ) -> Option<R> {
        self.match_node(node, params).map(f)
    }
}

impl fmt::Display for NodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.core.source)
    }
}

impl FromStr for NodePattern {
    type Err = InvalidPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodePattern::new(s)
    }
}

impl PartialEq for NodePattern {
    fn eq(&self, other: &Self) -> bool {
        self.core.canonical == other.core.canonical
    }
}

impl Eq for NodePattern {}

impl Hash for NodePattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.core.canonical.hash(state);
    }
}

impl Serialize for NodePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.core.source)
    }
}

impl<'de> Deserialize<'de> for NodePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        NodePattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Renders tokens back to text with exactly one space between elements,
/// dropping separator commas. Two patterns differing only in layout
/// canonicalize identically.
fn canonical_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if matches!(token.kind, TokenKind::Comma | TokenKind::Eof) {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&token.kind.to_string());
    }
    out
}
