//! Pattern compiler and matcher runtime for the copse pattern engine.
//!
//! [`compile`] lowers a parsed [`Pat`](copse_ir::Pat) into a
//! [`CompiledPattern`], a tree of matcher combinators with capture and
//! unification slots resolved to dense indices. Whole-pattern validation
//! that the grammar cannot express happens during lowering: ellipsis
//! placement, capture counts across union branches, captures under
//! negation.
//!
//! [`CompiledPattern::evaluate`] runs the combinators against any
//! [`TreeNode`](copse_ir::TreeNode) implementation. A successful match
//! yields [`Captures`]; host-defined predicates are supplied through a
//! [`CapabilityTable`].

mod builtins;
mod capability;
mod compile;
mod env;
mod matcher;

pub use capability::{Capability, CapabilityTable};
pub use compile::{compile, CompiledPattern};
pub use env::{Captured, Captures};

#[cfg(test)]
mod tests;
