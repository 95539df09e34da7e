//! Host-provided predicates and functions.

use std::fmt;

use copse_ir::{Child, TreeNode};
use rustc_hash::FxHashMap;

/// A host predicate: judges a candidate child given already evaluated
/// arguments, `true` meaning match.
pub type Capability<N> = Box<dyn Fn(&Child<N>, &[Child<N>]) -> bool + Send + Sync>;

/// Named capabilities a pattern may call out to.
///
/// `#name` and `#name(...)` elements always resolve here, as does any
/// `name?` predicate the engine has no builtin for. Names are registered
/// bare: `table.register("deprecated", ...)` serves both `#deprecated`
/// and `deprecated?`.
pub struct CapabilityTable<N: TreeNode> {
    entries: FxHashMap<Box<str>, Capability<N>>,
}

impl<N: TreeNode> Default for CapabilityTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: TreeNode> CapabilityTable<N> {
    #[must_use]
    pub fn new() -> Self {
        CapabilityTable {
            entries: FxHashMap::default(),
        }
    }

    /// Registers `name`, replacing any previous registration.
    pub fn register(
        &mut self,
        name: &str,
        capability: impl Fn(&Child<N>, &[Child<N>]) -> bool + Send + Sync + 'static,
    ) {
        self.entries.insert(name.into(), Box::new(capability));
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&Capability<N>> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: TreeNode> fmt::Debug for CapabilityTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(AsRef::as_ref).collect();
        names.sort_unstable();
        f.debug_struct("CapabilityTable").field("names", &names).finish()
    }
}
