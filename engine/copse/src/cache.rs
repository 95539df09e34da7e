//! Process-wide reuse of compiled patterns.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{InvalidPattern, NodePattern};

/// A pattern-string to compiled-pattern map.
///
/// Hosts that match the same pattern text in many places (every rule of
/// a lint pass, say) compile each distinct string once per cache. Lookups
/// take the read lock only. A miss compiles outside any lock; when two
/// threads race on one string, both compile and the first insert wins.
#[derive(Debug, Default)]
pub struct PatternCache {
    inner: RwLock<FxHashMap<Box<str>, NodePattern>>,
}

impl PatternCache {
    #[must_use]
    pub fn new() -> Self {
        PatternCache {
            inner: RwLock::default(),
        }
    }

    /// The cached compilation of `source`, compiling on first use.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern`] when `source` does not compile.
    /// Failures are not cached; retrying the same bad string re-reports.
    pub fn get_or_compile(&self, source: &str) -> Result<NodePattern, InvalidPattern> {
        if let Some(hit) = self.inner.read().get(source) {
            return Ok(hit.clone());
        }
        let compiled = NodePattern::new(source)?;
        debug!(pattern = source, "caching compiled pattern");
        let mut map = self.inner.write();
        Ok(map.entry(source.into()).or_insert(compiled).clone())
    }

    /// Number of distinct pattern strings compiled so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
