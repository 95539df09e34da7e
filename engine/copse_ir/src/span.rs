//! Byte ranges into a pattern string.

use std::ops::Range;

/// A half-open byte range `[start, end)` in pattern source text.
///
/// Stored as `u32` offsets to keep tokens small; pattern strings are short
/// by nature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Placeholder for errors detected after the source text is gone, such
    /// as validation of an already-parsed pattern tree.
    pub const DUMMY: Span = Span {
        start: u32::MAX,
        end: u32::MAX,
    };

    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Converts a `usize` range as produced by lexers.
    ///
    /// # Panics
    ///
    /// Panics if either offset exceeds `u32::MAX`; pattern strings that
    /// long are rejected long before spans are built.
    #[must_use]
    pub fn from_range(range: Range<usize>) -> Self {
        let (Ok(start), Ok(end)) = (u32::try_from(range.start), u32::try_from(range.end)) else {
            panic!("span offsets {range:?} do not fit in u32");
        };
        Span { start, end }
    }

    #[must_use]
    pub const fn is_dummy(self) -> bool {
        self.start == u32::MAX && self.end == u32::MAX
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
