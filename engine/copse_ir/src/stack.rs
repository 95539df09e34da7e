//! Stack headroom for recursion over deeply nested input.

/// Remaining-stack threshold below which a new segment is allocated.
const RED_ZONE: usize = 64 * 1024;

/// Size of each additionally allocated stack segment.
const GROW_BY: usize = 1024 * 1024;

/// Runs `f`, first growing the stack when headroom is low.
///
/// Recursive descent over a pattern (or structural comparison of a host
/// tree) recurses once per nesting level. Calling through this at the
/// recursion entry bounds nesting by available memory instead of by the
/// thread's stack size.
#[inline]
pub fn with_headroom<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

#[cfg(test)]
mod tests {
    use super::with_headroom;

    #[test]
    fn passes_through_return_value() {
        assert_eq!(with_headroom(|| 7), 7);
    }

    #[test]
    fn survives_deep_recursion() {
        fn spin(depth: u32) -> u32 {
            with_headroom(|| if depth == 0 { 0 } else { 1 + spin(depth - 1) })
        }
        assert_eq!(spin(200_000), 200_000);
    }
}
