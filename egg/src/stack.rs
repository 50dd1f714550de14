// Parsing and evaluation recurse once per nesting level of the source, so
// deeply nested programs grow the native stack on demand instead of
// overflowing it.

const RED_ZONE: usize = 64 * 1024;
const GROW_BY: usize = 1024 * 1024;

#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}
