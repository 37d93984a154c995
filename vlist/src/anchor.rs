//! Scroll anchoring: keeping on-screen content still while the list changes around it.
//!
//! Both corrections are plain arithmetic over the previous layout; the caller applies the result
//! to the scroll position in the same update that changed the layout.

/// Recognizes a pure prepend: `next == P ++ prev` with `P` non-empty.
///
/// Returns the index at which the previous first key now sits (the length of `P`). Reorders,
/// middle inserts, deletions and appends all return `None`; the match is a prefix/suffix check,
/// not a diff.
pub fn detect_prepend<K: PartialEq>(prev: &[K], next: &[K]) -> Option<usize> {
    prepend_pivot_by(prev, next, |k| k)
}

pub(crate) fn prepend_pivot_by<T, K: PartialEq + ?Sized>(
    prev: &[T],
    next: &[T],
    key: impl Fn(&T) -> &K,
) -> Option<usize> {
    if next.len() <= prev.len() {
        return None;
    }
    let first = key(prev.first()?);
    let pivot = next.iter().position(|it| key(it) == first)?;
    if pivot == 0 || next.len() - pivot != prev.len() {
        return None;
    }
    prev.iter()
        .zip(&next[pivot..])
        .all(|(a, b)| key(a) == key(b))
        .then_some(pivot)
}

/// Scroll delta to apply when an item changes height by `delta`.
///
/// `prev_bottom` is the item's bottom edge before the change, list-relative. When that edge was
/// at or above `scroll_top` (after translating by `list_top_offset`), the whole item sits above
/// the viewport and the scroll position must follow the change; otherwise nothing on screen moves
/// and the result is `0`.
pub fn resize_compensation(prev_bottom: u64, list_top_offset: u64, scroll_top: u64, delta: i64) -> i64 {
    if prev_bottom.saturating_add(list_top_offset) <= scroll_top {
        delta
    } else {
        0
    }
}
