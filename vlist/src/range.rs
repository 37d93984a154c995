use crate::{OffsetTable, Viewport, VisibleRange};

/// Picks the items to materialize for `viewport`.
///
/// Every item intersecting `[scroll - overscan, scroll + height + overscan]` (list-relative) is
/// included, plus one extra item on each side. Two binary searches over `offsets`, so the cost
/// does not depend on list length.
pub fn select_visible_range(offsets: &OffsetTable, viewport: Viewport, overscan: u32) -> VisibleRange {
    let n = offsets.len();
    if n == 0 {
        return VisibleRange::default();
    }

    let overscan = overscan as u64;
    let virtual_top = viewport.virtual_scroll_top();
    let start_px = virtual_top.saturating_sub(overscan);
    let end_px = virtual_top
        .saturating_add(viewport.height as u64)
        .saturating_add(overscan);

    let start = offsets.first_at_least(start_px).saturating_sub(1).min(n);
    let end = offsets
        .first_at_least(end_px)
        .saturating_add(1)
        .clamp(start, n);

    VisibleRange { start, end }
}
