use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use crate::anchor::{prepend_pivot_by, resize_compensation};
use crate::key::{KeyCacheKey, KeyMap};
use crate::types::apply_delta;
use crate::{
    Align, Item, ItemLayout, ListOptions, MeasureSource, OffsetTable, ScrollCorrection, SizeModel,
    Viewport, ViewportSnapshot, VisibleRange, select_visible_range,
};

/// A callback fired after the list's state changed (items, sizes, viewport or options).
pub type OnChangeCallback<K, C, I> = Arc<dyn Fn(&VirtualList<K, C, I>) + Send + Sync>;

/// What the host should draw for the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderPlan {
    /// The list has no items: draw the empty-state placeholder instead of the windowed region.
    Empty,
    /// Draw a wrapper `total_height` tall holding the items in `range` at their offsets.
    Window {
        total_height: u64,
        range: VisibleRange,
    },
}

/// A headless virtualized list.
///
/// Owns the ordered items, the key → height size model, the offset table derived from both, and
/// the last observed viewport. The host drives it:
/// - [`VirtualList::set_items`] when the item list (or the list identity) changes
/// - [`VirtualList::set_viewport`] on scroll/resize
/// - [`VirtualList::apply_measurements`] with heights of rendered items
///
/// Methods that move the scroll position return a [`ScrollCorrection`] which the host must write
/// to its scroll container before the next paint.
pub struct VirtualList<K, C, I = u64> {
    options: ListOptions,
    identity: Option<I>,
    items: Vec<Item<K, C>>,
    items_version: u64,
    positions: KeyMap<K, usize>,
    sizes: SizeModel<K>,
    offsets: OffsetTable,
    offset_rebuilds: u64,
    viewport: Viewport,
    measurements: [u64; 2],

    on_change: Option<OnChangeCallback<K, C, I>>,
    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K: KeyCacheKey + Clone, C, I: PartialEq> VirtualList<K, C, I> {
    pub fn new(options: ListOptions) -> Self {
        vdebug!(
            estimated_item_height = options.estimated_item_height,
            overscan = options.overscan,
            "VirtualList::new"
        );
        Self {
            sizes: SizeModel::new(options.effective_estimated_item_height()),
            options,
            identity: None,
            items: Vec::new(),
            items_version: 0,
            positions: KeyMap::new(),
            offsets: OffsetTable::default(),
            offset_rebuilds: 0,
            viewport: Viewport::default(),
            measurements: [0; 2],
            on_change: None,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Replaces the options. The offset table is rebuilt only when the estimate changed.
    pub fn set_options(&mut self, options: ListOptions) {
        if self.options == options {
            return;
        }
        self.options = options;
        if self
            .sizes
            .set_estimated_height(options.effective_estimated_item_height())
        {
            self.refresh_offsets();
        }
        self.notify();
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&VirtualList<K, C, I>) + Send + Sync + 'static>,
    ) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// A typical frame updates the viewport and reports several measurements; without batching
    /// each of them would fire `on_change`.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        let out = f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
        out
    }

    pub fn identity(&self) -> Option<&I> {
        self.identity.as_ref()
    }

    /// Supplies the item list shown under `identity`.
    ///
    /// - A different identity discards every measurement and resets the scroll position to the
    ///   top; the returned correction carries `scroll_top == 0`.
    /// - The same identity with `items == P ++ previous` (a pure prepend) shifts the scroll
    ///   position down by the height `P` adds, so the content on screen stays put.
    /// - Any other change (append, delete, reorder, insert in the middle) keeps the scroll
    ///   position as is and returns `None`.
    ///
    /// Keys must be unique; duplicates are a caller bug and leave lookups unspecified.
    pub fn set_items(&mut self, identity: I, items: Vec<Item<K, C>>) -> Option<ScrollCorrection> {
        if self.identity.as_ref() != Some(&identity) {
            vdebug!(
                items = items.len(),
                cached = self.sizes.len(),
                "list identity changed; resetting sizes and scroll"
            );
            self.identity = Some(identity);
            self.sizes.reset();
            let prev = self.viewport.scroll_top;
            self.viewport.scroll_top = 0;
            self.replace_items(items);
            self.notify();
            return Some(ScrollCorrection {
                delta: -(prev.min(i64::MAX as u64) as i64),
                scroll_top: 0,
            });
        }

        let prev_total = self.total_height();
        let pivot = prepend_pivot_by(&self.items, &items, |it| &it.key);
        self.replace_items(items);

        let correction = if pivot.is_some() {
            let delta = self.total_height().saturating_sub(prev_total);
            vdebug!(pivot = ?pivot, delta, "prepend detected");
            self.shift_scroll(delta.min(i64::MAX as u64) as i64)
        } else {
            None
        };
        self.notify();
        correction
    }

    fn replace_items(&mut self, items: Vec<Item<K, C>>) {
        self.items = items;
        self.items_version = self.items_version.wrapping_add(1);

        self.positions.clear();
        for (i, item) in self.items.iter().enumerate() {
            self.positions.insert(item.key.clone(), i);
        }
        if self.positions.len() != self.items.len() {
            vwarn!(
                items = self.items.len(),
                unique_keys = self.positions.len(),
                "duplicate item keys; sizes and positions will collide"
            );
        }
        self.refresh_offsets();
    }

    fn refresh_offsets(&mut self) {
        if self.items.is_empty() {
            // Nothing to lay out; the host renders the placeholder.
            if !self.offsets.is_empty() {
                self.offsets = OffsetTable::default();
            }
            return;
        }
        if self
            .offsets
            .refresh(&self.items, self.items_version, &self.sizes)
        {
            self.offset_rebuilds = self.offset_rebuilds.wrapping_add(1);
            debug_assert!(
                self.offsets.as_slice().windows(2).all(|w| w[0] <= w[1]),
                "offset table must be non-decreasing"
            );
        }
    }

    fn shift_scroll(&mut self, delta: i64) -> Option<ScrollCorrection> {
        if delta == 0 {
            return None;
        }
        self.viewport.scroll_top = apply_delta(self.viewport.scroll_top, delta);
        Some(ScrollCorrection {
            delta,
            scroll_top: self.viewport.scroll_top,
        })
    }

    pub fn items(&self) -> &[Item<K, C>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&Item<K, C>> {
        self.items.get(index)
    }

    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records the latest viewport. Returns `true` when it changed.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        if self.viewport == viewport {
            return false;
        }
        vtrace!(
            scroll_top = viewport.scroll_top,
            height = viewport.height,
            list_top_offset = viewport.list_top_offset,
            "set_viewport"
        );
        self.viewport = viewport;
        self.notify();
        true
    }

    pub fn set_scroll_top(&mut self, scroll_top: u64) -> bool {
        self.set_viewport(Viewport {
            scroll_top,
            ..self.viewport
        })
    }

    /// Reports one measured height. See [`VirtualList::apply_measurements`].
    pub fn measure(&mut self, source: MeasureSource, key: K, height: u32) -> Option<ScrollCorrection> {
        self.apply_measurements(source, core::iter::once((key, height)))
    }

    /// Feeds measured heights back into the size model.
    ///
    /// Heights equal to the stored value are ignored. Changed heights are written with a single
    /// size-model version bump and one offset table rebuild for the whole batch. Items whose
    /// bottom edge was at or above the scroll position before the batch shift the scroll
    /// position by their height delta; the summed shift is returned and already applied to
    /// [`VirtualList::viewport`].
    ///
    /// Keys that are not in the current list are skipped.
    pub fn apply_measurements(
        &mut self,
        source: MeasureSource,
        measurements: impl IntoIterator<Item = (K, u32)>,
    ) -> Option<ScrollCorrection> {
        let viewport = self.viewport;
        let positions = &self.positions;
        let offsets = &self.offsets;
        let slot = match source {
            MeasureSource::Render => 0,
            MeasureSource::Layout => 1,
        };

        let (changed, shift, seen) = self.sizes.batch(|sizes| {
            let mut changed = 0usize;
            let mut shift = 0i64;
            let mut seen = 0u64;
            for (key, height) in measurements {
                seen = seen.saturating_add(1);
                let Some(&index) = positions.get(&key) else {
                    vtrace!(height, "measurement for a key outside the list; ignored");
                    continue;
                };
                if sizes.get(&key) == Some(height) {
                    continue;
                }
                let before = sizes.height_or_estimate(&key);
                let delta = height as i64 - before as i64;
                shift += resize_compensation(
                    offsets.end_of(index),
                    viewport.list_top_offset,
                    viewport.scroll_top,
                    delta,
                );
                vtrace!(index, before, height, "measured");
                sizes.set(key, height);
                changed += 1;
            }
            (changed, shift, seen)
        });
        self.measurements[slot] = self.measurements[slot].saturating_add(seen);

        if changed == 0 {
            return None;
        }
        self.refresh_offsets();
        let correction = self.shift_scroll(shift);
        self.notify();
        correction
    }

    /// Number of height reports received from (`Render`, `Layout`) sources.
    ///
    /// Every report counts, including ones for keys outside the list and ones equal to the stored
    /// height.
    pub fn measurement_counts(&self) -> (u64, u64) {
        (self.measurements[0], self.measurements[1])
    }

    pub fn is_measured(&self, key: &K) -> bool {
        self.sizes.contains(key)
    }

    pub fn measured_height(&self, key: &K) -> Option<u32> {
        self.sizes.get(key)
    }

    /// Number of cached measurements (key → height).
    pub fn measurement_cache_len(&self) -> usize {
        self.sizes.len()
    }

    pub fn sizes_version(&self) -> u64 {
        self.sizes.version()
    }

    pub fn size_model(&self) -> &SizeModel<K> {
        &self.sizes
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// How many times the offset table was rebuilt.
    pub fn offset_rebuilds(&self) -> u64 {
        self.offset_rebuilds
    }

    pub fn total_height(&self) -> u64 {
        if self.items.is_empty() {
            return 0;
        }
        self.offsets.total()
    }

    /// Largest meaningful scroll position, in ancestor-scroll coordinates.
    pub fn max_scroll_top(&self) -> u64 {
        let total = self.total_height();
        let view = self.viewport.height as u64;
        self.viewport
            .list_top_offset
            .saturating_add(total.saturating_sub(view))
    }

    pub fn clamp_scroll_top(&self, scroll_top: u64) -> u64 {
        scroll_top.min(self.max_scroll_top())
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range_for(self.viewport)
    }

    pub fn visible_range_for(&self, viewport: Viewport) -> VisibleRange {
        if self.items.is_empty() {
            return VisibleRange::default();
        }
        select_visible_range(&self.offsets, viewport, self.options.effective_overscan())
    }

    /// Decides between the empty-state placeholder and the windowed region.
    ///
    /// For an empty list no range is computed.
    pub fn render_plan(&self) -> RenderPlan {
        if self.items.is_empty() {
            return RenderPlan::Empty;
        }
        RenderPlan::Window {
            total_height: self.total_height(),
            range: self.visible_range(),
        }
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            viewport: self.viewport,
            total_height: self.total_height(),
            range: self.visible_range(),
        }
    }

    pub fn item_layout(&self, index: usize) -> Option<ItemLayout<K>> {
        let item = self.items.get(index)?;
        Some(ItemLayout {
            key: item.key.clone(),
            index,
            top: self.offsets.start_of(index),
            height: self.offsets.size_of(index).min(u32::MAX as u64) as u32,
            measured: self.sizes.contains(&item.key),
        })
    }

    pub fn layout_of_key(&self, key: &K) -> Option<ItemLayout<K>> {
        self.item_layout(self.index_of_key(key)?)
    }

    /// Index of the item covering list-relative offset `offset`.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        self.offsets.index_at(offset)
    }

    /// Calls `f` for each item in the visible range, in order, with its layout and content.
    pub fn for_each_visible_item(&self, mut f: impl FnMut(ItemLayout<K>, &C)) {
        let range = self.visible_range();
        for index in range.start..range.end {
            if let Some(layout) = self.item_layout(index) {
                f(layout, &self.items[index].content);
            }
        }
    }

    /// Collects the layouts of the visible items into `out` (clears `out` first).
    pub fn collect_visible_layouts(&self, out: &mut Vec<ItemLayout<K>>) {
        out.clear();
        self.for_each_visible_item(|layout, _| out.push(layout));
    }

    /// Scroll position (ancestor coordinates) that brings item `index` into view.
    ///
    /// Clamped to [`VirtualList::max_scroll_top`]. Returns the current position for an empty
    /// list.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.items.is_empty() {
            return self.viewport.scroll_top;
        }
        let index = index.min(self.items.len() - 1);
        let base = self.viewport.list_top_offset;
        let start = base.saturating_add(self.offsets.start_of(index));
        let end = base.saturating_add(self.offsets.end_of(index));
        let view = self.viewport.height as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => {
                let center = start.saturating_add(end.saturating_sub(start) / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.viewport.scroll_top;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_top(target)
    }

    pub fn scroll_to_key_offset(&self, key: &K, align: Align) -> Option<u64> {
        let index = self.index_of_key(key)?;
        Some(self.scroll_to_index_offset(index, align))
    }
}

impl<K: Clone, C: Clone, I: Clone> Clone for VirtualList<K, C, I> {
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            identity: self.identity.clone(),
            items: self.items.clone(),
            items_version: self.items_version,
            positions: self.positions.clone(),
            sizes: self.sizes.clone(),
            offsets: self.offsets.clone(),
            offset_rebuilds: self.offset_rebuilds,
            viewport: self.viewport,
            measurements: self.measurements,
            on_change: self.on_change.clone(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }
}

impl<K, C, I: fmt::Debug> fmt::Debug for VirtualList<K, C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualList")
            .field("options", &self.options)
            .field("identity", &self.identity)
            .field("len", &self.items.len())
            .field("items_version", &self.items_version)
            .field("total_height", &self.offsets.total())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}
