use alloc::vec::Vec;

use vlist::{
    Align, Item, ListOptions, MeasureSource, ScrollCorrection, Viewport, VirtualList, round_px,
};

use crate::{FrameScheduler, FrameToken, ListKey, Rendered, ScrollHost, ViewportTracker, render};

/// A framework-neutral controller that wires a scroll host to a [`VirtualList`].
///
/// This type holds no UI objects. The host passes itself (and its frame scheduler) into each
/// call:
/// - `attach` once the list is mounted, `dispose` when it unmounts
/// - `on_scroll` / `on_frame` / `on_resize` as the scrolling ancestor fires events
/// - `report_rendered` after mounting or re-rendering items, `report_resized` from a size
///   observer on the item boxes
///
/// Scroll corrections (prepend, items resizing above the viewport, list identity change) are
/// written to the host inside the call that caused them.
#[derive(Clone, Debug)]
pub struct Controller<K, C, I = u64> {
    list: VirtualList<K, C, I>,
    tracker: ViewportTracker,
}

impl<K: ListKey, C, I: PartialEq> Controller<K, C, I> {
    pub fn new(options: ListOptions) -> Self {
        Self::from_list(VirtualList::new(options))
    }

    pub fn from_list(list: VirtualList<K, C, I>) -> Self {
        Self {
            list,
            tracker: ViewportTracker::new(),
        }
    }

    pub fn list(&self) -> &VirtualList<K, C, I> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList<K, C, I> {
        &mut self.list
    }

    pub fn into_list(self) -> VirtualList<K, C, I> {
        self.list
    }

    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    /// The viewport as last read from the host, `None` while detached.
    pub fn viewport(&self) -> Option<Viewport> {
        self.tracker.viewport()
    }

    /// Subscribes to `host` and applies its current geometry. Returns `true` if the viewport
    /// changed.
    pub fn attach(&mut self, host: &mut impl ScrollHost) -> bool {
        self.tracker
            .attach(host)
            .is_some_and(|viewport| self.list.set_viewport(viewport))
    }

    /// Replaces the items (see [`VirtualList::set_items`]) and writes any scroll correction to
    /// `host`.
    ///
    /// The correction is computed against the host's live scroll position. While the host is
    /// detached the items are still replaced but nothing is written.
    pub fn set_items(
        &mut self,
        host: &mut impl ScrollHost,
        identity: I,
        items: Vec<Item<K, C>>,
    ) -> Option<ScrollCorrection> {
        let live = self.sync_viewport(host);
        let correction = self.list.set_items(identity, items);
        if !live {
            return None;
        }
        self.write_correction(host, correction);
        correction
    }

    /// Call on every scroll event of the ancestor. Returns `true` if a frame was requested.
    pub fn on_scroll(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        self.tracker.on_scroll(scheduler)
    }

    /// Call when the frame requested by [`Controller::on_scroll`] runs. Returns `true` if the
    /// viewport changed and the host should re-render.
    pub fn on_frame(&mut self, host: &impl ScrollHost, token: FrameToken) -> bool {
        self.tracker
            .on_frame(token, host)
            .is_some_and(|viewport| self.list.set_viewport(viewport))
    }

    /// Call on every resize of the ancestor. Returns `true` if the viewport changed.
    pub fn on_resize(&mut self, host: &impl ScrollHost) -> bool {
        self.tracker
            .on_resize(host)
            .is_some_and(|viewport| self.list.set_viewport(viewport))
    }

    /// Reports heights of items that were just mounted or re-rendered.
    pub fn report_rendered(
        &mut self,
        host: &mut impl ScrollHost,
        heights: impl IntoIterator<Item = (K, f64)>,
    ) -> Option<ScrollCorrection> {
        self.report(MeasureSource::Render, host, heights)
    }

    /// Reports heights from a size observer on rendered item boxes.
    pub fn report_resized(
        &mut self,
        host: &mut impl ScrollHost,
        heights: impl IntoIterator<Item = (K, f64)>,
    ) -> Option<ScrollCorrection> {
        self.report(MeasureSource::Layout, host, heights)
    }

    fn report(
        &mut self,
        source: MeasureSource,
        host: &mut impl ScrollHost,
        heights: impl IntoIterator<Item = (K, f64)>,
    ) -> Option<ScrollCorrection> {
        if self.tracker.is_disposed() {
            return None;
        }
        let live = self.sync_viewport(host);
        let correction = self.list.apply_measurements(
            source,
            heights.into_iter().map(|(key, px)| (key, round_px(px))),
        );
        if !live {
            // The engine viewport is re-read from the host on the next attached event.
            return None;
        }
        self.write_correction(host, correction);
        correction
    }

    /// Scrolls the host so that `key` is in view. Returns the applied offset, or `None` if the
    /// key is not in the list.
    pub fn scroll_to_key(
        &mut self,
        host: &mut impl ScrollHost,
        key: &K,
        align: Align,
    ) -> Option<u64> {
        let live = self.sync_viewport(host);
        let offset = self.list.scroll_to_key_offset(key, align)?;
        self.scroll_to(host, live, offset);
        Some(offset)
    }

    pub fn scroll_to_index(&mut self, host: &mut impl ScrollHost, index: usize, align: Align) -> u64 {
        let live = self.sync_viewport(host);
        let offset = self.list.scroll_to_index_offset(index, align);
        self.scroll_to(host, live, offset);
        offset
    }

    fn scroll_to(&mut self, host: &mut impl ScrollHost, live: bool, offset: u64) {
        self.list.set_scroll_top(offset);
        if live {
            host.set_scroll_top(offset);
            self.tracker.note_scroll_top(offset);
        }
    }

    /// Brings the engine viewport up to the host's current geometry, ahead of any pending frame.
    ///
    /// Returns `false` when there is no live viewport (not attached, detached or disposed); no
    /// correction may be written to the host then.
    fn sync_viewport(&mut self, host: &impl ScrollHost) -> bool {
        match self.tracker.sync(host) {
            Some(viewport) => {
                self.list.set_viewport(viewport);
                true
            }
            None => false,
        }
    }

    fn write_correction(&mut self, host: &mut impl ScrollHost, correction: Option<ScrollCorrection>) {
        let Some(correction) = correction else {
            return;
        };
        vtrace!(
            delta = correction.delta,
            scroll_top = correction.scroll_top,
            "writing scroll correction"
        );
        host.set_scroll_top(correction.scroll_top);
        self.tracker.note_scroll_top(correction.scroll_top);
    }

    /// Renders the visible window, or `Placeholder(())` for an empty list.
    pub fn render<R>(&self, render_item: impl FnMut(&C) -> R) -> Rendered<K, R> {
        render(&self.list, render_item, || ())
    }

    /// Like [`Controller::render`], with caller-supplied empty-state content.
    pub fn render_with_placeholder<R, E>(
        &self,
        render_item: impl FnMut(&C) -> R,
        empty: impl FnOnce() -> E,
    ) -> Rendered<K, R, E> {
        render(&self.list, render_item, empty)
    }

    /// Unsubscribes from `host` and cancels the pending frame. Later events are ignored.
    pub fn dispose(&mut self, host: &mut impl ScrollHost, scheduler: &mut impl FrameScheduler) {
        self.tracker.dispose(host, scheduler);
    }
}
