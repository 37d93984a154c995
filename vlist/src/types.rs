/// One entry of the list: a stable key plus caller-owned content.
///
/// Keys must be unique within one list instance. The engine never looks at `content`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<K, C> {
    pub key: K,
    pub content: C,
}

impl<K, C> Item<K, C> {
    pub fn new(key: K, content: C) -> Self {
        Self { key, content }
    }
}

/// Last observed geometry of the scrolling ancestor, in whole layout pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Scroll position of the ancestor.
    pub scroll_top: u64,
    /// Visible (client) height of the ancestor.
    pub height: u32,
    /// Where the list's top edge sits inside the ancestor's scrolled content.
    ///
    /// Nonzero when the list shares the scroll container with other content (headers etc).
    pub list_top_offset: u64,
}

impl Viewport {
    pub fn new(scroll_top: u64, height: u32) -> Self {
        Self {
            scroll_top,
            height,
            list_top_offset: 0,
        }
    }

    pub fn with_list_top_offset(mut self, list_top_offset: u64) -> Self {
        self.list_top_offset = list_top_offset;
        self
    }

    /// Scroll position relative to the list's own top edge.
    pub fn virtual_scroll_top(&self) -> u64 {
        self.scroll_top.saturating_sub(self.list_top_offset)
    }
}

/// A half-open index range into the item list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl VisibleRange {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Computed box of one item, in list-relative pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout<K> {
    pub key: K,
    pub index: usize,
    /// Offset of the item's top edge from the list's top edge.
    pub top: u64,
    /// Measured height, or the estimate if the item was never measured.
    pub height: u32,
    pub measured: bool,
}

impl<K> ItemLayout<K> {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Which event produced a height report.
///
/// Both sources go through the same update path; the tag only feeds diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureSource {
    /// The item was mounted or re-rendered.
    Render,
    /// A size observer on the item's box fired without a re-render.
    Layout,
}

/// A scroll position change the host must apply in the same paint cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollCorrection {
    /// Signed change that was applied to the engine's `scroll_top`.
    pub delta: i64,
    /// The new scroll position, in ancestor-scroll coordinates.
    pub scroll_top: u64,
}

/// A serializable snapshot of what the user was looking at.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSnapshot {
    pub viewport: Viewport,
    pub total_height: u64,
    pub range: VisibleRange,
}

/// Rounds a host-reported float pixel value to whole pixels.
///
/// Negative and NaN values become `0`; values past `u32::MAX` saturate.
pub fn round_px(px: f64) -> u32 {
    if px.is_nan() || px <= 0.0 {
        return 0;
    }
    // `as` saturates on overflow.
    (px + 0.5) as u32
}

/// Same as [`round_px`] for scroll positions and offsets.
pub fn round_offset(px: f64) -> u64 {
    if px.is_nan() || px <= 0.0 {
        return 0;
    }
    (px + 0.5) as u64
}

pub(crate) fn apply_delta(value: u64, delta: i64) -> u64 {
    if delta >= 0 {
        value.saturating_add(delta as u64)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
