/// Estimated item height used when no option is given.
pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: u32 = 140;
/// Overscan (in pixels, on each side of the viewport) used when no option is given.
pub const DEFAULT_OVERSCAN: u32 = 800;

/// Smallest estimate the engine will use; a zero estimate would collapse every unmeasured item.
pub const MIN_ESTIMATED_ITEM_HEIGHT: u32 = 1;
/// Smallest overscan the engine will use.
pub const MIN_OVERSCAN: u32 = 1;

/// Configuration for [`crate::VirtualList`].
///
/// Plain data: hosts may build it with the `with_*` helpers or, with `feature = "serde"`,
/// deserialize it from their own settings. Out-of-range values are clamped on use, never
/// rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListOptions {
    /// Height assumed for items that were never measured.
    pub estimated_item_height: u32,
    /// Extra pixels kept rendered above and below the viewport.
    pub overscan: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            estimated_item_height: DEFAULT_ESTIMATED_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl ListOptions {
    pub fn new(estimated_item_height: u32, overscan: u32) -> Self {
        Self {
            estimated_item_height,
            overscan,
        }
    }

    pub fn with_estimated_item_height(mut self, estimated_item_height: u32) -> Self {
        self.estimated_item_height = estimated_item_height;
        self
    }

    pub fn with_overscan(mut self, overscan: u32) -> Self {
        self.overscan = overscan;
        self
    }

    /// Builds options from host float values (e.g. CSS pixels), rounding and clamping them.
    pub fn from_px(estimated_item_height: f64, overscan: f64) -> Self {
        Self {
            estimated_item_height: crate::round_px(estimated_item_height),
            overscan: crate::round_px(overscan),
        }
    }

    pub fn effective_estimated_item_height(&self) -> u32 {
        self.estimated_item_height.max(MIN_ESTIMATED_ITEM_HEIGHT)
    }

    pub fn effective_overscan(&self) -> u32 {
        self.overscan.max(MIN_OVERSCAN)
    }
}
