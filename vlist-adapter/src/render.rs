use alloc::vec::Vec;

use vlist::{RenderPlan, VirtualList};

use crate::ListKey;

/// One materialized item, positioned inside the list wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedItem<K, R> {
    pub key: K,
    pub index: usize,
    /// Translation from the wrapper's top edge.
    pub top: u64,
    pub height: u32,
    /// `false` while `height` is still the estimate.
    pub measured: bool,
    pub view: R,
}

/// What the host draws for the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rendered<K, R, E = ()> {
    /// The list is empty; draw this instead of the windowed region.
    Placeholder(E),
    /// A wrapper `total_height` tall holding `items` at their offsets.
    Window {
        total_height: u64,
        items: Vec<PositionedItem<K, R>>,
    },
}

impl<K, R, E> Rendered<K, R, E> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Rendered::Placeholder(_))
    }

    pub fn total_height(&self) -> u64 {
        match self {
            Rendered::Placeholder(_) => 0,
            Rendered::Window { total_height, .. } => *total_height,
        }
    }

    pub fn items(&self) -> &[PositionedItem<K, R>] {
        match self {
            Rendered::Placeholder(_) => &[],
            Rendered::Window { items, .. } => items,
        }
    }
}

/// Builds the render output for `list`, calling `render_item` for each visible item only.
pub fn render<K: ListKey, C, I: PartialEq, R, E>(
    list: &VirtualList<K, C, I>,
    mut render_item: impl FnMut(&C) -> R,
    empty: impl FnOnce() -> E,
) -> Rendered<K, R, E> {
    match list.render_plan() {
        RenderPlan::Empty => Rendered::Placeholder(empty()),
        RenderPlan::Window {
            total_height,
            range,
        } => {
            let mut items = Vec::with_capacity(range.len());
            list.for_each_visible_item(|layout, content| {
                items.push(PositionedItem {
                    key: layout.key,
                    index: layout.index,
                    top: layout.top,
                    height: layout.height,
                    measured: layout.measured,
                    view: render_item(content),
                });
            });
            Rendered::Window {
                total_height,
                items,
            }
        }
    }
}
