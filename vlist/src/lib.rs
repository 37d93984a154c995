//! A headless engine for virtualized lists whose item heights are unknown until rendered.
//!
//! For host-side plumbing (viewport tracking, frame coalescing, writing scroll corrections back
//! to a scroll container), see the `vlist-adapter` crate.
//!
//! The engine keeps the algorithms a chat/timeline view needs at interactive frame rates:
//! a key-addressed size model with an estimate fallback, a cumulative offset table, an
//! `O(log n)` visible range lookup with pixel overscan, a measurement feedback loop, and scroll
//! anchoring for prepends and for items resizing above the viewport.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - the ordered item list and a list identity token
//! - the scroll position, visible height and list offset of the scrolling ancestor
//! - measured heights of rendered items
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod key;
mod list;
mod offsets;
mod options;
mod range;
mod size_model;
mod types;


pub use anchor::{detect_prepend, resize_compensation};
pub use list::{OnChangeCallback, RenderPlan, VirtualList};
pub use offsets::OffsetTable;
pub use options::{
    DEFAULT_ESTIMATED_ITEM_HEIGHT, DEFAULT_OVERSCAN, ListOptions, MIN_ESTIMATED_ITEM_HEIGHT,
    MIN_OVERSCAN,
};
pub use range::select_visible_range;
pub use size_model::SizeModel;
pub use types::{
    Align, Item, ItemLayout, MeasureSource, ScrollCorrection, Viewport, ViewportSnapshot,
    VisibleRange, round_offset, round_px,
};

#[doc(hidden)]
pub use key::KeyCacheKey;
