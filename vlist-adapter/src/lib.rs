//! Host plumbing for the `vlist` engine.
//!
//! `vlist` is UI-agnostic and only does the layout math. This crate connects it to a scroll
//! container without binding to any UI framework:
//!
//! - [`ScrollHost`] / [`FrameScheduler`]: the two things a host must provide (geometry of the
//!   scrolling ancestor, and an animation-frame callback)
//! - [`ViewportTracker`]: frame-coalesced scroll, immediate resize, detach and disposal handling
//! - [`Controller`]: wires host events and measurement reports into a [`vlist::VirtualList`] and
//!   writes scroll corrections back to the host
//! - [`Rendered`]: the positioned output to draw
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod host;
mod key;
mod render;
mod tracker;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use host::{FrameScheduler, FrameToken, HostMetrics, ScrollHost, Subscription};
pub use key::ListKey;
pub use render::{PositionedItem, Rendered, render};
pub use tracker::ViewportTracker;
