use vlist::{Viewport, round_offset, round_px};

/// Raw geometry of the scrolling ancestor as the host reports it.
///
/// Values are layout pixels and may be fractional or (transiently) negative; they are rounded
/// and clamped by [`HostMetrics::to_viewport`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostMetrics {
    /// The ancestor's scroll position.
    pub scroll_top: f64,
    /// The ancestor's visible (client) height.
    pub client_height: f64,
    /// The list root's top edge minus the ancestor's top edge, as currently laid out on screen.
    ///
    /// This moves as the ancestor scrolls; [`HostMetrics::list_top_offset`] undoes that.
    pub list_top_in_view: f64,
}

impl HostMetrics {
    pub fn new(scroll_top: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
            list_top_in_view: 0.0,
        }
    }

    pub fn with_list_top_in_view(mut self, list_top_in_view: f64) -> Self {
        self.list_top_in_view = list_top_in_view;
        self
    }

    /// The list root's position inside the ancestor's scrolled content.
    pub fn list_top_offset(&self) -> f64 {
        self.list_top_in_view + self.scroll_top
    }

    pub fn to_viewport(&self) -> Viewport {
        Viewport::new(round_offset(self.scroll_top), round_px(self.client_height))
            .with_list_top_offset(round_offset(self.list_top_offset()))
    }
}

/// Handle for an active scroll/resize subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(pub u64);

/// Handle for a requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

/// The scrolling ancestor of a list.
///
/// The host resolves the ancestor (nearest scrollable parent, or the document scroller) and
/// forwards its scroll and resize events to the [`crate::Controller`].
pub trait ScrollHost {
    /// Current geometry, or `None` while the list or its ancestor is not attached.
    fn metrics(&self) -> Option<HostMetrics>;

    /// Moves the ancestor's scroll position. Must take effect before the next paint.
    fn set_scroll_top(&mut self, scroll_top: u64);

    /// Starts delivering scroll and resize events. `None` if there is nothing to subscribe to.
    fn subscribe(&mut self) -> Option<Subscription>;

    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Per-frame callback scheduling (`requestAnimationFrame` or a UI toolkit's equivalent).
pub trait FrameScheduler {
    /// Asks for one callback before the next paint. The host later calls
    /// [`crate::Controller::on_frame`] with the returned token.
    fn request_frame(&mut self) -> FrameToken;

    fn cancel_frame(&mut self, token: FrameToken);
}

impl<T: ScrollHost + ?Sized> ScrollHost for &mut T {
    fn metrics(&self) -> Option<HostMetrics> {
        (**self).metrics()
    }

    fn set_scroll_top(&mut self, scroll_top: u64) {
        (**self).set_scroll_top(scroll_top)
    }

    fn subscribe(&mut self) -> Option<Subscription> {
        (**self).subscribe()
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        (**self).unsubscribe(subscription)
    }
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameToken {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        (**self).cancel_frame(token)
    }
}
