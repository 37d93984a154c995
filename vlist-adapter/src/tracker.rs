use vlist::Viewport;

use crate::{FrameScheduler, FrameToken, ScrollHost, Subscription};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    Attached,
    Disposed,
}

/// Turns raw scroll/resize events of a [`ScrollHost`] into viewport updates.
///
/// - Scroll events are coalesced: the first one requests an animation frame, later ones are
///   dropped until that frame runs. The viewport is read once, in [`ViewportTracker::on_frame`],
///   unless [`ViewportTracker::sync`] reads it earlier for a scroll correction.
/// - Resize events are read immediately. A resize whose rounded geometry equals the last applied
///   viewport yields nothing, so a resize triggered by applying the previous one settles.
/// - A detached host (no metrics) yields nothing and clears the viewport until metrics return.
/// - After [`ViewportTracker::dispose`] every event is ignored.
///
/// Every method takes `&mut self`, so a resize cannot be delivered while another one is being
/// applied through the same tracker.
#[derive(Clone, Debug, Default)]
pub struct ViewportTracker {
    state: State,
    subscription: Option<Subscription>,
    pending_frame: Option<FrameToken>,
    last: Option<Viewport>,
    coalesced: u64,
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `host` and reads the initial viewport.
    ///
    /// Attaching again while attached re-reads the viewport without subscribing twice.
    pub fn attach(&mut self, host: &mut impl ScrollHost) -> Option<Viewport> {
        match self.state {
            State::Disposed => {
                vwarn!("attach after dispose; ignored");
                return None;
            }
            State::Idle => {
                self.subscription = host.subscribe();
                self.state = State::Attached;
                vdebug!(subscribed = self.subscription.is_some(), "attached");
            }
            State::Attached => {}
        }
        self.last = None;
        self.read(host)
    }

    /// Handles a scroll event. Returns `true` when a frame was requested for it.
    pub fn on_scroll(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if !self.accepts_events("scroll") {
            return false;
        }
        if self.pending_frame.is_some() {
            self.coalesced = self.coalesced.saturating_add(1);
            vtrace!(coalesced = self.coalesced, "scroll coalesced into pending frame");
            return false;
        }
        self.pending_frame = Some(scheduler.request_frame());
        true
    }

    /// Runs the frame requested by [`ViewportTracker::on_scroll`].
    ///
    /// Returns the new viewport if it changed. Tokens other than the pending one are stale and
    /// ignored.
    pub fn on_frame(&mut self, token: FrameToken, host: &impl ScrollHost) -> Option<Viewport> {
        if !self.accepts_events("frame") {
            return None;
        }
        if self.pending_frame != Some(token) {
            vtrace!(token = token.0, "stale frame; ignored");
            return None;
        }
        self.pending_frame = None;
        self.read(host)
    }

    /// Handles a resize of the ancestor. Returns the new viewport if it changed.
    pub fn on_resize(&mut self, host: &impl ScrollHost) -> Option<Viewport> {
        if !self.accepts_events("resize") {
            return None;
        }
        self.read(host)
    }

    /// Reads the host's geometry now, without waiting for the pending frame.
    ///
    /// Returns the current viewport, or `None` when there is none (not attached, detached, or
    /// disposed). A pending frame stays pending and later reads the same geometry as unchanged.
    pub fn sync(&mut self, host: &impl ScrollHost) -> Option<Viewport> {
        if self.state != State::Attached {
            return None;
        }
        self.read(host);
        self.last
    }

    /// Records a scroll position the controller wrote to the host itself.
    ///
    /// The scroll event the write causes then reads an unchanged viewport.
    pub fn note_scroll_top(&mut self, scroll_top: u64) {
        if let Some(last) = &mut self.last {
            last.scroll_top = scroll_top;
        }
    }

    /// Unsubscribes, cancels the pending frame and stops processing events. Idempotent.
    pub fn dispose(&mut self, host: &mut impl ScrollHost, scheduler: &mut impl FrameScheduler) {
        if self.state == State::Disposed {
            return;
        }
        if let Some(token) = self.pending_frame.take() {
            scheduler.cancel_frame(token);
        }
        if let Some(subscription) = self.subscription.take() {
            host.unsubscribe(subscription);
        }
        self.state = State::Disposed;
        self.last = None;
        vdebug!("disposed");
    }

    /// Last viewport read from the host; `None` before attach, while detached, or after dispose.
    pub fn viewport(&self) -> Option<Viewport> {
        self.last
    }

    pub fn is_attached(&self) -> bool {
        self.state == State::Attached
    }

    pub fn is_disposed(&self) -> bool {
        self.state == State::Disposed
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Number of scroll events dropped because a frame was already pending.
    pub fn coalesced_events(&self) -> u64 {
        self.coalesced
    }

    fn accepts_events(&self, _event: &'static str) -> bool {
        match self.state {
            State::Attached => true,
            State::Idle => false,
            State::Disposed => {
                vwarn!(event = _event, "event after dispose; ignored");
                false
            }
        }
    }

    fn read(&mut self, host: &impl ScrollHost) -> Option<Viewport> {
        let Some(metrics) = host.metrics() else {
            if self.last.take().is_some() {
                vdebug!("scroll host detached");
            }
            return None;
        };
        let viewport = metrics.to_viewport();
        if self.last == Some(viewport) {
            return None;
        }
        vtrace!(
            scroll_top = viewport.scroll_top,
            height = viewport.height,
            list_top_offset = viewport.list_top_offset,
            "viewport read"
        );
        self.last = Some(viewport);
        Some(viewport)
    }
}
