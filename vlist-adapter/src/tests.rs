use crate::*;

use alloc::vec::Vec;
use vlist::{Align, Item, ListOptions, ScrollCorrection, Viewport};

/// An in-memory scroll container holding one list at `list_top_offset` in its content.
#[derive(Debug, Default)]
struct FakeHost {
    attached: bool,
    scroll_top: f64,
    client_height: f64,
    list_top_offset: f64,
    writes: Vec<u64>,
    next_subscription: u64,
    active: Option<Subscription>,
    unsubscribed: Vec<Subscription>,
}

impl FakeHost {
    fn new(scroll_top: f64, client_height: f64) -> Self {
        Self {
            attached: true,
            scroll_top,
            client_height,
            ..Self::default()
        }
    }
}

impl ScrollHost for FakeHost {
    fn metrics(&self) -> Option<HostMetrics> {
        self.attached.then(|| {
            HostMetrics::new(self.scroll_top, self.client_height)
                .with_list_top_in_view(self.list_top_offset - self.scroll_top)
        })
    }

    fn set_scroll_top(&mut self, scroll_top: u64) {
        self.writes.push(scroll_top);
        self.scroll_top = scroll_top as f64;
    }

    fn subscribe(&mut self) -> Option<Subscription> {
        self.next_subscription += 1;
        let subscription = Subscription(self.next_subscription);
        self.active = Some(subscription);
        Some(subscription)
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        if self.active == Some(subscription) {
            self.active = None;
        }
        self.unsubscribed.push(subscription);
    }
}

#[derive(Debug, Default)]
struct FakeScheduler {
    next: u64,
    requested: Vec<FrameToken>,
    cancelled: Vec<FrameToken>,
}

impl FrameScheduler for FakeScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken(self.next);
        self.requested.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.cancelled.push(token);
    }
}

fn items(keys: impl IntoIterator<Item = u64>) -> Vec<Item<u64, u64>> {
    keys.into_iter().map(|k| Item::new(k, k * 10)).collect()
}

/// A controller over keys `100..200` (estimate 50px, overscan 100px), attached at the top.
fn setup() -> (Controller<u64, u64>, FakeHost, FakeScheduler) {
    let mut host = FakeHost::new(0.0, 200.0);
    let mut c = Controller::new(ListOptions::new(50, 100));
    assert!(c.attach(&mut host));
    c.set_items(&mut host, 1, items(100..200));
    host.writes.clear();
    (c, host, FakeScheduler::default())
}

/// Simulates the user scrolling the host to `scroll_top` and the frame firing.
fn user_scroll(
    c: &mut Controller<u64, u64>,
    host: &mut FakeHost,
    scheduler: &mut FakeScheduler,
    scroll_top: f64,
) -> bool {
    host.scroll_top = scroll_top;
    c.on_scroll(scheduler);
    let token = *scheduler.requested.last().unwrap();
    c.on_frame(host, token)
}

#[test]
fn host_metrics_round_and_translate_list_offset() {
    let m = HostMetrics::new(300.4, 399.6).with_list_top_in_view(-100.0);
    assert!((m.list_top_offset() - 200.4).abs() < 1e-9);
    assert_eq!(
        m.to_viewport(),
        Viewport::new(300, 400).with_list_top_offset(200)
    );

    let m = HostMetrics::new(-12.0, f64::NAN).with_list_top_in_view(-5.0);
    assert_eq!(m.to_viewport(), Viewport::default());
}

#[test]
fn scroll_burst_is_coalesced_into_one_frame() {
    let (mut c, mut host, mut scheduler) = setup();

    host.scroll_top = 300.0;
    assert!(c.on_scroll(&mut scheduler));
    for _ in 0..4 {
        host.scroll_top += 100.0;
        assert!(!c.on_scroll(&mut scheduler));
    }
    assert_eq!(scheduler.requested.len(), 1);
    assert_eq!(c.tracker().coalesced_events(), 4);
    assert_eq!(c.list().viewport().scroll_top, 0);

    let token = scheduler.requested[0];
    assert!(c.on_frame(&host, token));
    assert_eq!(c.list().viewport().scroll_top, 700);
    assert!(!c.tracker().has_pending_frame());

    // The same token again is stale.
    host.scroll_top = 800.0;
    assert!(!c.on_frame(&host, token));
    assert_eq!(c.list().viewport().scroll_top, 700);
}

#[test]
fn frame_with_foreign_token_is_ignored() {
    let (mut c, mut host, mut scheduler) = setup();
    host.scroll_top = 500.0;
    c.on_scroll(&mut scheduler);

    assert!(!c.on_frame(&host, FrameToken(999)));
    assert!(c.tracker().has_pending_frame());
    assert_eq!(c.list().viewport().scroll_top, 0);
}

#[test]
fn resize_applies_immediately_and_settles() {
    let (mut c, mut host, _) = setup();

    host.client_height = 640.0;
    assert!(c.on_resize(&host));
    assert_eq!(c.list().viewport().height, 640);

    // The observer firing again with the same geometry produces no update.
    assert!(!c.on_resize(&host));
    host.client_height = 640.2;
    assert!(!c.on_resize(&host));
}

#[test]
fn detached_host_reports_no_viewport() {
    let (mut c, mut host, mut scheduler) = setup();
    host.attached = false;

    assert!(!c.on_resize(&host));
    assert_eq!(c.viewport(), None);
    assert!(c.on_scroll(&mut scheduler));
    assert!(!c.on_frame(&host, scheduler.requested[0]));

    host.attached = true;
    host.client_height = 300.0;
    assert!(c.on_resize(&host));
    assert_eq!(c.viewport(), Some(Viewport::new(0, 300)));
}

#[test]
fn dispose_unsubscribes_cancels_and_ignores_later_events() {
    let (mut c, mut host, mut scheduler) = setup();
    assert_eq!(host.active, Some(Subscription(1)));

    host.scroll_top = 400.0;
    c.on_scroll(&mut scheduler);
    let pending = scheduler.requested[0];

    c.dispose(&mut host, &mut scheduler);
    assert_eq!(scheduler.cancelled, [pending]);
    assert_eq!(host.active, None);
    assert!(c.tracker().is_disposed());

    assert!(!c.on_scroll(&mut scheduler));
    assert_eq!(scheduler.requested.len(), 1);
    assert!(!c.on_frame(&host, pending));
    host.client_height = 900.0;
    assert!(!c.on_resize(&host));
    assert_eq!(c.report_resized(&mut host, [(100, 500.0)]), None);
    assert!(host.writes.is_empty());
    assert_eq!(c.viewport(), None);

    // Disposing twice does nothing more.
    c.dispose(&mut host, &mut scheduler);
    assert_eq!(host.unsubscribed.len(), 1);
    assert_eq!(scheduler.cancelled.len(), 1);
}

#[test]
fn prepend_writes_correction_to_host() {
    let (mut c, mut host, mut scheduler) = setup();
    assert!(user_scroll(&mut c, &mut host, &mut scheduler, 1000.0));
    let before = c.list().layout_of_key(&120).unwrap();
    assert_eq!(before.top, 1000);

    let correction = c.set_items(&mut host, 1, items((90..100).chain(100..200)));
    assert_eq!(
        correction,
        Some(ScrollCorrection {
            delta: 500,
            scroll_top: 1500
        })
    );
    assert_eq!(host.writes, [1500]);

    // Item 120 sits at the same distance from the viewport top as before.
    let after = c.list().layout_of_key(&120).unwrap();
    assert_eq!(after.top - c.list().viewport().scroll_top, 0);

    // The scroll event caused by the write reads back an unchanged viewport.
    assert!(!user_scroll(&mut c, &mut host, &mut scheduler, 1500.0));
}

#[test]
fn identity_change_scrolls_host_to_top() {
    let (mut c, mut host, mut scheduler) = setup();
    user_scroll(&mut c, &mut host, &mut scheduler, 1200.0);
    c.report_rendered(&mut host, [(124, 90.0)]);
    host.writes.clear();

    let correction = c.set_items(&mut host, 2, items(0..50));
    assert_eq!(correction.map(|c| c.scroll_top), Some(0));
    assert_eq!(host.writes, [0]);
    assert_eq!(c.list().measurement_cache_len(), 0);
}

#[test]
fn rendered_and_observed_heights_share_one_path() {
    let (mut c, mut host, _) = setup();

    assert_eq!(c.report_rendered(&mut host, [(101, 60.4)]), None);
    assert_eq!(c.list().measured_height(&101), Some(60));
    let version = c.list().sizes_version();

    // A size observer reporting the same rounded height is a no-op.
    assert_eq!(c.report_resized(&mut host, [(101, 59.6)]), None);
    assert_eq!(c.list().sizes_version(), version);
    assert_eq!(c.list().measurement_counts(), (1, 1));

    c.report_resized(&mut host, [(101, 75.0)]);
    assert_eq!(c.list().measured_height(&101), Some(75));
    assert!(host.writes.is_empty());
}

#[test]
fn resize_above_viewport_writes_correction() {
    let (mut c, mut host, mut scheduler) = setup();
    user_scroll(&mut c, &mut host, &mut scheduler, 1000.0);

    // Item 100 (0..50) is above the viewport; item 120 (1000..1050) is in it.
    let correction = c.report_resized(&mut host, [(100, 80.0), (120, 200.0)]);
    assert_eq!(
        correction,
        Some(ScrollCorrection {
            delta: 30,
            scroll_top: 1030
        })
    );
    assert_eq!(host.writes, [1030]);
    assert_eq!(c.list().layout_of_key(&120).unwrap().top, 1030);
}

#[test]
fn render_positions_visible_items() {
    let (mut c, mut host, mut scheduler) = setup();
    user_scroll(&mut c, &mut host, &mut scheduler, 1000.0);

    let out = c.render(|content| *content + 1);
    assert!(!out.is_placeholder());
    assert_eq!(out.total_height(), 5000);

    // Pixels 900..1300 plus one item on each side.
    let keys: Vec<u64> = out.items().iter().map(|p| p.key).collect();
    assert_eq!(keys, (117..127).collect::<Vec<_>>());
    let first = &out.items()[0];
    assert_eq!((first.index, first.top, first.height), (17, 850, 50));
    assert!(!first.measured);
    assert_eq!(first.view, 1171);
}

#[test]
fn empty_list_renders_placeholder() {
    let mut host = FakeHost::new(0.0, 200.0);
    let mut c = Controller::<u64, u64>::new(ListOptions::default());
    c.attach(&mut host);
    c.set_items(&mut host, 1, Vec::new());

    let out = c.render_with_placeholder(|content| *content, || "nothing here");
    assert_eq!(out, Rendered::Placeholder("nothing here"));
    assert!(out.items().is_empty());
    assert_eq!(out.total_height(), 0);
}

#[test]
fn scroll_to_key_writes_host_and_clamps() {
    let mut host = FakeHost::new(0.0, 200.0);
    host.list_top_offset = 120.0;
    let mut c = Controller::new(ListOptions::new(50, 100));
    c.attach(&mut host);
    c.set_items(&mut host, 1, items(100..200));
    host.writes.clear();

    assert_eq!(c.scroll_to_key(&mut host, &110, Align::Start), Some(620));
    assert_eq!(host.writes, [620]);
    assert_eq!(c.list().viewport().scroll_top, 620);

    // Past the end: clamped to list_top_offset + total - height.
    assert_eq!(c.scroll_to_key(&mut host, &199, Align::Start), Some(4920));
    assert_eq!(c.scroll_to_key(&mut host, &7, Align::Start), None);
    assert_eq!(host.writes, [620, 4920]);
}

#[test]
fn attach_reads_initial_viewport_once() {
    let mut host = FakeHost::new(40.0, 500.0);
    let mut tracker = ViewportTracker::new();
    assert_eq!(tracker.viewport(), None);

    assert_eq!(tracker.attach(&mut host), Some(Viewport::new(40, 500)));
    assert!(tracker.is_attached());
    // Re-attaching does not subscribe twice.
    tracker.attach(&mut host);
    assert_eq!(host.next_subscription, 1);
}

#[test]
fn resize_correction_keeps_scroll_made_since_last_frame() {
    let (mut c, mut host, mut scheduler) = setup();
    user_scroll(&mut c, &mut host, &mut scheduler, 1000.0);

    // The user scrolls on; the frame for it has not run yet.
    host.scroll_top = 1500.0;
    assert!(c.on_scroll(&mut scheduler));
    let pending = *scheduler.requested.last().unwrap();

    let correction = c.report_resized(&mut host, [(100, 60.0)]);
    assert_eq!(
        correction,
        Some(ScrollCorrection {
            delta: 10,
            scroll_top: 1510
        })
    );
    assert_eq!(host.writes, [1510]);
    assert_eq!(c.list().viewport().scroll_top, 1510);

    // The frame then finds nothing new.
    assert!(!c.on_frame(&host, pending));
    assert_eq!(c.list().viewport().scroll_top, 1510);
}

#[test]
fn prepend_correction_keeps_scroll_made_since_last_frame() {
    let (mut c, mut host, mut scheduler) = setup();
    user_scroll(&mut c, &mut host, &mut scheduler, 1000.0);

    host.scroll_top = 1500.0;
    c.on_scroll(&mut scheduler);

    let correction = c.set_items(&mut host, 1, items(90..200));
    assert_eq!(
        correction,
        Some(ScrollCorrection {
            delta: 500,
            scroll_top: 2000
        })
    );
    assert_eq!(host.writes, [2000]);
    // Item 130 was at the viewport top before the prepend and still is.
    assert_eq!(c.list().layout_of_key(&130).unwrap().top, 2000);
}

#[test]
fn detached_host_is_never_written() {
    let (mut c, mut host, mut scheduler) = setup();
    user_scroll(&mut c, &mut host, &mut scheduler, 1000.0);
    host.attached = false;

    assert_eq!(c.report_resized(&mut host, [(100, 60.0)]), None);
    assert_eq!(c.list().measured_height(&100), Some(60));
    assert_eq!(c.set_items(&mut host, 1, items(90..200)), None);
    assert_eq!(c.list().len(), 110);
    assert!(c.scroll_to_key(&mut host, &150, Align::Start).is_some());
    assert!(host.writes.is_empty());
    assert_eq!(c.viewport(), None);

    // Once reattached, the engine follows the host's real position again.
    host.attached = true;
    assert!(c.on_resize(&host));
    assert_eq!(c.list().viewport().scroll_top, 1000);
}
