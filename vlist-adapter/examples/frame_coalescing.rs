use vlist::{Item, ListOptions};
use vlist_adapter::{Controller, FrameScheduler, FrameToken, HostMetrics, ScrollHost, Subscription};

struct Pane {
    scroll_top: f64,
    height: f64,
    attached: bool,
}

impl ScrollHost for Pane {
    fn metrics(&self) -> Option<HostMetrics> {
        self.attached
            .then(|| HostMetrics::new(self.scroll_top, self.height).with_list_top_in_view(-self.scroll_top))
    }

    fn set_scroll_top(&mut self, scroll_top: u64) {
        self.scroll_top = scroll_top as f64;
    }

    fn subscribe(&mut self) -> Option<Subscription> {
        println!("subscribed");
        Some(Subscription(7))
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        println!("unsubscribed {subscription:?}");
    }
}

#[derive(Default)]
struct Frames {
    next: u64,
    queued: Vec<FrameToken>,
}

impl FrameScheduler for Frames {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken(self.next);
        self.queued.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.queued.retain(|t| *t != token);
        println!("cancelled {token:?}");
    }
}

fn main() {
    let mut pane = Pane {
        scroll_top: 0.0,
        height: 480.0,
        attached: true,
    };
    let mut frames = Frames::default();
    let mut c = Controller::<u32, ()>::new(ListOptions::default());
    c.attach(&mut pane);
    c.set_items(&mut pane, 1, (0..5_000).map(|k| Item::new(k, ())).collect());

    // A fling delivers many scroll events between two paints.
    for step in 1..=12 {
        pane.scroll_top = step as f64 * 37.5;
        c.on_scroll(&mut frames);
    }
    println!(
        "frames requested: {}, events coalesced: {}",
        frames.next,
        c.tracker().coalesced_events()
    );

    // The paint: run queued frames.
    for token in std::mem::take(&mut frames.queued) {
        let changed = c.on_frame(&pane, token);
        println!("frame {token:?}: changed={changed} range={:?}", c.list().visible_range());
    }

    // The container leaves the layout tree.
    pane.attached = false;
    println!("resize while detached: {}", c.on_resize(&pane));
    println!("viewport while detached: {:?}", c.viewport());

    c.on_scroll(&mut frames);
    c.dispose(&mut pane, &mut frames);
    println!("scroll after dispose: {}", c.on_scroll(&mut frames));
}
