use vlist::{Item, ListOptions};
use vlist_adapter::{Controller, HostMetrics, ScrollHost, Subscription};

/// A scroll container that only remembers its scroll position.
struct Pane {
    scroll_top: f64,
    height: f64,
}

impl ScrollHost for Pane {
    fn metrics(&self) -> Option<HostMetrics> {
        Some(HostMetrics::new(self.scroll_top, self.height).with_list_top_in_view(-self.scroll_top))
    }

    fn set_scroll_top(&mut self, scroll_top: u64) {
        println!("host scroll_top <- {scroll_top}");
        self.scroll_top = scroll_top as f64;
    }

    fn subscribe(&mut self) -> Option<Subscription> {
        Some(Subscription(1))
    }

    fn unsubscribe(&mut self, _subscription: Subscription) {}
}

fn messages(ids: impl Iterator<Item = u64>) -> Vec<Item<u64, String>> {
    ids.map(|id| Item::new(id, format!("message #{id}"))).collect()
}

fn main() {
    // A chat view: loading older history prepends messages while the user reads.
    let mut pane = Pane {
        scroll_top: 0.0,
        height: 600.0,
    };
    let mut c = Controller::<u64, String>::new(ListOptions::new(80, 400));
    c.attach(&mut pane);
    c.set_items(&mut pane, 1, messages(1000..1200));

    // Jump to message 1150 and report the heights of what got rendered.
    c.scroll_to_key(&mut pane, &1150, vlist::Align::Start);
    let rendered = c.render(|text| text.len());
    let heights: Vec<(u64, f64)> = rendered
        .items()
        .iter()
        .map(|p| (p.key, 60.0 + (p.key % 3) as f64 * 20.5))
        .collect();
    c.report_rendered(&mut pane, heights);

    let before = c.list().layout_of_key(&1150).map(|l| l.top);
    println!("before: scroll_top={} item top={before:?}", c.list().viewport().scroll_top);

    // Older messages arrive.
    let correction = c.set_items(&mut pane, 1, messages(950..1200));
    println!("correction: {correction:?}");

    let after = c.list().layout_of_key(&1150).map(|l| l.top);
    println!("after:  scroll_top={} item top={after:?}", c.list().viewport().scroll_top);
}
