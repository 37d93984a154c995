// Example: measured heights flow back into the layout without moving what is on screen.
use vlist::{Item, ListOptions, MeasureSource, Viewport, VirtualList};

fn main() {
    let mut list: VirtualList<u64, ()> = VirtualList::new(ListOptions::new(100, 400));
    list.set_items(1, (0..200u64).map(|k| Item::new(k, ())).collect());
    list.set_viewport(Viewport::new(5_000, 600));

    println!(
        "before: scroll_top={} total={} range={:?}",
        list.viewport().scroll_top,
        list.total_height(),
        list.visible_range()
    );

    // First render of the visible window reports real heights in one batch.
    let range = list.visible_range();
    let reports: Vec<(u64, u32)> = (range.start..range.end)
        .map(|i| (i as u64, 60 + (i % 7) as u32 * 10))
        .collect();
    let correction = list.apply_measurements(MeasureSource::Render, reports);
    println!("after first render: correction={correction:?} total={}", list.total_height());

    // An image above the viewport finishes loading: the scroll position follows it.
    let correction = list.measure(MeasureSource::Layout, 3, 420);
    println!(
        "image loaded above: correction={correction:?} scroll_top={}",
        list.viewport().scroll_top
    );

    // Reporting the same height again is a no-op.
    let version = list.sizes_version();
    list.measure(MeasureSource::Layout, 3, 420);
    println!("repeat report: version unchanged={}", version == list.sizes_version());
}
