// Example: windowing a large uniform list and jumping to an item.
use vlist::{Align, Item, ListOptions, Viewport, VirtualList};

fn main() {
    let mut list: VirtualList<u64, String> = VirtualList::new(ListOptions::new(50, 800));
    list.set_items(
        1,
        (0..10_000u64)
            .map(|k| Item::new(k, format!("message #{k}")))
            .collect(),
    );
    list.set_viewport(Viewport::new(100_000, 800));

    println!("total_height={}", list.total_height());
    println!("visible_range={:?}", list.visible_range());

    let mut first = None;
    list.for_each_visible_item(|layout, content| {
        if first.is_none() {
            first = Some((layout, content.clone()));
        }
    });
    println!("first_materialized={first:?}");

    let to = list.scroll_to_index_offset(9_999, Align::End);
    list.set_scroll_top(to);
    println!("after scroll_to_index: scroll_top={}", list.viewport().scroll_top);
}
