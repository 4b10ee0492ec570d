// Example: snap a settled scroll offset out of the transition bands.
use feedsnap::{
    CategoryId, CategoryStatus, ContentEntry, FeedItem, FeedLayout, FeedModel, ItemBounds,
    ScrollSnapController, SnapConfig, scroll_out_of_region_mid,
};

struct StackLayout {
    viewport: i32,
    offset: i32,
    heights: Vec<u32>,
}

impl StackLayout {
    fn top_of(&self, position: usize) -> i32 {
        self.heights[..position].iter().sum::<u32>() as i32
    }
}

impl FeedLayout for StackLayout {
    fn viewport_height(&self) -> i32 {
        self.viewport
    }

    fn scroll_offset(&self) -> i32 {
        self.offset
    }

    fn first_visible_position(&self) -> Option<usize> {
        (0..self.heights.len()).find(|&p| self.top_of(p) + self.heights[p] as i32 > self.offset)
    }

    fn item_bounds(&self, position: usize) -> Option<ItemBounds> {
        let height = *self.heights.get(position)?;
        Some(ItemBounds::new(self.top_of(position) - self.offset, height))
    }
}

fn main() {
    println!("{:?}", scroll_out_of_region_mid(15, 0, 40));
    println!("{:?}", scroll_out_of_region_mid(25, 0, 40));

    let mut model = FeedModel::new();
    model.set_entries(
        CategoryId(1),
        vec![
            ContentEntry::new("a", "First", "https://example.com/a"),
            ContentEntry::new("b", "Second", "https://example.com/b"),
        ],
        CategoryStatus::Available,
    );

    // The above-the-fold region leaves exactly the peeking height of the first card visible.
    let config = SnapConfig::new(8, 100, 40, 32).with_max_header_height(40);
    let mut layout = StackLayout {
        viewport: 1000,
        offset: 0,
        heights: model
            .items()
            .iter()
            .map(|item| match item {
                FeedItem::AboveFold => 968,
                FeedItem::Header { .. } => 40,
                FeedItem::Content { .. } => 100,
                _ => 0,
            })
            .collect(),
    };

    let mut snap = ScrollSnapController::new(config);
    let pass = snap.set_has_space_for_peeking_card(true, &model, &layout);
    println!("layout pass={pass:?}");

    let search_box_top = 300;
    println!("search box zone={:?}", snap.search_box_zone(search_box_top));
    println!(
        "peeking card zone={:?}",
        snap.peeking_card_zone(&model, &layout, 0, layout.viewport)
    );

    for offset in [10, 60, 120, 270, 290, 400] {
        layout.offset = offset;
        let result = snap.snap_scroll(&model, &layout, search_box_top, offset, layout.viewport);
        println!("offset={offset:>3} -> {result:?}");
    }
}
