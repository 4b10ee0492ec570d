// Example: populate a feed, dismiss an entry and compute the trailing spacer.
use feedsnap::{
    CategoryId, CategoryStatus, ContentEntry, FeedItem, FeedLayout, FeedModel, ItemBounds,
    ScrollSnapController, SnapConfig,
};

/// Items stacked top to bottom, with heights assigned by kind.
struct StackLayout {
    viewport: i32,
    offset: i32,
    heights: Vec<u32>,
}

impl StackLayout {
    fn new(viewport: i32, model: &FeedModel) -> Self {
        let heights = model
            .items()
            .iter()
            .map(|item| match item {
                FeedItem::AboveFold => 640,
                FeedItem::Header { visible: true, .. } => 48,
                FeedItem::Content { .. } => 120,
                FeedItem::Status { .. } => 160,
                FeedItem::Progress { visible: true, .. } => 4,
                _ => 0,
            })
            .collect();
        Self {
            viewport,
            offset: 0,
            heights,
        }
    }

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
    let articles = CategoryId(1);
    let bookmarks = CategoryId(2);

    let mut model = FeedModel::new();
    let change = model.set_entries(
        articles,
        (0..3)
            .map(|i| ContentEntry::new(format!("a{i}"), format!("Article {i}"), "https://example.com"))
            .collect(),
        CategoryStatus::Available,
    );
    println!("articles inserted: {change:?}");
    let change = model.set_entries(bookmarks, Vec::new(), CategoryStatus::Initializing);
    println!("bookmarks inserted: {change:?}");

    for (position, item) in model.items().iter().enumerate() {
        println!("{position:>2} {:?} visible={}", item.kind(), item.is_visible());
    }
    println!("positions={:?}", model.positions());

    let mut snap = ScrollSnapController::new(SnapConfig::for_density(2.0));
    let layout = StackLayout::new(1600, &model);
    println!("bottom spacing={}", snap.compute_bottom_spacing(&model, &layout));

    let change = model.dismiss_entry(articles, "a1");
    println!("dismissed a1: {change:?}");
    let spacing = snap.on_item_dismiss_started(120, &model, &layout);
    println!("bottom spacing while animating={spacing}");
    snap.on_item_dismiss_finished(120);
    println!("state after dismissal={:?}", snap.state());
}
