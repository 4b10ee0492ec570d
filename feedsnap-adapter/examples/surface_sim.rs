use feedsnap::{
    CategoryId, CategoryStatus, ContentEntry, FeedItem, FeedLayout, FeedModel, FoldContent,
    ItemBounds, MeasureRequest,
};
use feedsnap_adapter::{FeedSurface, SettleContext, StorageProbe};

/// The list as a UI toolkit would report it.
struct ListView {
    viewport: i32,
    offset: i32,
    heights: Vec<u32>,
}

impl ListView {
    fn sync(&mut self, model: &FeedModel, fold_height: u32) {
        self.heights = model
            .items()
            .iter()
            .map(|item| match item {
                FeedItem::AboveFold => fold_height,
                FeedItem::Header { visible: true, .. } => 40,
                FeedItem::Content { .. } => 100,
                FeedItem::Status { .. } => 120,
                _ => 0,
            })
            .collect();
    }

    fn top_of(&self, position: usize) -> i32 {
        self.heights[..position].iter().sum::<u32>() as i32
    }
}

impl FeedLayout for ListView {
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

/// Logo, search box and tiles: 500px of fixed content.
struct Fold;

impl FoldContent for Fold {
    fn measure(&mut self, request: MeasureRequest) -> u32 {
        match request {
            MeasureRequest::Natural {
                scroll_compensation,
            } => 500 + scroll_compensation,
            MeasureRequest::Exactly(height) => height,
        }
    }

    fn anchor_top(&self) -> u32 {
        200
    }
}

fn main() {
    // Example: an adapter driving the feed surface from a simulated frame loop.
    //
    // Per frame the adapter would:
    // - run `on_layout` after the list measured its children
    // - call `on_scroll` on user drags and `on_scroll_settled` when the fling ends
    // - apply the offsets returned by `tick(now_ms)` to the real scroll container
    let mut probe = StorageProbe::for_directory(std::env::temp_dir().join("feedsnap-demo"));

    let mut surface = FeedSurface::default().with_snap_animation(
        feedsnap_adapter::SNAP_DURATION_MS,
        feedsnap_adapter::Easing::EaseInOutCubic,
    );
    surface.fold_mut().set_cards_mode(true);
    surface.set_entries(
        CategoryId(1),
        (0..4)
            .map(|i| ContentEntry::new(format!("s{i}"), format!("Story {i}"), "https://example.com"))
            .collect(),
        CategoryStatus::Available,
    );

    let mut list = ListView {
        viewport: 1000,
        offset: 0,
        heights: Vec::new(),
    };
    // The first pass measures the fold; the second lays the list out with its final height.
    let out = surface.on_layout(1000, &mut Fold, &list);
    list.sync(surface.model(), out.fold.height);
    let out = surface.on_layout(1000, &mut Fold, &list);
    println!("fold={:?}", out.fold);
    println!("pass={:?}", out.pass);

    // The user lets go a few pixels into the peeking card band.
    list.offset = 25;
    let ctx = SettleContext {
        search_box_top: 300,
        parent_scroll_y: list.offset,
        parent_height: list.viewport,
    };
    println!("settled: {:?}", surface.on_scroll_settled(&list, ctx, 0));

    let mut now_ms = 0u64;
    while surface.is_animating() {
        if let Some(off) = surface.tick(now_ms) {
            list.offset = off;
            println!("t={now_ms:>3}ms off={off}");
        }
        now_ms += 40;
    }

    let anchor = surface.capture_anchor(&list);
    println!("anchor={anchor:?}");

    surface.detach();
    probe.cancel();
    println!("storage total after detach={}", probe.total_bytes());
}
