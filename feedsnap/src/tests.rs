use crate::*;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use proptest::prelude::*;

const ARTICLES: CategoryId = CategoryId(1);
const BOOKMARKS: CategoryId = CategoryId(2);

fn entry(id: &str) -> ContentEntry {
    ContentEntry::new(id, alloc::format!("title {id}"), alloc::format!("https://example.com/{id}"))
}

fn entries(ids: &[&str]) -> Vec<ContentEntry> {
    ids.iter().map(|id| entry(id)).collect()
}

fn thumb(seed: u8) -> Thumbnail {
    Thumbnail::new(2, 2, vec![seed; 16])
}

/// A list laid out top to bottom with fixed per-position heights.
struct FakeLayout {
    viewport: i32,
    offset: i32,
    heights: Vec<u32>,
    detached: Vec<usize>,
}

impl FakeLayout {
    fn new(viewport: i32, heights: Vec<u32>) -> Self {
        Self {
            viewport,
            offset: 0,
            heights,
            detached: Vec::new(),
        }
    }

    fn for_model(viewport: i32, model: &FeedModel, height: impl Fn(&FeedItem) -> u32) -> Self {
        Self::new(viewport, model.items().iter().map(height).collect())
    }

    fn abs_top(&self, position: usize) -> i32 {
        self.heights[..position].iter().sum::<u32>() as i32
    }
}

impl FeedLayout for FakeLayout {
    fn viewport_height(&self) -> i32 {
        self.viewport
    }

    fn scroll_offset(&self) -> i32 {
        self.offset
    }

    fn first_visible_position(&self) -> Option<usize> {
        (0..self.heights.len())
            .find(|&p| self.abs_top(p) + self.heights[p] as i32 > self.offset)
    }

    fn item_bounds(&self, position: usize) -> Option<ItemBounds> {
        if position >= self.heights.len() || self.detached.contains(&position) {
            return None;
        }
        Some(ItemBounds::new(
            self.abs_top(position) - self.offset,
            self.heights[position],
        ))
    }
}

fn standard_heights(item: &FeedItem) -> u32 {
    match item {
        FeedItem::AboveFold => 600,
        FeedItem::Header { .. } => 40,
        FeedItem::Content { entry, .. } if entry.id == "tall" => 300,
        FeedItem::Content { .. } => 100,
        FeedItem::Status { .. } => 120,
        FeedItem::Progress { .. } => 20,
        FeedItem::Spacer => 0,
    }
}

fn band_config() -> SnapConfig {
    SnapConfig::new(8, 100, 40, 32).with_max_header_height(40)
}

// Section

#[test]
fn section_items_follow_entry_count() {
    let s = Section::new(ARTICLES, entries(&["a", "b", "c"]), CategoryStatus::Available);
    let items = s.items();
    assert_eq!(items.len(), 4);
    assert_eq!(items.len(), s.item_count());
    assert!(matches!(items[0], FeedItem::Header { visible: true, .. }));
    assert!(items[1..].iter().all(|it| it.kind() == ItemKind::Content));

    let empty = Section::new(ARTICLES, Vec::new(), CategoryStatus::Available);
    let items = empty.items();
    assert_eq!(items.len(), 3);
    assert_eq!(
        items.iter().map(FeedItem::kind).collect::<Vec<_>>(),
        vec![ItemKind::Header, ItemKind::Status, ItemKind::Progress]
    );
    assert!(!items[0].is_visible());
    assert!(!empty.is_header_visible());
}

#[test]
fn status_card_and_progress_follow_category_status() {
    let s = Section::new(ARTICLES, Vec::new(), CategoryStatus::Initializing);
    assert_eq!(s.status_card(), StatusCard::Loading);
    assert!(s.is_progress_visible());

    let s = Section::new(ARTICLES, Vec::new(), CategoryStatus::Available);
    assert_eq!(s.status_card(), StatusCard::NoContent);
    assert!(!s.is_progress_visible());

    let s = Section::new(ARTICLES, Vec::new(), CategoryStatus::LoadingError);
    assert_eq!(s.status_card(), StatusCard::ErrorWithRetry);

    let s = Section::new(ARTICLES, Vec::new(), CategoryStatus::AllDisabled);
    assert_eq!(s.status_card(), StatusCard::NoContent);

    let s = Section::new(ARTICLES, entries(&["a"]), CategoryStatus::AvailableLoading);
    assert_eq!(s.status_card(), StatusCard::Hidden);
    assert!(s.is_progress_visible());
    // Placeholders are not emitted while entries exist.
    assert_eq!(s.items().len(), 2);
}

#[test]
fn category_status_helpers() {
    assert!(CategoryStatus::Available.is_available());
    assert!(CategoryStatus::AvailableLoading.is_available());
    assert!(!CategoryStatus::Initializing.is_available());
    assert!(CategoryStatus::Initializing.is_init_or_available());
    assert!(!CategoryStatus::LoadingError.is_init_or_available());
    assert!(CategoryStatus::Initializing.is_loading());
    assert!(!CategoryStatus::NotProvidedByServer.is_loading());
}

#[test]
fn set_entries_carries_thumbnails_over_by_id() {
    let mut s = Section::new(ARTICLES, entries(&["a", "b"]), CategoryStatus::Available);
    let a_thumb = thumb(7);
    assert_eq!(s.attach_thumbnail("a", a_thumb.clone()), Some(0));

    s.set_entries(entries(&["c", "a"]), CategoryStatus::Available);
    let kept = s.entries()[1].thumbnail.as_ref().unwrap();
    assert!(kept.ptr_eq(&a_thumb));
    assert!(s.entries()[0].thumbnail.is_none());

    s.set_entries(entries(&["x", "y"]), CategoryStatus::Available);
    assert!(s.entries().iter().all(|e| e.thumbnail.is_none()));
}

#[test]
fn incoming_thumbnail_is_not_overwritten() {
    let mut s = Section::new(ARTICLES, entries(&["a"]), CategoryStatus::Available);
    s.attach_thumbnail("a", thumb(1));
    let fresh = thumb(2);
    s.set_entries(
        vec![entry("a").with_thumbnail(Some(fresh.clone()))],
        CategoryStatus::Available,
    );
    assert!(s.entries()[0].thumbnail.as_ref().unwrap().ptr_eq(&fresh));
}

#[test]
fn dismiss_hides_header_only_when_empty() {
    let mut s = Section::new(ARTICLES, entries(&["a", "b"]), CategoryStatus::Available);
    assert!(s.dismiss_entry("a").is_some());
    assert!(s.is_header_visible());
    assert!(s.dismiss_entry("b").is_some());
    assert!(!s.is_header_visible());
    assert_eq!(s.items().len(), 3);
    assert_eq!(s.status_card(), StatusCard::NoContent);
}

#[test]
fn dismiss_is_idempotent() {
    let mut once = Section::new(ARTICLES, entries(&["a", "b"]), CategoryStatus::Available);
    let mut twice = once.clone();
    once.dismiss_entry("a");
    twice.dismiss_entry("a");
    assert!(twice.dismiss_entry("a").is_none());
    assert_eq!(once, twice);
    assert!(once.dismiss_entry("missing").is_none());
}

// FeedModel

#[test]
fn empty_model_has_fold_and_spacer_only() {
    let m = FeedModel::new();
    assert_eq!(
        m.items().iter().map(FeedItem::kind).collect::<Vec<_>>(),
        vec![ItemKind::AboveFold, ItemKind::Spacer]
    );
    let p = m.positions();
    assert_eq!(p.above_fold, Some(0));
    assert_eq!(p.bottom_spacer, Some(1));
    assert_eq!(p.first_header, None);
    assert_eq!(p.first_content, None);
    assert_eq!(p.last_content, None);
}

#[test]
fn model_flattens_sections_in_order() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, entries(&["a", "b"]), CategoryStatus::Available);
    m.set_entries(BOOKMARKS, entries(&["c"]), CategoryStatus::Available);

    let ids: Vec<ItemId> = m.items().iter().map(FeedItem::stable_id).collect();
    assert_eq!(
        ids,
        vec![
            ItemId::AboveFold,
            ItemId::Header(ARTICLES),
            ItemId::Content(ARTICLES, String::from("a")),
            ItemId::Content(ARTICLES, String::from("b")),
            ItemId::Header(BOOKMARKS),
            ItemId::Content(BOOKMARKS, String::from("c")),
            ItemId::BottomSpacer,
        ]
    );
    assert_eq!(m.first_header_position(), Some(1));
    assert_eq!(m.first_content_position(), Some(2));
    assert_eq!(m.last_content_position(), Some(5));
    assert_eq!(m.bottom_spacer_position(), Some(6));
    assert_eq!(m.position_of(&ItemId::Header(BOOKMARKS)), Some(4));
}

#[test]
fn first_content_skips_empty_sections() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, Vec::new(), CategoryStatus::Initializing);
    m.set_entries(BOOKMARKS, entries(&["c"]), CategoryStatus::Available);
    // fold, [header, status, progress], [header, c], spacer
    assert_eq!(m.first_header_position(), Some(1));
    assert_eq!(m.first_content_position(), Some(5));
    assert_eq!(m.last_content_position(), Some(5));
}

#[test]
fn last_content_falls_back_to_placeholders() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, Vec::new(), CategoryStatus::Initializing);
    m.set_entries(BOOKMARKS, Vec::new(), CategoryStatus::Available);
    assert_eq!(m.first_content_position(), None);
    // fold, [h, s, p], [h, s, p], spacer
    assert_eq!(m.last_content_position(), Some(6));
    assert_eq!(m.item(6).map(FeedItem::kind), Some(ItemKind::Progress));
}

#[test]
fn feed_changes_describe_replaced_ranges() {
    let mut m = FeedModel::new();
    let c = m.set_entries(ARTICLES, entries(&["a", "b"]), CategoryStatus::Available);
    assert_eq!(
        c,
        FeedChange {
            start: 1,
            removed: 0,
            inserted: 3
        }
    );
    let c = m.set_entries(BOOKMARKS, Vec::new(), CategoryStatus::Initializing);
    assert_eq!(c.start, 4);
    assert_eq!(c.inserted, 3);

    let c = m.set_entries(ARTICLES, entries(&["a"]), CategoryStatus::Available);
    assert_eq!(
        c,
        FeedChange {
            start: 1,
            removed: 3,
            inserted: 2
        }
    );

    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, entries(&["a", "b"]), CategoryStatus::Available);
    let c = m.dismiss_entry(ARTICLES, "b").unwrap();
    assert_eq!(
        c,
        FeedChange {
            start: 3,
            removed: 1,
            inserted: 0
        }
    );
    let c = m.dismiss_entry(ARTICLES, "a").unwrap();
    assert_eq!(
        c,
        FeedChange {
            start: 1,
            removed: 2,
            inserted: 3
        }
    );
    assert!(m.dismiss_entry(ARTICLES, "a").is_none());
    assert!(m.dismiss_entry(BOOKMARKS, "a").is_none());
}

#[test]
fn item_snapshot_is_detached_from_model() {
    let mut m = FeedModel::new();
    assert!(!m.has_sections());
    m.set_entries(ARTICLES, entries(&["a"]), CategoryStatus::Available);
    let mut snapshot = m.items().to_vec();
    snapshot.clear();
    assert_eq!(m.len(), 4);
    assert!(m.has_sections());
    assert_eq!(m.first_content_position(), Some(2));
}

#[test]
fn attach_thumbnail_replaces_item_and_survives_refresh() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, entries(&["a", "b"]), CategoryStatus::Available);
    assert_eq!(
        m.attach_thumbnail(ARTICLES, "b", thumb(3)),
        Some(FeedChange {
            start: 3,
            removed: 1,
            inserted: 1,
        })
    );
    assert_eq!(m.attach_thumbnail(ARTICLES, "zzz", thumb(3)), None);

    m.set_entries(ARTICLES, entries(&["b"]), CategoryStatus::Available);
    let item = m.item(2).unwrap();
    assert!(item.entry().unwrap().thumbnail.is_some());
    assert!(m.has_content());
}

// distribute

#[test]
fn distribute_at_ideal_returns_ideals() {
    let ideals = SpacerHeights::new(44, 24, 44);
    assert_eq!(distribute(112, ideals, 112), ideals);
}

#[test]
fn distribute_shrinks_proportionally() {
    let ideals = SpacerHeights::new(44, 24, 44);
    // 50 * 44/112 = 19.64, 50 * 24/112 = 10.71
    assert_eq!(distribute(50, ideals, 112), SpacerHeights::new(20, 11, 19));
    assert_eq!(distribute(0, ideals, 112), SpacerHeights::new(0, 0, 0));
}

#[test]
fn distribute_rounds_half_up_without_going_negative() {
    let ideals = SpacerHeights::new(1, 1, 0);
    assert_eq!(distribute(1, ideals, 2), SpacerHeights::new(1, 0, 0));
}

#[test]
fn distribute_surplus_goes_to_outer_regions() {
    let ideals = SpacerHeights::new(44, 24, 44);
    assert_eq!(distribute(224, ideals, 112), SpacerHeights::new(100, 24, 100));
    // Odd surplus: the bottom region takes the extra pixel.
    assert_eq!(distribute(113, ideals, 112), SpacerHeights::new(44, 24, 45));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "total ideal out of sync")]
fn distribute_rejects_stale_total() {
    let ideals = SpacerHeights::new(44, 24, 44);
    distribute(200, ideals, 50);
}

#[test]
#[cfg(not(debug_assertions))]
fn distribute_ignores_stale_total() {
    let ideals = SpacerHeights::new(44, 24, 44);
    // The real total is 112: surplus 88 keeps the bottom region above its ideal.
    assert_eq!(distribute(200, ideals, 50), SpacerHeights::new(88, 24, 88));
}

#[test]
fn ideal_heights_scale_with_density() {
    assert_eq!(SpacerHeights::ideal_for_density(1.0), SpacerHeights::new(44, 24, 44));
    assert_eq!(SpacerHeights::ideal_for_density(2.0), SpacerHeights::new(88, 48, 88));
    assert_eq!(SpacerHeights::ideal_for_density(1.5), SpacerHeights::new(66, 36, 66));
}

proptest! {
    #[test]
    fn distribute_sums_to_extra(
        top in 0u32..200,
        middle in 0u32..200,
        bottom in 0u32..200,
        extra in 0u32..2000,
    ) {
        let ideals = SpacerHeights::new(top, middle, bottom);
        let out = distribute(extra, ideals, ideals.sum());
        prop_assert_eq!(out.sum(), extra);
        if extra >= ideals.sum() {
            prop_assert_eq!(out.middle, middle);
            prop_assert!(out.top >= top);
            prop_assert!(out.bottom >= bottom);
        } else {
            prop_assert!(out.middle <= middle);
        }
        prop_assert_eq!(distribute(extra, ideals, ideals.sum()), out);
    }

    #[test]
    fn ledger_returns_to_zero(
        heights in prop::collection::vec(1u32..500, 0..24),
        finish_first in prop::collection::vec(any::<bool>(), 0..48),
    ) {
        let model = FeedModel::new();
        let layout = FakeLayout::new(1000, vec![0, 0]);
        let mut c = ScrollSnapController::new(band_config());
        let mut pending: Vec<u32> = Vec::new();
        let mut next = heights.iter().copied();
        let mut flags = finish_first.iter().copied();

        loop {
            let finish = flags.next().unwrap_or(true);
            if finish && !pending.is_empty() {
                let h = pending.remove(0);
                c.on_item_dismiss_finished(h);
            } else if let Some(h) = next.next() {
                c.on_item_dismiss_started(h, &model, &layout);
                pending.push(h);
            } else if let Some(h) = pending.pop() {
                c.on_item_dismiss_finished(h);
            } else {
                break;
            }
            prop_assert_eq!(c.compensation_height(), pending.iter().sum::<u32>());
        }
        prop_assert_eq!(c.compensation_height(), 0);
        prop_assert_eq!(c.dismissals_in_flight(), 0);
    }
}

// scroll_out_of_region

#[test]
fn scroll_out_of_region_snaps_to_nearest_bound() {
    assert_eq!(scroll_out_of_region(50, 100, 150, 200), Snap::Unchanged);
    assert_eq!(
        scroll_out_of_region(120, 100, 150, 200),
        Snap::Corrected { target: 100 }
    );
    assert_eq!(
        scroll_out_of_region(180, 100, 150, 200),
        Snap::Corrected { target: 200 }
    );
    assert_eq!(
        scroll_out_of_region(100, 100, 150, 200),
        Snap::Corrected { target: 100 }
    );
    assert_eq!(
        scroll_out_of_region(200, 100, 150, 200),
        Snap::Corrected { target: 200 }
    );
    assert_eq!(scroll_out_of_region(201, 100, 150, 200), Snap::Unchanged);
}

#[test]
fn scroll_out_of_region_mid_flips_at_midpoint() {
    assert_eq!(
        scroll_out_of_region_mid(149, 100, 200),
        Snap::Corrected { target: 100 }
    );
    assert_eq!(
        scroll_out_of_region_mid(150, 100, 200),
        Snap::Corrected { target: 200 }
    );
    assert_eq!(Snap::Corrected { target: 200 }.delta_from(150), 50);
    assert_eq!(Snap::Unchanged.delta_from(150), 0);
}

// ScrollSnapController

#[test]
fn bottom_spacing_tracks_content_height() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, entries(&["a", "b", "c"]), CategoryStatus::Available);
    let layout = FakeLayout::for_model(1000, &m, standard_heights);
    let mut c = ScrollSnapController::new(band_config());

    // content = header(40) + 3 cards(300)
    let before = c.compute_bottom_spacing(&m, &layout);
    assert_eq!(before, 1000 - 100 - 340);

    m.set_entries(
        ARTICLES,
        entries(&["a", "b", "c", "tall"]),
        CategoryStatus::Available,
    );
    let layout = FakeLayout::for_model(1000, &m, |item| match item {
        FeedItem::Content { entry, .. } if entry.id == "tall" => 200,
        other => standard_heights(other),
    });
    let after = c.compute_bottom_spacing(&m, &layout);
    assert_eq!(before - after, 200);
    assert_eq!(c.bottom_spacing(), after);
}

#[test]
fn bottom_spacing_is_clamped_to_minimum() {
    let mut m = FeedModel::new();
    let ids: Vec<String> = (0..12).map(|i| alloc::format!("e{i}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    m.set_entries(ARTICLES, entries(&refs), CategoryStatus::Available);
    let layout = FakeLayout::for_model(1000, &m, standard_heights);
    let mut c = ScrollSnapController::new(band_config());
    assert_eq!(c.compute_bottom_spacing(&m, &layout), 8);
}

#[test]
fn bottom_spacing_is_minimal_once_header_scrolled_past() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, entries(&["a", "b", "c"]), CategoryStatus::Available);
    let mut layout = FakeLayout::for_model(1000, &m, standard_heights);
    layout.offset = 700; // past fold(600) and header(40)
    assert_eq!(layout.first_visible_position(), Some(2));
    let mut c = ScrollSnapController::new(band_config());
    assert_eq!(c.compute_bottom_spacing(&m, &layout), 8);
}

#[test]
fn bottom_spacing_over_reserves_when_items_detached() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, entries(&["a", "b", "c"]), CategoryStatus::Available);
    let mut layout = FakeLayout::for_model(1000, &m, standard_heights);
    let mut c = ScrollSnapController::new(band_config());
    assert_eq!(c.compute_bottom_spacing(&m, &layout), 560);

    // Last card missing: viewport - band - header top.
    layout.detached = vec![4];
    assert_eq!(c.compute_bottom_spacing(&m, &layout), 1000 - 100 - 600);

    // Nothing measurable: viewport - band.
    layout.detached = vec![1, 4];
    assert_eq!(c.compute_bottom_spacing(&m, &layout), 900);
}

#[test]
fn bottom_spacing_for_empty_feed_uses_placeholders() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, Vec::new(), CategoryStatus::Initializing);
    let layout = FakeLayout::for_model(1000, &m, standard_heights);
    let mut c = ScrollSnapController::new(band_config());
    // header(40) + status(120) + progress(20)
    assert_eq!(c.compute_bottom_spacing(&m, &layout), 1000 - 100 - 180);
}

#[test]
fn dismiss_start_grows_spacing_before_item_shrinks() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, entries(&["a", "b", "c"]), CategoryStatus::Available);
    let layout = FakeLayout::for_model(1000, &m, standard_heights);
    let mut c = ScrollSnapController::new(band_config());
    let base = c.compute_bottom_spacing(&m, &layout);

    let grown = c.on_item_dismiss_started(100, &m, &layout);
    assert_eq!(grown, base + 100);
    assert_eq!(c.compensation_height(), 100);

    c.on_item_dismiss_started(40, &m, &layout);
    assert_eq!(c.compensation_height(), 140);
    c.on_item_dismiss_finished(100);
    c.on_item_dismiss_finished(40);
    assert_eq!(c.compensation_height(), 0);
    assert_eq!(c.dismissals_in_flight(), 0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "compensation ledger underflow")]
fn ledger_underflow_is_a_defect() {
    let mut c = ScrollSnapController::new(band_config());
    c.on_item_dismiss_finished(10);
}

#[test]
fn detach_resets_ledger() {
    let m = FeedModel::new();
    let layout = FakeLayout::new(1000, vec![0, 0]);
    let mut c = ScrollSnapController::new(band_config());
    c.on_item_dismiss_started(250, &m, &layout);
    c.detach();
    assert_eq!(c.state().compensation_height, 0);
    assert_eq!(c.state().dismissals_in_flight, 0);
    assert_eq!(c.bottom_spacing(), 8);
}

/// A feed whose above-the-fold region leaves exactly `peek` pixels of the first card visible.
fn peeking_feed() -> (FeedModel, FakeLayout) {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, entries(&["a", "b", "c"]), CategoryStatus::Available);
    let layout = FakeLayout::for_model(1000, &m, |item| match item {
        FeedItem::AboveFold => 968,
        other => standard_heights(other),
    });
    (m, layout)
}

#[test]
fn snap_out_of_search_box_transition() {
    let (m, mut layout) = peeking_feed();
    let c = ScrollSnapController::new(band_config());

    // Search box top at 300: zone [260, 300], flip at 280.
    layout.offset = 270;
    assert_eq!(
        c.snap_scroll(&m, &layout, 300, 270, 1000),
        Snap::Corrected { target: 260 }
    );
    layout.offset = 285;
    assert_eq!(
        c.snap_scroll(&m, &layout, 300, 285, 1000),
        Snap::Corrected { target: 300 }
    );
    layout.offset = 400;
    assert_eq!(c.snap_scroll(&m, &layout, 300, 400, 1000), Snap::Unchanged);
}

#[test]
fn snap_peeking_card_only_when_it_can_peek() {
    let (m, mut layout) = peeking_feed();
    let mut c = ScrollSnapController::new(band_config());
    layout.offset = 30;

    // Without peeking space the card zone is skipped.
    assert!(!c.can_peek());
    assert_eq!(c.snap_scroll(&m, &layout, 300, 30, 1000), Snap::Unchanged);

    let pass = c.set_has_space_for_peeking_card(true, &m, &layout).unwrap();
    assert!(pass.can_peek);

    // Card absolute top 1008, header 40: start = 1008 - 40 - 1000 + 32 = 0, end = 50 + 40.
    let zone = c.peeking_card_zone(&m, &layout, 30, 1000).unwrap();
    assert_eq!(zone, SnapZone::new(0, 90, 90));
    assert_eq!(
        c.snap_scroll(&m, &layout, 300, 30, 1000),
        Snap::Corrected { target: 0 }
    );

    layout.offset = 90;
    assert_eq!(
        c.snap_scroll(&m, &layout, 300, 90, 1000),
        Snap::Corrected { target: 90 }
    );

    layout.offset = 120;
    assert_eq!(c.snap_scroll(&m, &layout, 300, 120, 1000), Snap::Unchanged);
}

#[test]
fn snap_peeking_card_requires_fold_visible() {
    let (m, mut layout) = peeking_feed();
    let mut c = ScrollSnapController::new(band_config());
    c.set_has_space_for_peeking_card(true, &m, &layout);
    layout.offset = 980; // above-the-fold item scrolled out
    assert_eq!(layout.first_visible_position(), Some(1));
    assert_eq!(c.peeking_card_zone(&m, &layout, 980, 1000), None);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "snap zones overlap")]
fn overlapping_snap_zones_are_a_defect() {
    let (m, mut layout) = peeking_feed();
    let mut c = ScrollSnapController::new(band_config());
    c.set_has_space_for_peeking_card(true, &m, &layout);
    layout.offset = 30;
    // Search box zone [40, 80] against the card zone [0, 90].
    c.snap_scroll(&m, &layout, 80, 30, 1000);
}

#[test]
fn peeking_space_transition_recomputes_in_order() {
    let (m, layout) = peeking_feed();
    let mut c = ScrollSnapController::new(band_config());

    assert_eq!(c.set_has_space_for_peeking_card(false, &m, &layout), None);

    let pass = c.set_has_space_for_peeking_card(true, &m, &layout).unwrap();
    // Header top 968: 1000 - 968 - 32 = 0 revealed.
    assert_eq!(
        pass,
        LayoutPass {
            can_peek: true,
            header_height: 0,
            bottom_spacing: 1000 - 100 - 340,
        }
    );
    assert_eq!(c.set_has_space_for_peeking_card(true, &m, &layout), None);

    let pass = c.set_has_space_for_peeking_card(false, &m, &layout).unwrap();
    assert!(!pass.can_peek);
    assert_eq!(pass.header_height, 40);
}

#[test]
fn header_grows_as_cards_scroll_up() {
    let (m, mut layout) = peeking_feed();
    let mut c = ScrollSnapController::new(band_config());
    c.set_has_space_for_peeking_card(true, &m, &layout);

    layout.offset = 20;
    assert_eq!(c.update_header_display(&m, &layout), 20);
    layout.offset = 200;
    assert_eq!(c.update_header_display(&m, &layout), 40);
}

#[test]
fn empty_feed_cannot_peek() {
    let mut m = FeedModel::new();
    m.set_entries(ARTICLES, Vec::new(), CategoryStatus::Initializing);
    let layout = FakeLayout::for_model(1000, &m, standard_heights);
    let mut c = ScrollSnapController::new(band_config());
    let pass = c.set_has_space_for_peeking_card(true, &m, &layout).unwrap();
    assert!(!pass.can_peek);
    // The hidden header takes no space.
    assert_eq!(pass.header_height, 0);
}

#[test]
fn first_card_target_skips_fold_padding() {
    let c = ScrollSnapController::new(band_config());
    assert_eq!(c.scroll_to_first_card_target(968, 56), 912);
}

// AboveFold

struct FakeFold {
    fixed: u32,
    anchor: u32,
    requests: Vec<MeasureRequest>,
}

impl FakeFold {
    fn new(fixed: u32, anchor: u32) -> Self {
        Self {
            fixed,
            anchor,
            requests: Vec::new(),
        }
    }
}

impl FoldContent for FakeFold {
    fn measure(&mut self, request: MeasureRequest) -> u32 {
        self.requests.push(request);
        match request {
            MeasureRequest::Natural {
                scroll_compensation,
            } => self.fixed + scroll_compensation,
            MeasureRequest::Exactly(height) => height,
        }
    }

    fn anchor_top(&self) -> u32 {
        self.anchor
    }
}

fn fold_config() -> FoldConfig {
    FoldConfig::new(SpacerHeights::new(44, 24, 44)).with_peeking_card_height(32)
}

#[test]
fn overflowing_fold_adds_scroll_compensation_once() {
    let mut fold = AboveFold::new(fold_config());
    let mut content = FakeFold::new(1000, 300);
    let layout = fold.negotiate(800, &mut content);

    assert!(!layout.has_space_for_peeking_card);
    assert_eq!(layout.scroll_compensation, 100);
    assert_eq!(layout.height, 1100);
    assert_eq!(layout.passes, 2);
    assert_eq!(layout.spacers, SpacerHeights::default());
    assert_eq!(content.requests.len(), 2);
    assert!(!fold.has_space_for_peeking_card());
}

#[test]
fn overflowing_fold_without_shortfall_measures_once() {
    let mut fold = AboveFold::new(fold_config());
    let mut content = FakeFold::new(1000, 150);
    let layout = fold.negotiate(800, &mut content);
    assert_eq!(layout.scroll_compensation, 0);
    assert_eq!(layout.passes, 1);

    let mut cards = AboveFold::new(fold_config().with_cards_mode(true));
    let mut content = FakeFold::new(1000, 300);
    let layout = cards.negotiate(800, &mut content);
    assert_eq!(layout.scroll_compensation, 0);
    assert_eq!(layout.height, 1000);
    assert_eq!(content.requests.len(), 1);
}

#[test]
fn fitting_fold_in_cards_mode_leaves_room_for_peek() {
    let mut fold = AboveFold::new(fold_config().with_cards_mode(true));
    let mut content = FakeFold::new(500, 200);
    let layout = fold.negotiate(1000, &mut content);

    assert!(layout.has_space_for_peeking_card);
    assert_eq!(layout.height, 968);
    assert_eq!(layout.passes, 2);
    assert_eq!(content.requests[1], MeasureRequest::Exactly(968));
    assert_eq!(layout.spacers, SpacerHeights::new(222, 24, 222));
    assert_eq!(layout.spacers.sum(), 468);
    assert!(fold.has_space_for_peeking_card());
}

#[test]
fn fitting_fold_in_cards_mode_subtracts_tab_strip() {
    let mut fold = AboveFold::new(
        fold_config()
            .with_cards_mode(true)
            .with_tab_strip_height(40),
    );
    let mut content = FakeFold::new(500, 200);
    assert_eq!(fold.negotiate(1000, &mut content).height, 928);
}

#[test]
fn fitting_fold_fills_viewport_outside_cards_mode() {
    let mut fold = AboveFold::new(fold_config());
    let mut content = FakeFold::new(550, 200);
    let layout = fold.negotiate(600, &mut content);
    assert!(layout.has_space_for_peeking_card);
    assert_eq!(layout.height, 600);
    assert_eq!(layout.passes, 1);
    assert_eq!(layout.spacers, SpacerHeights::new(20, 11, 19));
}

#[test]
fn snap_config_defaults_scale_with_density() {
    let c = SnapConfig::for_density(2.0);
    assert_eq!(c.header_band_height, 116);
    assert_eq!(c.min_bottom_spacing, 16);
    assert_eq!(SnapConfig::default(), SnapConfig::for_density(1.0));
    assert_eq!(FoldConfig::default().total_ideal, 112);
}
