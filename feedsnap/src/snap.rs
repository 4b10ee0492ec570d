use crate::{FeedModel, ItemBounds, LayoutPass, Snap, SnapConfig, SnapState, SnapZone};

/// The measurement seam of the feed list, implemented by the rendering layer.
///
/// The controller works on logical positions from [`FeedModel`]; this trait resolves them to
/// whatever is currently attached on screen.
pub trait FeedLayout {
    /// Height of the scrolling viewport.
    fn viewport_height(&self) -> i32;

    /// Current vertical scroll offset of the list.
    fn scroll_offset(&self) -> i32;

    /// Position of the first (partially) visible item, or `None` if nothing is laid out.
    fn first_visible_position(&self) -> Option<usize>;

    /// Bounds of the item at `position`, or `None` if it is not attached/measured yet.
    fn item_bounds(&self, position: usize) -> Option<ItemBounds>;
}

/// If `offset` lies within `[start, end]`, returns a correction to `start` (offset below
/// `flip`) or to `end` (otherwise).
pub fn scroll_out_of_region(offset: i32, start: i32, flip: i32, end: i32) -> Snap {
    snap_out_of(offset, SnapZone::new(start, flip, end))
}

/// [`scroll_out_of_region`] flipping at the midpoint of `[start, end]`.
pub fn scroll_out_of_region_mid(offset: i32, start: i32, end: i32) -> Snap {
    snap_out_of(offset, SnapZone::with_midpoint(start, end))
}

fn snap_out_of(offset: i32, zone: SnapZone) -> Snap {
    if !zone.contains(offset) {
        return Snap::Unchanged;
    }
    let target = if offset < zone.flip {
        zone.start
    } else {
        zone.end
    };
    Snap::Corrected { target }
}

/// Computes trailing space and snap corrections for a feed.
///
/// Invariants:
/// - the bottom spacing is never below `min_bottom_spacing`
/// - the compensation ledger never goes negative, and is zero once every dismissal that
///   started has finished
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollSnapController {
    config: SnapConfig,
    compensation_height: u32,
    dismissals_in_flight: u32,
    bottom_spacing: u32,
    has_space_for_peeking_card: bool,
    can_peek: bool,
    header_height: u32,
}

impl ScrollSnapController {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            compensation_height: 0,
            dismissals_in_flight: 0,
            bottom_spacing: config.min_bottom_spacing,
            has_space_for_peeking_card: false,
            can_peek: false,
            header_height: config.max_header_height,
            config,
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SnapConfig) {
        self.config = config;
    }

    pub fn compensation_height(&self) -> u32 {
        self.compensation_height
    }

    pub fn dismissals_in_flight(&self) -> u32 {
        self.dismissals_in_flight
    }

    /// The trailing spacer height from the last computation.
    pub fn bottom_spacing(&self) -> u32 {
        self.bottom_spacing
    }

    pub fn has_space_for_peeking_card(&self) -> bool {
        self.has_space_for_peeking_card
    }

    pub fn can_peek(&self) -> bool {
        self.can_peek
    }

    pub fn header_height(&self) -> u32 {
        self.header_height
    }

    pub fn state(&self) -> SnapState {
        SnapState {
            compensation_height: self.compensation_height,
            dismissals_in_flight: self.dismissals_in_flight,
            bottom_spacing: self.bottom_spacing,
            has_space_for_peeking_card: self.has_space_for_peeking_card,
            can_peek: self.can_peek,
            header_height: self.header_height,
        }
    }

    /// Computes the height of the trailing spacer so there is always enough content below the
    /// fold to push the first header up to the header band.
    ///
    /// When the reference items are not attached (refresh while off screen, a status card
    /// replacing the last dismissed card, refresh below the fold) this over-reserves with the
    /// full viewport height; the next layout pass corrects it.
    pub fn compute_bottom_spacing(
        &mut self,
        model: &FeedModel,
        layout: &impl FeedLayout,
    ) -> u32 {
        let min = self.config.min_bottom_spacing as i64;
        let first_header = model.first_header_position();

        // The first header is scrolled off already: the content fills the view.
        if let (Some(first_visible), Some(first_header)) =
            (layout.first_visible_position(), first_header)
        {
            if first_visible > first_header {
                self.bottom_spacing = self.config.min_bottom_spacing;
                return self.bottom_spacing;
            }
        }

        let header = first_header.and_then(|p| layout.item_bounds(p));
        let last = model
            .last_content_position()
            .and_then(|p| layout.item_bounds(p));

        let mut spacing =
            layout.viewport_height() as i64 - self.config.header_band_height as i64;
        match (header, last) {
            (Some(header), Some(last)) => {
                let content_height = last.bottom as i64 - header.top as i64;
                spacing -= content_height - self.compensation_height as i64;
            }
            _ => {
                if let Some(header) = header {
                    spacing -= header.top as i64;
                }
                fwarn!(
                    header_attached = header.is_some(),
                    last_attached = last.is_some(),
                    spacing,
                    "reference items not attached, reserving full height"
                );
            }
        }

        self.bottom_spacing = spacing.max(min).min(u32::MAX as i64) as u32;
        self.bottom_spacing
    }

    /// Records an item starting its exit animation and immediately recomputes the bottom
    /// spacing, so the trailing space grows before the item shrinks.
    pub fn on_item_dismiss_started(
        &mut self,
        item_height: u32,
        model: &FeedModel,
        layout: &impl FeedLayout,
    ) -> u32 {
        self.compensation_height = self.compensation_height.saturating_add(item_height);
        self.dismissals_in_flight = self.dismissals_in_flight.saturating_add(1);
        fdebug!(
            item_height,
            compensation = self.compensation_height,
            "dismiss started"
        );
        self.compute_bottom_spacing(model, layout)
    }

    /// Records an item finishing its exit animation.
    pub fn on_item_dismiss_finished(&mut self, item_height: u32) {
        if item_height > self.compensation_height || self.dismissals_in_flight == 0 {
            fwarn!(
                item_height,
                compensation = self.compensation_height,
                in_flight = self.dismissals_in_flight,
                "compensation ledger underflow"
            );
        }
        debug_assert!(
            item_height <= self.compensation_height,
            "compensation ledger underflow (height={item_height}, ledger={})",
            self.compensation_height
        );
        self.compensation_height = self.compensation_height.saturating_sub(item_height);
        self.dismissals_in_flight = self.dismissals_in_flight.saturating_sub(1);
        debug_assert!(
            self.dismissals_in_flight > 0 || self.compensation_height == 0,
            "compensation ledger not balanced after last dismissal (ledger={})",
            self.compensation_height
        );
    }

    /// The band in which the search box morphs into the toolbar.
    pub fn search_box_zone(&self, search_box_top: i32) -> SnapZone {
        let length = self.config.search_box_transition_length as i32;
        SnapZone::with_midpoint(search_box_top - length, search_box_top)
    }

    /// The band in which the first card transitions from peeking to entering the view.
    ///
    /// `None` when the first card or header is not attached, the above-the-fold item is not the
    /// first visible item, or the card cannot peek.
    pub fn peeking_card_zone(
        &self,
        model: &FeedModel,
        layout: &impl FeedLayout,
        parent_scroll_y: i32,
        parent_height: i32,
    ) -> Option<SnapZone> {
        let card = layout.item_bounds(model.first_content_position()?)?;
        if layout.first_visible_position() != model.above_fold_position() {
            return None;
        }
        if !self.can_peek {
            return None;
        }
        let header = layout.item_bounds(model.first_header_position()?)?;
        let header_height = header.height() as i32;

        // `card.top + parent_scroll_y - header_height` puts the card at the top of the screen;
        // subtracting the parent height puts it just below the bottom edge, and the peeking
        // height moves that to the card's resting point.
        let start = card.top + parent_scroll_y - header_height - parent_height
            + self.config.peeking_card_height as i32;
        let end = start + card.height() as i32 / 2 + header_height;
        Some(SnapZone::new(start, end, end))
    }

    /// Evaluates the forbidden zones in priority order (search box band, then peeking card
    /// band) and returns the correction for the first one containing the current offset.
    pub fn snap_scroll(
        &self,
        model: &FeedModel,
        layout: &impl FeedLayout,
        search_box_top: i32,
        parent_scroll_y: i32,
        parent_height: i32,
    ) -> Snap {
        let offset = layout.scroll_offset();
        let box_zone = self.search_box_zone(search_box_top);
        let snap = snap_out_of(offset, box_zone);
        if snap.is_corrected() {
            ftrace!(offset, target = ?snap.target(), "snap out of search box transition");
            return snap;
        }

        let Some(card_zone) = self.peeking_card_zone(model, layout, parent_scroll_y, parent_height)
        else {
            return Snap::Unchanged;
        };
        if box_zone.overlaps(&card_zone) {
            fwarn!(?box_zone, ?card_zone, "snap zones overlap");
        }
        debug_assert!(
            !box_zone.overlaps(&card_zone),
            "snap zones overlap ({box_zone:?}, {card_zone:?})"
        );
        let snap = snap_out_of(offset, card_zone);
        if snap.is_corrected() {
            ftrace!(offset, target = ?snap.target(), "snap out of peeking card transition");
        }
        snap
    }

    /// Updates whether the above-the-fold region leaves room for a peeking card.
    ///
    /// On a change, re-runs the coupled recomputation ([`ScrollSnapController::refresh`]).
    pub fn set_has_space_for_peeking_card(
        &mut self,
        has_space: bool,
        model: &FeedModel,
        layout: &impl FeedLayout,
    ) -> Option<LayoutPass> {
        if self.has_space_for_peeking_card == has_space {
            return None;
        }
        fdebug!(has_space, "peeking space changed");
        self.has_space_for_peeking_card = has_space;
        Some(self.refresh(model, layout))
    }

    /// Re-evaluates, in order, the peeking state of the first card, the header's transition
    /// height, and the bottom spacing. Call on viewport size or content changes.
    pub fn refresh(&mut self, model: &FeedModel, layout: &impl FeedLayout) -> LayoutPass {
        let can_peek = self.update_peeking_card(model);
        let header_height = self.update_header_display(model, layout);
        let bottom_spacing = self.compute_bottom_spacing(model, layout);
        LayoutPass {
            can_peek,
            header_height,
            bottom_spacing,
        }
    }

    /// The first card may peek when there is room for it and it exists.
    pub fn update_peeking_card(&mut self, model: &FeedModel) -> bool {
        self.can_peek =
            self.has_space_for_peeking_card && model.first_content_position().is_some();
        self.can_peek
    }

    /// Height of the first section header.
    ///
    /// While the card can peek, the header grows from nothing at the card's resting point to
    /// its full height as it is scrolled up by the peeking distance plus its own height.
    /// Otherwise it is shown at full height (or not at all, when hidden).
    pub fn update_header_display(&mut self, model: &FeedModel, layout: &impl FeedLayout) -> u32 {
        let max = self.config.max_header_height;
        let Some(position) = model.first_header_position() else {
            self.header_height = 0;
            return 0;
        };
        if !model.item(position).is_some_and(|item| item.is_visible()) {
            self.header_height = 0;
            return 0;
        }

        self.header_height = match layout.item_bounds(position) {
            Some(bounds) if self.has_space_for_peeking_card => {
                let revealed = layout.viewport_height() as i64
                    - bounds.top as i64
                    - self.config.peeking_card_height as i64;
                revealed.clamp(0, max as i64) as u32
            }
            _ => max,
        };
        self.header_height
    }

    /// The offset at which the first card sits right below the header band: the above-the-fold
    /// height minus its top padding (the space the toolbar covers).
    pub fn scroll_to_first_card_target(&self, fold_height: u32, fold_padding_top: u32) -> i32 {
        fold_height as i32 - fold_padding_top as i32
    }

    /// Drops transient state when the feed surface is detached.
    pub fn detach(&mut self) {
        fdebug!(
            compensation = self.compensation_height,
            in_flight = self.dismissals_in_flight,
            "detach"
        );
        self.compensation_height = 0;
        self.dismissals_in_flight = 0;
        self.bottom_spacing = self.config.min_bottom_spacing;
    }
}
