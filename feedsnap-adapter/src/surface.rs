use alloc::vec::Vec;

use feedsnap::{
    AboveFold, CategoryId, CategoryStatus, ContentEntry, FeedChange, FeedLayout, FeedModel,
    FoldConfig, FoldContent, FoldLayout, LayoutPass, ScrollSnapController, Snap, SnapConfig,
    Thumbnail,
};

use crate::{Easing, ScrollAnchor, Tween, apply_anchor, capture_first_visible_anchor};

/// Default duration of a snap correction animation.
pub const SNAP_DURATION_MS: u64 = 200;

/// Where the surface's parent scroll container stands when the list settles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleContext {
    /// Top of the search box, in list scroll coordinates.
    pub search_box_top: i32,
    pub parent_scroll_y: i32,
    pub parent_height: i32,
}

/// Handle for one item exit animation, returned by [`FeedSurface::on_dismiss_started`] and
/// handed back to [`FeedSurface::on_dismiss_finished`].
///
/// A token only counts against the compensation ledger of the attachment it was issued in;
/// tokens from before a detach, or issued while detached, finish as no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DismissToken {
    epoch: u32,
    item_height: u32,
    counted: bool,
}

impl DismissToken {
    pub fn item_height(&self) -> u32 {
        self.item_height
    }
}

/// Result of [`FeedSurface::on_layout`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceLayout {
    pub fold: FoldLayout,
    pub pass: LayoutPass,
}

/// A framework-neutral surface that owns the feed model, the snap controller and the
/// above-the-fold negotiation, and drives snap corrections through a tween.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_layout` after every measure pass of the list
/// - `on_scroll` / `on_scroll_settled` when UI scroll events occur
/// - `tick(now_ms)` each frame while [`FeedSurface::is_animating`]
#[derive(Clone, Debug)]
pub struct FeedSurface {
    model: FeedModel,
    snap: ScrollSnapController,
    fold: AboveFold,
    tween: Option<Tween>,
    snap_duration_ms: u64,
    easing: Easing,
    attached: bool,
    /// Bumped on every detach; dismiss tokens from older epochs are stale.
    epoch: u32,
}

impl FeedSurface {
    pub fn new(snap_config: SnapConfig, fold_config: FoldConfig) -> Self {
        Self {
            model: FeedModel::new(),
            snap: ScrollSnapController::new(snap_config),
            fold: AboveFold::new(fold_config),
            tween: None,
            snap_duration_ms: SNAP_DURATION_MS,
            easing: Easing::DecelerateQuad,
            attached: true,
            epoch: 0,
        }
    }

    /// Builds a surface whose dimensions are derived from a display density.
    pub fn for_density(density: f32) -> Self {
        Self::new(
            SnapConfig::for_density(density),
            FoldConfig::for_density(density),
        )
    }

    pub fn with_snap_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.snap_duration_ms = duration_ms;
        self.easing = easing;
        self
    }

    pub fn model(&self) -> &FeedModel {
        &self.model
    }

    pub fn snap(&self) -> &ScrollSnapController {
        &self.snap
    }

    pub fn fold(&self) -> &AboveFold {
        &self.fold
    }

    pub fn fold_mut(&mut self) -> &mut AboveFold {
        &mut self.fold
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Replaces a category's entries. The adapter applies the returned change to its list.
    pub fn set_entries(
        &mut self,
        category: CategoryId,
        entries: Vec<ContentEntry>,
        status: CategoryStatus,
    ) -> FeedChange {
        let change = self.model.set_entries(category, entries, status);
        atrace!(category = category.0, ?change, "entries replaced");
        change
    }

    pub fn dismiss_entry(&mut self, category: CategoryId, id: &str) -> Option<FeedChange> {
        self.model.dismiss_entry(category, id)
    }

    pub fn attach_thumbnail(
        &mut self,
        category: CategoryId,
        id: &str,
        thumbnail: Thumbnail,
    ) -> Option<FeedChange> {
        self.model.attach_thumbnail(category, id, thumbnail)
    }

    /// Call this when an item's exit animation starts. Returns the token to finish it with and
    /// the new bottom spacing.
    ///
    /// While detached the animation is not counted and the spacing is left alone.
    pub fn on_dismiss_started(
        &mut self,
        item_height: u32,
        layout: &impl FeedLayout,
    ) -> (DismissToken, u32) {
        let counted = self.attached;
        let token = DismissToken {
            epoch: self.epoch,
            item_height,
            counted,
        };
        if !counted {
            atrace!(item_height, "dismiss started while detached");
            return (token, self.snap.bottom_spacing());
        }
        let spacing = self
            .snap
            .on_item_dismiss_started(item_height, &self.model, layout);
        (token, spacing)
    }

    /// Call this when an item's exit animation ends.
    pub fn on_dismiss_finished(&mut self, token: DismissToken) {
        if !token.counted || token.epoch != self.epoch {
            atrace!(
                item_height = token.item_height,
                epoch = token.epoch,
                current = self.epoch,
                "stale dismiss finished"
            );
            return;
        }
        self.snap.on_item_dismiss_finished(token.item_height);
    }

    /// Runs one layout pass: negotiates the above-the-fold region, then recomputes the
    /// peeking state, the first header's height and the bottom spacing, in that order.
    pub fn on_layout(
        &mut self,
        viewport_height: u32,
        fold_content: &mut impl FoldContent,
        layout: &impl FeedLayout,
    ) -> SurfaceLayout {
        let fold = self.fold.negotiate(viewport_height, fold_content);
        let pass = match self.snap.set_has_space_for_peeking_card(
            fold.has_space_for_peeking_card,
            &self.model,
            layout,
        ) {
            Some(pass) => pass,
            None => self.snap.refresh(&self.model, layout),
        };
        SurfaceLayout { fold, pass }
    }

    /// Call this when the UI reports a user-driven scroll. This cancels any active tween.
    pub fn on_scroll(&mut self) {
        self.cancel_animation();
    }

    /// Call this when scrolling comes to rest. When the offset lies inside a transition band,
    /// starts a tween out of it and returns the correction.
    pub fn on_scroll_settled(
        &mut self,
        layout: &impl FeedLayout,
        ctx: SettleContext,
        now_ms: u64,
    ) -> Snap {
        if !self.attached || self.is_animating() {
            return Snap::Unchanged;
        }
        let snap = self.snap.snap_scroll(
            &self.model,
            layout,
            ctx.search_box_top,
            ctx.parent_scroll_y,
            ctx.parent_height,
        );
        if let Snap::Corrected { target } = snap {
            self.start_tween(layout.scroll_offset(), target, now_ms);
        }
        snap
    }

    /// Advances the active tween, returning the offset the adapter should scroll to.
    pub fn tick(&mut self, now_ms: u64) -> Option<i32> {
        let tween = self.tween?;
        let offset = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        Some(offset)
    }

    /// Starts a tween that brings the first card to the top of the viewport.
    ///
    /// Returns the target offset, or `None` before the first layout pass.
    pub fn scroll_to_first_card(
        &mut self,
        layout: &impl FeedLayout,
        fold_padding_top: u32,
        now_ms: u64,
    ) -> Option<i32> {
        let fold = self.fold.last_layout()?;
        let target = self
            .snap
            .scroll_to_first_card_target(fold.height, fold_padding_top)
            .max(0);
        self.start_tween(layout.scroll_offset(), target, now_ms);
        Some(target)
    }

    pub fn capture_anchor(&self, layout: &impl FeedLayout) -> Option<ScrollAnchor> {
        capture_first_visible_anchor(&self.model, layout)
    }

    /// Resolves an anchor against the current model. This cancels any active tween.
    pub fn restore_anchor(&mut self, layout: &impl FeedLayout, anchor: &ScrollAnchor) -> Option<i32> {
        self.cancel_animation();
        apply_anchor(&self.model, layout, anchor)
    }

    /// Detaches from the view: drops the compensation ledger and any running animation.
    /// Dismissals started before this point finish as no-ops, even after a re-attach.
    pub fn detach(&mut self) {
        self.cancel_animation();
        self.snap.detach();
        self.attached = false;
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    fn start_tween(&mut self, from: i32, to: i32, now_ms: u64) {
        if from == to {
            return;
        }
        match self.tween.as_mut() {
            Some(tween) => tween.retarget(now_ms, to, self.snap_duration_ms),
            None => {
                self.tween = Some(Tween::new(from, to, now_ms, self.snap_duration_ms, self.easing));
            }
        }
    }
}

impl Default for FeedSurface {
    fn default() -> Self {
        Self::new(SnapConfig::default(), FoldConfig::default())
    }
}
