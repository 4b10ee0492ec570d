use core::fmt;

use feedsnap::{FeedLayout, FeedModel, ItemId};

/// A scroll anchor that preserves visual position across feed changes.
///
/// Typical use cases:
/// - a section above the viewport gains or loses entries
/// - a content refresh replaces entries while the user is reading further down
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K = ItemId> {
    pub key: K,
    /// The distance from the anchor item's top edge to the viewport's top edge.
    pub offset_in_viewport: i32,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Captures an anchor for the first visible item (by stable id).
///
/// Returns `None` if nothing is visible or the first visible item is not attached.
pub fn capture_first_visible_anchor(
    model: &FeedModel,
    layout: &impl FeedLayout,
) -> Option<ScrollAnchor> {
    let position = layout.first_visible_position()?;
    let item = model.item(position)?;
    let bounds = layout.item_bounds(position)?;
    Some(ScrollAnchor {
        key: item.stable_id(),
        offset_in_viewport: -bounds.top,
    })
}

/// Resolves a previously captured anchor against the *current* model and layout.
///
/// Returns the scroll offset that puts the anchor item back where it was, or `None` when the
/// item is gone or not attached.
pub fn apply_anchor(
    model: &FeedModel,
    layout: &impl FeedLayout,
    anchor: &ScrollAnchor,
) -> Option<i32> {
    let position = model.position_of(&anchor.key)?;
    let bounds = layout.item_bounds(position)?;
    let target = layout.scroll_offset() + bounds.top + anchor.offset_in_viewport;
    Some(target.max(0))
}
