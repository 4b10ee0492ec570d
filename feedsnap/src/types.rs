use alloc::string::String;

/// Identifies a content category (one [`crate::Section`] per category).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryId(pub u32);

/// Discriminant of a [`crate::FeedItem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    AboveFold,
    Header,
    Content,
    Status,
    Progress,
    Spacer,
}

/// Stable identity of a feed item.
///
/// The same logical item keeps the same id across refreshes, so a presentation layer can match
/// old and new occurrences when diffing or animating.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemId {
    AboveFold,
    Header(CategoryId),
    Content(CategoryId, String),
    Status(CategoryId),
    Progress(CategoryId),
    BottomSpacer,
}

impl ItemId {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::AboveFold => ItemKind::AboveFold,
            Self::Header(_) => ItemKind::Header,
            Self::Content(..) => ItemKind::Content,
            Self::Status(_) => ItemKind::Status,
            Self::Progress(_) => ItemKind::Progress,
            Self::BottomSpacer => ItemKind::Spacer,
        }
    }

    pub fn category(&self) -> Option<CategoryId> {
        match self {
            Self::Header(c) | Self::Content(c, _) | Self::Status(c) | Self::Progress(c) => Some(*c),
            Self::AboveFold | Self::BottomSpacer => None,
        }
    }
}

/// Vertical bounds of an attached item, in the list's coordinate space (relative to the top
/// edge of the scrolling viewport, so `top` can be negative for items scrolled past).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemBounds {
    pub top: i32,
    pub bottom: i32,
}

impl ItemBounds {
    pub fn new(top: i32, height: u32) -> Self {
        Self {
            top,
            bottom: top.saturating_add(height as i32),
        }
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top).max(0) as u32
    }
}

/// Outcome of a snap-zone evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Snap {
    /// The offset is outside the forbidden zone.
    Unchanged,
    /// The offset rests inside a forbidden zone; the view should smooth-scroll to `target`.
    Corrected { target: i32 },
}

impl Snap {
    pub fn is_corrected(&self) -> bool {
        matches!(self, Self::Corrected { .. })
    }

    pub fn target(&self) -> Option<i32> {
        match self {
            Self::Unchanged => None,
            Self::Corrected { target } => Some(*target),
        }
    }

    /// The scroll delta needed to reach the target from `offset` (zero when unchanged).
    pub fn delta_from(&self, offset: i32) -> i32 {
        match self {
            Self::Unchanged => 0,
            Self::Corrected { target } => target.saturating_sub(offset),
        }
    }
}

/// A closed scroll-offset interval `[start, end]` the view must not rest inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapZone {
    pub start: i32,
    pub flip: i32,
    pub end: i32,
}

impl SnapZone {
    pub fn new(start: i32, flip: i32, end: i32) -> Self {
        Self { start, flip, end }
    }

    /// A zone that flips at its midpoint.
    pub fn with_midpoint(start: i32, end: i32) -> Self {
        Self {
            start,
            flip: start + (end - start) / 2,
            end,
        }
    }

    pub fn contains(&self, offset: i32) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Whether two zones share more than a boundary offset.
    pub fn overlaps(&self, other: &SnapZone) -> bool {
        self.start < other.end && other.start < self.end
    }
}
