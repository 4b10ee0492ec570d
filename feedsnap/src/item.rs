use alloc::string::String;
use alloc::sync::Arc;

use crate::{CategoryId, ItemId, ItemKind, StatusCard};

/// A decoded thumbnail attached to a content entry.
///
/// Pixel data is shared, so carrying a thumbnail over to a refreshed entry is a pointer copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pixels: Arc<[u8]>,
}

impl Thumbnail {
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether both thumbnails share the same pixel buffer.
    pub fn ptr_eq(&self, other: &Thumbnail) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// One piece of content delivered by the content source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentEntry {
    /// Unique within its category.
    pub id: String,
    pub title: String,
    pub source: String,
    pub preview_text: String,
    pub url: String,
    pub amp_url: String,
    /// Publish time, milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub relevance_score: f32,
    /// Position of the entry in the batch it was delivered in.
    pub position_hint: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub thumbnail: Option<Thumbnail>,
}

impl ContentEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source: String::new(),
            preview_text: String::new(),
            url: url.into(),
            amp_url: String::new(),
            timestamp: 0,
            relevance_score: 0.0,
            position_hint: 0,
            thumbnail: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_preview_text(mut self, preview_text: impl Into<String>) -> Self {
        self.preview_text = preview_text.into();
        self
    }

    pub fn with_amp_url(mut self, amp_url: impl Into<String>) -> Self {
        self.amp_url = amp_url.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_relevance_score(mut self, relevance_score: f32) -> Self {
        self.relevance_score = relevance_score;
        self
    }

    pub fn with_position_hint(mut self, position_hint: usize) -> Self {
        self.position_hint = position_hint;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: Option<Thumbnail>) -> Self {
        self.thumbnail = thumbnail;
        self
    }
}

/// An entry in the flattened presentation list.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedItem {
    /// The fixed region at the top of the feed (logo, search box, tiles).
    AboveFold,
    Header {
        category: CategoryId,
        visible: bool,
    },
    Content {
        category: CategoryId,
        entry: ContentEntry,
    },
    Status {
        category: CategoryId,
        card: StatusCard,
    },
    Progress {
        category: CategoryId,
        visible: bool,
    },
    /// Trailing blank space, sized by the scroll-snap controller.
    Spacer,
}

impl FeedItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::AboveFold => ItemKind::AboveFold,
            Self::Header { .. } => ItemKind::Header,
            Self::Content { .. } => ItemKind::Content,
            Self::Status { .. } => ItemKind::Status,
            Self::Progress { .. } => ItemKind::Progress,
            Self::Spacer => ItemKind::Spacer,
        }
    }

    pub fn stable_id(&self) -> ItemId {
        match self {
            Self::AboveFold => ItemId::AboveFold,
            Self::Header { category, .. } => ItemId::Header(*category),
            Self::Content { category, entry } => ItemId::Content(*category, entry.id.clone()),
            Self::Status { category, .. } => ItemId::Status(*category),
            Self::Progress { category, .. } => ItemId::Progress(*category),
            Self::Spacer => ItemId::BottomSpacer,
        }
    }

    /// Whether the item has a stable id equal to `id`, without allocating.
    pub fn has_id(&self, id: &ItemId) -> bool {
        match (self, id) {
            (Self::AboveFold, ItemId::AboveFold) | (Self::Spacer, ItemId::BottomSpacer) => true,
            (Self::Header { category, .. }, ItemId::Header(c))
            | (Self::Status { category, .. }, ItemId::Status(c))
            | (Self::Progress { category, .. }, ItemId::Progress(c)) => category == c,
            (Self::Content { category, entry }, ItemId::Content(c, entry_id)) => {
                category == c && entry.id == *entry_id
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Self::AboveFold | Self::Content { .. } | Self::Spacer => true,
            Self::Header { visible, .. } | Self::Progress { visible, .. } => *visible,
            Self::Status { card, .. } => card.is_visible(),
        }
    }

    pub fn category(&self) -> Option<CategoryId> {
        match self {
            Self::Header { category, .. }
            | Self::Content { category, .. }
            | Self::Status { category, .. }
            | Self::Progress { category, .. } => Some(*category),
            Self::AboveFold | Self::Spacer => None,
        }
    }

    pub fn entry(&self) -> Option<&ContentEntry> {
        match self {
            Self::Content { entry, .. } => Some(entry),
            _ => None,
        }
    }
}
