use alloc::vec::Vec;

use crate::key::IdMap;
use crate::{CategoryId, CategoryStatus, ContentEntry, FeedItem, StatusCard, Thumbnail};

/// The items of one content category: a header, its entries, and the status/progress
/// placeholders shown while the category has no entries.
///
/// Derived visibility:
/// - the header is visible iff the section holds entries
/// - the status placeholder and progress indicator are only emitted while it holds none
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    category: CategoryId,
    entries: Vec<ContentEntry>,
    status: CategoryStatus,
}

impl Section {
    pub fn new(category: CategoryId, entries: Vec<ContentEntry>, status: CategoryStatus) -> Self {
        let mut section = Self {
            category,
            entries: Vec::new(),
            status,
        };
        section.set_entries(entries, status);
        section
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn status(&self) -> CategoryStatus {
        self.status
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn is_header_visible(&self) -> bool {
        self.has_entries()
    }

    pub fn status_card(&self) -> StatusCard {
        StatusCard::for_status(self.status, self.has_entries())
    }

    pub fn is_progress_visible(&self) -> bool {
        self.status.is_loading()
    }

    /// Replaces the entries of this section.
    ///
    /// Incoming entries without a thumbnail inherit the one held by the current entry with the
    /// same id, so a refresh never drops an already decoded image.
    pub fn set_entries(&mut self, mut entries: Vec<ContentEntry>, status: CategoryStatus) {
        self.carry_over_thumbnails(&mut entries);
        self.entries = entries;
        self.status = status;
        fdebug!(
            category = self.category.0,
            entries = self.entries.len(),
            status = ?status,
            "Section::set_entries"
        );
    }

    fn carry_over_thumbnails(&self, incoming: &mut [ContentEntry]) {
        let cached: IdMap<&str, &Thumbnail> = self
            .entries
            .iter()
            .filter_map(|e| e.thumbnail.as_ref().map(|t| (e.id.as_str(), t)))
            .collect();
        if cached.is_empty() {
            return;
        }
        for entry in incoming.iter_mut().filter(|e| e.thumbnail.is_none()) {
            if let Some(thumbnail) = cached.get(entry.id.as_str()) {
                entry.thumbnail = Some((*thumbnail).clone());
            }
        }
    }

    /// Removes the entry with `id`.
    ///
    /// Returns the removed entry and its index among the entries, or `None` when it was
    /// already gone (e.g. a duplicate dismiss racing a refresh).
    pub fn dismiss_entry(&mut self, id: &str) -> Option<(usize, ContentEntry)> {
        let index = self.index_of(id)?;
        let entry = self.entries.remove(index);
        fdebug!(
            category = self.category.0,
            remaining = self.entries.len(),
            "Section::dismiss_entry"
        );
        Some((index, entry))
    }

    /// Attaches a lazily fetched thumbnail. Returns the entry index, or `None` if the entry is
    /// no longer held.
    pub fn attach_thumbnail(&mut self, id: &str, thumbnail: Thumbnail) -> Option<usize> {
        let index = self.index_of(id)?;
        self.entries[index].thumbnail = Some(thumbnail);
        Some(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Number of items [`Section::items`] produces.
    pub fn item_count(&self) -> usize {
        if self.has_entries() {
            1 + self.entries.len()
        } else {
            3
        }
    }

    /// The ordered items of this section: `[header, entries..]`, or
    /// `[header (hidden), status, progress]` when empty.
    pub fn items(&self) -> Vec<FeedItem> {
        let mut out = Vec::with_capacity(self.item_count());
        self.push_items(&mut out);
        out
    }

    pub(crate) fn push_items(&self, out: &mut Vec<FeedItem>) {
        let category = self.category;
        out.push(FeedItem::Header {
            category,
            visible: self.is_header_visible(),
        });
        if self.has_entries() {
            out.extend(self.entries.iter().map(|entry| FeedItem::Content {
                category,
                entry: entry.clone(),
            }));
        } else {
            out.push(FeedItem::Status {
                category,
                card: self.status_card(),
            });
            out.push(FeedItem::Progress {
                category,
                visible: self.is_progress_visible(),
            });
        }
    }
}
