use alloc::vec::Vec;

use crate::{
    CategoryId, CategoryStatus, ContentEntry, FeedItem, ItemId, ItemKind, Section, Thumbnail,
};

/// Structurally important positions of the flattened feed.
///
/// `None` means the item is not present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Positions {
    pub above_fold: Option<usize>,
    pub first_header: Option<usize>,
    pub first_content: Option<usize>,
    pub last_content: Option<usize>,
    pub bottom_spacer: Option<usize>,
}

impl Positions {
    fn scan(items: &[FeedItem]) -> Self {
        let mut p = Positions::default();
        let mut last_placeholder = None;
        for (i, item) in items.iter().enumerate() {
            match item.kind() {
                ItemKind::AboveFold => {
                    p.above_fold.get_or_insert(i);
                }
                ItemKind::Header => {
                    p.first_header.get_or_insert(i);
                }
                ItemKind::Content => {
                    p.first_content.get_or_insert(i);
                    p.last_content = Some(i);
                }
                ItemKind::Status | ItemKind::Progress => last_placeholder = Some(i),
                ItemKind::Spacer => p.bottom_spacer = Some(i),
            }
        }
        // An empty feed still shows its placeholders; they count as content for spacing.
        if p.last_content.is_none() {
            p.last_content = last_placeholder;
        }
        p
    }
}

/// A contiguous replacement in the flattened item list.
///
/// `removed` items starting at `start` were replaced by `inserted` items. Presentation layers
/// can feed this straight into their range-change notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedChange {
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl FeedChange {
    pub fn is_empty(&self) -> bool {
        self.removed == 0 && self.inserted == 0
    }
}

/// The whole feed: a leading above-the-fold item, every section's items in section order, and
/// a trailing spacer.
///
/// Item order is deterministic. Positions are recomputed synchronously after every mutation, so
/// the position queries are O(1) and never stale.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedModel {
    sections: Vec<Section>,
    items: Vec<FeedItem>,
    positions: Positions,
}

impl Default for FeedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedModel {
    pub fn new() -> Self {
        let mut model = Self {
            sections: Vec::new(),
            items: Vec::new(),
            positions: Positions::default(),
        };
        model.rebuild();
        model
    }

    /// The flattened items. Clone the slice (`to_vec`) for an owned snapshot.
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn item(&self, position: usize) -> Option<&FeedItem> {
        self.items.get(position)
    }

    /// Number of flattened items, including the above-the-fold item and the spacer.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// False until the first section is populated.
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, category: CategoryId) -> Option<&Section> {
        self.sections.iter().find(|s| s.category() == category)
    }

    pub fn has_content(&self) -> bool {
        self.sections.iter().any(Section::has_entries)
    }

    pub fn positions(&self) -> Positions {
        self.positions
    }

    pub fn above_fold_position(&self) -> Option<usize> {
        self.positions.above_fold
    }

    pub fn first_header_position(&self) -> Option<usize> {
        self.positions.first_header
    }

    pub fn first_content_position(&self) -> Option<usize> {
        self.positions.first_content
    }

    pub fn last_content_position(&self) -> Option<usize> {
        self.positions.last_content
    }

    pub fn bottom_spacer_position(&self) -> Option<usize> {
        self.positions.bottom_spacer
    }

    pub fn position_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.has_id(id))
    }

    /// Replaces the entries of `category`, creating its section on first population.
    pub fn set_entries(
        &mut self,
        category: CategoryId,
        entries: Vec<ContentEntry>,
        status: CategoryStatus,
    ) -> FeedChange {
        let change = match self.section_index(category) {
            Some(index) => {
                let start = self.section_start(index);
                let section = &mut self.sections[index];
                let removed = section.item_count();
                section.set_entries(entries, status);
                FeedChange {
                    start,
                    removed,
                    inserted: section.item_count(),
                }
            }
            None => {
                let start = self.section_start(self.sections.len());
                let section = Section::new(category, entries, status);
                let inserted = section.item_count();
                self.sections.push(section);
                FeedChange {
                    start,
                    removed: 0,
                    inserted,
                }
            }
        };
        self.rebuild();
        change
    }

    /// Dismisses one entry. Returns `None` (and changes nothing) when the entry is not present.
    pub fn dismiss_entry(&mut self, category: CategoryId, id: &str) -> Option<FeedChange> {
        let index = self.section_index(category)?;
        let start = self.section_start(index);
        let section = &mut self.sections[index];
        let removed_count = section.item_count();
        let (entry_index, _) = section.dismiss_entry(id)?;

        let change = if section.has_entries() {
            FeedChange {
                start: start + 1 + entry_index,
                removed: 1,
                inserted: 0,
            }
        } else {
            // The section collapsed to its placeholders.
            FeedChange {
                start,
                removed: removed_count,
                inserted: section.item_count(),
            }
        };
        self.rebuild();
        Some(change)
    }

    /// Attaches a thumbnail to an entry, replacing its item in place. Returns `None` if the
    /// entry is gone.
    pub fn attach_thumbnail(
        &mut self,
        category: CategoryId,
        id: &str,
        thumbnail: Thumbnail,
    ) -> Option<FeedChange> {
        let index = self.section_index(category)?;
        let entry_index = self.sections[index].attach_thumbnail(id, thumbnail)?;
        let start = self.section_start(index) + 1 + entry_index;
        self.rebuild();
        Some(FeedChange {
            start,
            removed: 1,
            inserted: 1,
        })
    }

    fn section_index(&self, category: CategoryId) -> Option<usize> {
        self.sections.iter().position(|s| s.category() == category)
    }

    /// Position of the first item of section `index` (the above-the-fold item comes first).
    fn section_start(&self, index: usize) -> usize {
        1 + self.sections[..index]
            .iter()
            .map(Section::item_count)
            .sum::<usize>()
    }

    fn rebuild(&mut self) {
        let count = 2 + self.sections.iter().map(Section::item_count).sum::<usize>();
        self.items.clear();
        self.items.reserve(count);
        self.items.push(FeedItem::AboveFold);
        for section in &self.sections {
            section.push_items(&mut self.items);
        }
        self.items.push(FeedItem::Spacer);
        self.positions = Positions::scan(&self.items);
        ftrace!(
            items = self.items.len(),
            first_header = ?self.positions.first_header,
            last_content = ?self.positions.last_content,
            "FeedModel::rebuild"
        );
    }
}
