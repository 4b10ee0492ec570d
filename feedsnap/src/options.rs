use crate::SpacerHeights;
use crate::distribute::dp_to_px as dp;

/// Configuration for [`crate::ScrollSnapController`]. All lengths are in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapConfig {
    /// Lower bound of the trailing spacer height.
    pub min_bottom_spacing: u32,
    /// Height of the fixed band (toolbar and its progress bar) covering the top of the viewport.
    pub header_band_height: u32,
    /// Scroll distance over which the search box morphs into the toolbar.
    pub search_box_transition_length: u32,
    /// How much of the first card (plus padding) peeks above the bottom edge when at rest.
    pub peeking_card_height: u32,
    /// Fully expanded height of the first section header.
    pub max_header_height: u32,
}

impl SnapConfig {
    pub const TOOLBAR_HEIGHT_DP: f32 = 56.0;
    pub const TOOLBAR_PROGRESS_BAR_HEIGHT_DP: f32 = 2.0;
    pub const MIN_BOTTOM_SPACING_DP: f32 = 8.0;
    pub const SEARCH_BOX_TRANSITION_LENGTH_DP: f32 = 40.0;
    pub const PEEKING_CARD_HEIGHT_DP: f32 = 32.0;
    pub const MAX_HEADER_HEIGHT_DP: f32 = 40.0;

    pub fn new(
        min_bottom_spacing: u32,
        header_band_height: u32,
        search_box_transition_length: u32,
        peeking_card_height: u32,
    ) -> Self {
        Self {
            min_bottom_spacing,
            header_band_height,
            search_box_transition_length,
            peeking_card_height,
            max_header_height: 0,
        }
    }

    /// Default dimensions converted to pixels for a display `density`.
    pub fn for_density(density: f32) -> Self {
        Self {
            min_bottom_spacing: dp(Self::MIN_BOTTOM_SPACING_DP, density),
            header_band_height: dp(Self::TOOLBAR_HEIGHT_DP, density)
                + dp(Self::TOOLBAR_PROGRESS_BAR_HEIGHT_DP, density),
            search_box_transition_length: dp(Self::SEARCH_BOX_TRANSITION_LENGTH_DP, density),
            peeking_card_height: dp(Self::PEEKING_CARD_HEIGHT_DP, density),
            max_header_height: dp(Self::MAX_HEADER_HEIGHT_DP, density),
        }
    }

    pub fn with_min_bottom_spacing(mut self, min_bottom_spacing: u32) -> Self {
        self.min_bottom_spacing = min_bottom_spacing;
        self
    }

    pub fn with_header_band_height(mut self, header_band_height: u32) -> Self {
        self.header_band_height = header_band_height;
        self
    }

    pub fn with_search_box_transition_length(mut self, length: u32) -> Self {
        self.search_box_transition_length = length;
        self
    }

    pub fn with_peeking_card_height(mut self, peeking_card_height: u32) -> Self {
        self.peeking_card_height = peeking_card_height;
        self
    }

    pub fn with_max_header_height(mut self, max_header_height: u32) -> Self {
        self.max_header_height = max_header_height;
        self
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}

/// Configuration for [`crate::AboveFold`]. All lengths are in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldConfig {
    /// Ideal heights of the weighted spacer regions.
    pub ideals: SpacerHeights,
    /// Sum of the ideal heights.
    pub total_ideal: u32,
    pub peeking_card_height: u32,
    /// Height of the tab strip drawn above the viewport on large screens (0 when absent).
    pub tab_strip_height: u32,
    /// Cards mode: the region leaves room for a peeking card instead of filling the viewport,
    /// and never adds scroll compensation space.
    pub cards_mode: bool,
}

impl FoldConfig {
    pub const TAB_STRIP_HEIGHT_DP: f32 = 40.0;

    pub fn new(ideals: SpacerHeights) -> Self {
        Self {
            ideals,
            total_ideal: ideals.sum(),
            peeking_card_height: 0,
            tab_strip_height: 0,
            cards_mode: false,
        }
    }

    /// Default dimensions converted to pixels for a display `density` (no tab strip).
    pub fn for_density(density: f32) -> Self {
        Self::new(SpacerHeights::ideal_for_density(density))
            .with_peeking_card_height(dp(SnapConfig::PEEKING_CARD_HEIGHT_DP, density))
    }

    pub fn with_ideals(mut self, ideals: SpacerHeights) -> Self {
        self.ideals = ideals;
        self.total_ideal = ideals.sum();
        self
    }

    pub fn with_peeking_card_height(mut self, peeking_card_height: u32) -> Self {
        self.peeking_card_height = peeking_card_height;
        self
    }

    pub fn with_tab_strip_height(mut self, tab_strip_height: u32) -> Self {
        self.tab_strip_height = tab_strip_height;
        self
    }

    pub fn with_cards_mode(mut self, cards_mode: bool) -> Self {
        self.cards_mode = cards_mode;
        self
    }
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}
