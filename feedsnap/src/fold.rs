use crate::{FoldConfig, SpacerHeights, distribute};

/// A measurement request issued to the above-the-fold content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureRequest {
    /// Measure at natural height with the weighted spacers collapsed and a scroll compensation
    /// spacer of the given height appended (0 = absent).
    Natural { scroll_compensation: u32 },
    /// Measure at exactly this height; the weighted spacers absorb the difference.
    Exactly(u32),
}

/// The measurement seam of the above-the-fold region, implemented by the rendering layer.
pub trait FoldContent {
    /// Measures the region and returns its height.
    fn measure(&mut self, request: MeasureRequest) -> u32;

    /// Distance from the top of the region to the row that must be able to reach the top edge
    /// of the viewport when scrolled (the tile grid).
    fn anchor_top(&self) -> u32;
}

/// Result of one space negotiation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldLayout {
    pub height: u32,
    pub has_space_for_peeking_card: bool,
    pub spacers: SpacerHeights,
    pub scroll_compensation: u32,
    /// Number of `measure` calls issued (1 or 2).
    pub passes: u8,
}

/// Negotiates the height of the above-the-fold region against the viewport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AboveFold {
    config: FoldConfig,
    last: Option<FoldLayout>,
}

impl AboveFold {
    pub fn new(config: FoldConfig) -> Self {
        Self { config, last: None }
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn set_cards_mode(&mut self, cards_mode: bool) {
        self.config.cards_mode = cards_mode;
    }

    pub fn set_tab_strip_height(&mut self, tab_strip_height: u32) {
        self.config.tab_strip_height = tab_strip_height;
    }

    pub fn last_layout(&self) -> Option<FoldLayout> {
        self.last
    }

    /// `false` until the first negotiation.
    pub fn has_space_for_peeking_card(&self) -> bool {
        self.last.is_some_and(|l| l.has_space_for_peeking_card)
    }

    /// Measures the region for a viewport of `viewport_height` pixels.
    ///
    /// Issues at most two measurements: the natural one, then either a re-measure with a scroll
    /// compensation spacer (overflowing region, outside cards mode) or an exact measure at the
    /// target height (cards mode, region fits).
    pub fn negotiate(&mut self, viewport_height: u32, content: &mut impl FoldContent) -> FoldLayout {
        let natural = content.measure(MeasureRequest::Natural {
            scroll_compensation: 0,
        });
        let mut layout = FoldLayout {
            height: natural,
            passes: 1,
            ..FoldLayout::default()
        };

        if natural > viewport_height {
            layout.has_space_for_peeking_card = false;
            if !self.config.cards_mode {
                // Let the user scroll until the anchor row reaches the top edge.
                let anchor_top = content.anchor_top();
                let below_the_fold = natural - viewport_height;
                if below_the_fold < anchor_top {
                    let compensation = anchor_top - below_the_fold;
                    layout.scroll_compensation = compensation;
                    layout.height = content.measure(MeasureRequest::Natural {
                        scroll_compensation: compensation,
                    });
                    layout.passes = 2;
                }
            }
        } else {
            layout.has_space_for_peeking_card = true;
            let extra = if self.config.cards_mode {
                let target = natural.max(
                    viewport_height
                        .saturating_sub(self.config.peeking_card_height)
                        .saturating_sub(self.config.tab_strip_height),
                );
                layout.height = content.measure(MeasureRequest::Exactly(target));
                layout.passes = 2;
                layout.height.saturating_sub(natural)
            } else {
                layout.height = viewport_height;
                viewport_height - natural
            };
            layout.spacers = distribute(extra, self.config.ideals, self.config.total_ideal);
        }

        ftrace!(
            viewport_height,
            natural,
            height = layout.height,
            peeking = layout.has_space_for_peeking_card,
            passes = layout.passes,
            "AboveFold::negotiate"
        );
        self.last = Some(layout);
        layout
    }
}
