/// Heights of the three weighted spacer regions of the above-the-fold area: above the logo,
/// between the search box and the tiles, and below the tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpacerHeights {
    pub top: u32,
    pub middle: u32,
    pub bottom: u32,
}

impl SpacerHeights {
    pub const TOP_IDEAL_DP: f32 = 44.0;
    pub const MIDDLE_IDEAL_DP: f32 = 24.0;
    pub const BOTTOM_IDEAL_DP: f32 = 44.0;

    pub const fn new(top: u32, middle: u32, bottom: u32) -> Self {
        Self {
            top,
            middle,
            bottom,
        }
    }

    /// The default ideal heights converted to pixels for a display `density`.
    pub fn ideal_for_density(density: f32) -> Self {
        Self {
            top: dp_to_px(Self::TOP_IDEAL_DP, density),
            middle: dp_to_px(Self::MIDDLE_IDEAL_DP, density),
            bottom: dp_to_px(Self::BOTTOM_IDEAL_DP, density),
        }
    }

    pub fn sum(&self) -> u32 {
        self.top
            .saturating_add(self.middle)
            .saturating_add(self.bottom)
    }
}

/// Converts density-independent pixels to pixels, rounding half up.
pub(crate) fn dp_to_px(dp: f32, density: f32) -> u32 {
    let px = dp * density;
    if px <= 0.0 { 0 } else { (px + 0.5) as u32 }
}

/// `round(value * part / whole)` with ties rounded up.
fn scale_round(value: u32, part: u32, whole: u32) -> u32 {
    debug_assert!(whole > 0);
    let whole = whole as u64;
    ((2 * value as u64 * part as u64 + whole) / (2 * whole)) as u32
}

/// Allocates `extra` pixels of vertical space among the three spacer regions.
///
/// Below `total_ideal`, every region shrinks proportionally to its ideal height and the bottom
/// region takes the rounding remainder. At or above it, every region gets its ideal height and
/// the surplus goes to the top and bottom regions only; the middle region never grows past its
/// ideal.
///
/// `total_ideal` must equal `ideals.sum()`; a mismatch is a defect. Debug builds assert it and
/// release builds fall back to `ideals.sum()`, so the result always sums to exactly `extra`.
pub fn distribute(extra: u32, ideals: SpacerHeights, total_ideal: u32) -> SpacerHeights {
    debug_assert_eq!(
        total_ideal,
        ideals.sum(),
        "total ideal out of sync with spacer ideals"
    );
    let total_ideal = ideals.sum();

    if extra < total_ideal {
        let top = scale_round(extra, ideals.top, total_ideal).min(extra);
        let middle = scale_round(extra, ideals.middle, total_ideal).min(extra - top);
        return SpacerHeights {
            top,
            middle,
            bottom: extra - top - middle,
        };
    }

    let surplus = extra - total_ideal;
    let top = ideals.top + surplus / 2;
    let middle = ideals.middle;
    SpacerHeights {
        top,
        middle,
        bottom: extra.saturating_sub(top).saturating_sub(middle),
    }
}
