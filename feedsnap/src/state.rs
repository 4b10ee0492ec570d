/// A lightweight, serializable snapshot of the scroll-snap controller.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapState {
    /// Total height of items currently animating out.
    pub compensation_height: u32,
    pub dismissals_in_flight: u32,
    /// Last computed trailing spacer height.
    pub bottom_spacing: u32,
    pub has_space_for_peeking_card: bool,
    pub can_peek: bool,
    /// Last computed first-header transition height.
    pub header_height: u32,
}

/// The three coupled values produced by one layout refresh, in evaluation order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPass {
    pub can_peek: bool,
    pub header_height: u32,
    pub bottom_spacing: u32,
}
