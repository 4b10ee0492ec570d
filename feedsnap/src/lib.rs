//! A headless feed composition and scroll-snap engine.
//!
//! For adapter-level utilities (tween-driven snapping, anchors, the storage probe), see the
//! `feedsnap-adapter` crate.
//!
//! This crate decides which items a home-page feed shows, in what order, how much trailing
//! space it reserves, and where scrolling may come to rest:
//! - [`FeedModel`] flattens [`Section`]s into one item list with O(1) position queries
//! - [`ScrollSnapController`] sizes the trailing spacer and snaps out of transition zones
//! - [`AboveFold`] negotiates the above-the-fold region against the viewport, using
//!   [`distribute`] for its weighted spacers
//!
//! It is UI-agnostic. A presentation layer is expected to provide:
//! - viewport height and scroll offset
//! - bounds of attached items ([`FeedLayout`])
//! - measurement of the above-the-fold region ([`FoldContent`])
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod distribute;
mod fold;
mod item;
mod key;
mod model;
mod options;
mod section;
mod snap;
mod state;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use distribute::{SpacerHeights, distribute};
pub use fold::{AboveFold, FoldContent, FoldLayout, MeasureRequest};
pub use item::{ContentEntry, FeedItem, Thumbnail};
pub use model::{FeedChange, FeedModel, Positions};
pub use options::{FoldConfig, SnapConfig};
pub use section::Section;
pub use snap::{FeedLayout, ScrollSnapController, scroll_out_of_region, scroll_out_of_region_mid};
pub use state::{LayoutPass, SnapState};
pub use status::{CategoryStatus, StatusCard};
pub use types::{CategoryId, ItemBounds, ItemId, ItemKind, Snap, SnapZone};
