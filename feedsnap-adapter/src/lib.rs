//! Adapter utilities for the `feedsnap` crate.
//!
//! The `feedsnap` crate is UI-agnostic and focuses on the feed model and the layout math. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - [`FeedSurface`]: one owner for the model, the snap controller and the above-the-fold
//!   negotiation, with tween-driven snap corrections
//! - Scroll anchoring by stable item id across feed changes
//! - A one-shot background storage probe (with `feature = "std"`)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
#[cfg(feature = "std")]
mod storage;
mod surface;
mod tween;


pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
#[cfg(feature = "std")]
pub use storage::{StorageProbe, StorageProbeError, StorageSummary, filesystem_total_bytes};
pub use surface::{DismissToken, FeedSurface, SNAP_DURATION_MS, SettleContext, SurfaceLayout};
pub use tween::{Easing, Tween};
