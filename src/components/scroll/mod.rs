//! Pinned-section scroll snapping.
//!
//! Once layout settles, pinned sections are collected into normalised
//! regions and a [`SnapQuery`] is handed to the page's smooth scroller. The
//! scroller asks for a target whenever the user stops scrolling.

pub mod bridge;
pub mod choreographer;
mod component;
pub mod ease;
pub mod regions;
pub mod snap;

pub use choreographer::{Phase, PinRegistry, ScrollChoreographer, SnapDriver};
pub use component::ScrollChoreography;
pub use regions::{PinDescriptor, PinnedRegion, derive_regions};
pub use snap::{DEFAULT_TOLERANCE, SnapQuery};
