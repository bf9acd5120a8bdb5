//! Decorative background layers.
//!
//! Four independent engines share the pointer and the frame clock:
//! - a particle field with links and pointer attraction
//! - falling glyph streams
//! - slowly orbiting colour blobs
//! - an eased cursor follower with a trail
//!
//! The simulations are plain data plus pure step functions. Only
//! [`component`] and [`surface`] touch the browser.

mod component;
pub mod field;
pub mod orbits;
pub mod particles;
pub mod render;
pub mod scheduler;
pub mod streams;
pub mod surface;
pub mod theme;
pub mod trail;

pub use component::{AmbientBackdrop, CursorTrailLayer, OrbitBlobs, ParticleCanvas, StreamCanvas};
pub use particles::{ParticleField, ParticleVariant};
pub use theme::Theme;
