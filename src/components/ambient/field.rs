//! Shared 2D math for the simulations: wrapping, damping, cursor attraction,
//! and distance-based fades.

use glam::DVec2;

/// Viewport rectangle extended by a margin on every side.
///
/// Entities leaving the margin box re-enter from the opposite edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
	pub margin: f64,
}

impl Bounds {
	pub fn new(width: f64, height: f64, margin: f64) -> Self {
		Self {
			width,
			height,
			margin,
		}
	}

	/// Teleports a position that crossed the margin box to the opposite edge.
	pub fn wrap(&self, pos: DVec2) -> DVec2 {
		let m = self.margin;
		let mut out = pos;
		if out.x < -m {
			out.x = self.width + m;
		}
		if out.x > self.width + m {
			out.x = -m;
		}
		if out.y < -m {
			out.y = self.height + m;
		}
		if out.y > self.height + m {
			out.y = -m;
		}
		out
	}

	pub fn contains(&self, pos: DVec2) -> bool {
		let m = self.margin;
		pos.x >= -m && pos.x <= self.width + m && pos.y >= -m && pos.y <= self.height + m
	}
}

/// Multiplicative velocity damping. `factor` is expected in `[0, 1]`.
#[inline]
pub fn damp(velocity: DVec2, factor: f64) -> DVec2 {
	velocity * factor.clamp(0.0, 1.0)
}

/// Velocity impulse pulling `from` toward `to`.
///
/// Scales linearly from `strength` right at the target down to zero at
/// `radius`. Outside the radius, or exactly on the target, there is no pull.
pub fn attraction(from: DVec2, to: DVec2, radius: f64, strength: f64) -> DVec2 {
	let delta = to - from;
	let dist_sq = delta.length_squared();
	if dist_sq >= radius * radius || dist_sq == 0.0 {
		return DVec2::ZERO;
	}
	let dist = dist_sq.sqrt();
	let force = (radius - dist) / radius;
	delta / dist * force * strength
}

/// Linear fade: `peak` at distance zero, zero at `range` and beyond.
#[inline]
pub fn proximity_alpha(dist: f64, range: f64, peak: f64) -> f64 {
	if range <= 0.0 {
		return 0.0;
	}
	(1.0 - dist / range).max(0.0) * peak
}
