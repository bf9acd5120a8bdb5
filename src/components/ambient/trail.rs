//! Cursor follower with a staggered trail.
//!
//! Each follower tweens from wherever it currently is to the latest pointer
//! position. A new pointer position restarts the tween from the follower's
//! current spot, so fast movement leaves the slower trail dots behind.

use glam::DVec2;

use crate::components::scroll::ease;

/// One eased move toward a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
	from: DVec2,
	to: DVec2,
	elapsed: f64,
	duration: f64,
}

impl Tween {
	pub fn at_rest(pos: DVec2, duration: f64) -> Self {
		Self {
			from: pos,
			to: pos,
			elapsed: duration,
			duration,
		}
	}

	/// Current eased position.
	pub fn position(&self) -> DVec2 {
		if self.duration <= 0.0 {
			return self.to;
		}
		let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
		self.from.lerp(self.to, ease::power2_out(t))
	}

	pub fn retarget(&mut self, to: DVec2) {
		self.from = self.position();
		self.to = to;
		self.elapsed = 0.0;
	}

	pub fn advance(&mut self, dt: f64) {
		self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration.max(0.0));
	}

	pub fn is_settled(&self) -> bool {
		self.elapsed >= self.duration
	}
}

#[derive(Clone, Debug)]
pub struct TrailParams {
	pub trail_len: usize,
	/// Seconds for the main cursor to catch up.
	pub cursor_duration: f64,
	/// Seconds for the first trail dot; each later dot adds `trail_step`.
	pub trail_duration: f64,
	pub trail_step: f64,
}

impl Default for TrailParams {
	fn default() -> Self {
		Self {
			trail_len: 5,
			cursor_duration: 0.08,
			trail_duration: 0.15,
			trail_step: 0.03,
		}
	}
}

/// Main cursor plus trailing dots.
#[derive(Clone, Debug)]
pub struct CursorTrail {
	pub cursor: Tween,
	pub trail: Vec<Tween>,
}

impl CursorTrail {
	pub fn new(params: &TrailParams) -> Self {
		Self {
			cursor: Tween::at_rest(DVec2::ZERO, params.cursor_duration),
			trail: (0..params.trail_len)
				.map(|i| {
					Tween::at_rest(
						DVec2::ZERO,
						params.trail_duration + i as f64 * params.trail_step,
					)
				})
				.collect(),
		}
	}

	pub fn point_to(&mut self, pointer: DVec2) {
		self.cursor.retarget(pointer);
		for dot in &mut self.trail {
			dot.retarget(pointer);
		}
	}

	pub fn advance(&mut self, dt: f64) {
		self.cursor.advance(dt);
		for dot in &mut self.trail {
			dot.advance(dt);
		}
	}

	pub fn is_settled(&self) -> bool {
		self.cursor.is_settled() && self.trail.iter().all(Tween::is_settled)
	}
}
