//! Per-engine frame gating.
//!
//! Every display refresh hands each engine a callback. The gate decides
//! whether that callback turns into a tick: hidden tabs never tick, and the
//! throttle caps how often a visible tab does.

/// How often a visible engine is allowed to do work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Throttle {
	/// Work on every display refresh.
	EveryFrame,
	/// Work on every n-th raw callback (n of 0 or 1 means every frame).
	EveryNth(u32),
	/// Work once at least `1000 / fps` ms of wall time has passed.
	TargetFps(f64),
}

/// Throttle and visibility gate owned by one engine.
#[derive(Clone, Debug)]
pub struct FrameGate {
	throttle: Throttle,
	callbacks: u64,
	last_time: f64,
}

impl FrameGate {
	pub fn new(throttle: Throttle) -> Self {
		Self {
			throttle,
			callbacks: 0,
			last_time: 0.0,
		}
	}

	pub fn throttle(&self) -> Throttle {
		self.throttle
	}

	/// Decides whether the callback at `now_ms` should run a tick.
	///
	/// A hidden document is rejected before any pacing state moves, so the
	/// first visible frame after returning is judged on its own.
	pub fn admit(&mut self, now_ms: f64, hidden: bool) -> bool {
		if hidden {
			return false;
		}
		match self.throttle {
			Throttle::EveryFrame => true,
			Throttle::EveryNth(n) => {
				self.callbacks += 1;
				n <= 1 || self.callbacks % n as u64 == 0
			}
			Throttle::TargetFps(fps) => {
				if fps <= 0.0 {
					return true;
				}
				let interval = 1000.0 / fps;
				let delta = now_ms - self.last_time;
				if delta < interval {
					return false;
				}
				// Carry the remainder so pacing does not drift against refresh.
				self.last_time = now_ms - delta % interval;
				true
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_nth_admits_only_multiples() {
		let mut gate = FrameGate::new(Throttle::EveryNth(3));
		let admitted: Vec<bool> = (0..6).map(|i| gate.admit(i as f64 * 16.7, false)).collect();
		assert_eq!(admitted, vec![false, false, true, false, false, true]);
	}

	#[test]
	fn hidden_document_never_ticks_and_keeps_count() {
		let mut gate = FrameGate::new(Throttle::EveryNth(2));
		assert!(!gate.admit(0.0, true));
		assert!(!gate.admit(16.0, true));
		assert!(!gate.admit(32.0, false));
		assert!(gate.admit(48.0, false));
	}

	#[test]
	fn target_fps_paces_by_wall_time() {
		let mut gate = FrameGate::new(Throttle::TargetFps(50.0));
		// 100 Hz refresh against a 20 ms interval admits every other frame.
		let admitted = (1..=12).filter(|i| gate.admit(*i as f64 * 10.0, false)).count();
		assert_eq!(admitted, 6);
	}

	#[test]
	fn every_frame_admits_visible_frames() {
		let mut gate = FrameGate::new(Throttle::EveryFrame);
		assert!(gate.admit(0.0, false));
		assert!(gate.admit(0.0, false));
		assert!(!gate.admit(0.0, true));
	}
}
