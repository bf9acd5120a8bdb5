//! Falling glyph streams.
//!
//! One particle per 100 px lane falls at its own speed, flickering between
//! glyphs, with a short trail of fainter glyphs above it. Particles that drop
//! off the bottom are recycled at the top of their lane.

use glam::DVec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::scheduler::Throttle;

/// Binary digits followed by the katakana gojūon row.
pub const GLYPHS: &str = "01アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";

#[derive(Clone, Debug)]
pub struct StreamParams {
	pub lane_width: f64,
	/// Random offset added to the lane's left edge.
	pub lane_jitter: f64,
	pub speed_range: (f64, f64),
	pub opacity_range: (f64, f64),
	/// Distance below the viewport a particle may fall before recycling.
	pub margin: f64,
	/// Where a recycled particle re-enters, above the viewport.
	pub respawn_y: f64,
	/// Per-tick chance that a particle swaps its glyph.
	pub swap_chance: f64,
	pub trail_len: usize,
	pub trail_spacing: f64,
	/// Alpha lost per trail step, as a fraction of the head opacity.
	pub trail_fade: f64,
	pub throttle: Throttle,
}

impl Default for StreamParams {
	fn default() -> Self {
		Self {
			lane_width: 100.0,
			lane_jitter: 50.0,
			speed_range: (2.0, 5.0),
			opacity_range: (0.1, 0.4),
			margin: 0.0,
			respawn_y: -20.0,
			swap_chance: 0.05,
			trail_len: 5,
			trail_spacing: 15.0,
			trail_fade: 0.15,
			throttle: Throttle::EveryNth(3),
		}
	}
}

impl StreamParams {
	pub fn count_for_width(&self, width: f64) -> usize {
		if width <= 0.0 || self.lane_width <= 0.0 {
			return 0;
		}
		(width / self.lane_width).floor() as usize
	}
}

/// A falling glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamParticle {
	pub x: f64,
	pub y: f64,
	pub speed: f64,
	pub glyph: char,
	pub opacity: f64,
}

/// One faded glyph drawn above a stream head.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailGlyph {
	pub glyph: char,
	pub pos: DVec2,
	pub alpha: f64,
}

fn pick<R: Rng>(glyphs: &[char], rng: &mut R) -> char {
	glyphs.choose(rng).copied().unwrap_or('0')
}

/// One particle per lane, scattered vertically.
pub fn spawn<R: Rng>(
	width: f64,
	height: f64,
	params: &StreamParams,
	glyphs: &[char],
	rng: &mut R,
) -> Vec<StreamParticle> {
	(0..params.count_for_width(width))
		.map(|i| StreamParticle {
			x: i as f64 * params.lane_width + rng.gen_range(0.0..=params.lane_jitter),
			y: rng.gen_range(0.0..=height.max(0.0)),
			speed: rng.gen_range(params.speed_range.0..=params.speed_range.1),
			glyph: pick(glyphs, rng),
			opacity: rng.gen_range(params.opacity_range.0..=params.opacity_range.1),
		})
		.collect()
}

/// Advances every stream particle by one tick.
///
/// A particle past `height + margin` re-enters at `respawn_y` in the same lane
/// with fresh jitter and glyph. Independently, any particle may swap glyph.
pub fn tick<R: Rng>(
	particles: &mut [StreamParticle],
	height: f64,
	params: &StreamParams,
	glyphs: &[char],
	rng: &mut R,
) {
	for p in particles.iter_mut() {
		p.y += p.speed;

		if p.y > height + params.margin {
			p.y = params.respawn_y;
			let lane = (p.x / params.lane_width).floor() * params.lane_width;
			p.x = lane + rng.gen_range(0.0..=params.lane_jitter);
			p.glyph = pick(glyphs, rng);
		}

		if rng.gen_bool(params.swap_chance.clamp(0.0, 1.0)) {
			p.glyph = pick(glyphs, rng);
		}
	}
}

/// Trail glyphs above `head` that are still on screen.
///
/// Each slot draws a fresh random glyph every call, so the trail reads as
/// noise rather than an echo of the head's history.
pub fn trail<R: Rng>(
	head: &StreamParticle,
	params: &StreamParams,
	glyphs: &[char],
	rng: &mut R,
) -> Vec<TrailGlyph> {
	(1..=params.trail_len)
		.filter_map(|i| {
			let y = head.y - i as f64 * params.trail_spacing;
			(y > 0.0).then(|| TrailGlyph {
				glyph: pick(glyphs, rng),
				pos: DVec2::new(head.x, y),
				alpha: (head.opacity * (1.0 - i as f64 * params.trail_fade)).max(0.0),
			})
		})
		.collect()
}

/// Owns the stream particles for one canvas. The array lives as long as the
/// canvas does; particles are recycled, never dropped.
pub struct StreamField {
	pub params: StreamParams,
	pub particles: Vec<StreamParticle>,
	pub glyphs: Vec<char>,
	pub width: f64,
	pub height: f64,
}

impl StreamField {
	pub fn new<R: Rng>(width: f64, height: f64, rng: &mut R) -> Self {
		let params = StreamParams::default();
		let glyphs: Vec<char> = GLYPHS.chars().collect();
		let particles = spawn(width, height, &params, &glyphs, rng);
		Self {
			params,
			particles,
			glyphs,
			width,
			height,
		}
	}

	/// Tracks the new viewport without respawning.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn step<R: Rng>(&mut self, rng: &mut R) {
		tick(&mut self.particles, self.height, &self.params, &self.glyphs, rng);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn glyph_set_is_digits_and_katakana() {
		let glyphs: Vec<char> = GLYPHS.chars().collect();
		assert_eq!(glyphs[0], '0');
		assert_eq!(glyphs[1], '1');
		assert_eq!(glyphs.len(), 48);
	}

	#[test]
	fn spawn_places_one_particle_per_lane() {
		let mut rng = StdRng::seed_from_u64(3);
		let params = StreamParams::default();
		let glyphs: Vec<char> = GLYPHS.chars().collect();
		let particles = spawn(1280.0, 720.0, &params, &glyphs, &mut rng);
		assert_eq!(particles.len(), 12);
		for (i, p) in particles.iter().enumerate() {
			let lane = i as f64 * 100.0;
			assert!(p.x >= lane && p.x <= lane + 50.0);
			assert!((2.0..=5.0).contains(&p.speed));
			assert!((0.1..=0.4).contains(&p.opacity));
		}
	}

	#[test]
	fn trail_fades_and_stops_at_top_edge() {
		let mut rng = StdRng::seed_from_u64(9);
		let params = StreamParams::default();
		let glyphs: Vec<char> = GLYPHS.chars().collect();
		let head = StreamParticle {
			x: 40.0,
			y: 50.0,
			speed: 3.0,
			glyph: '0',
			opacity: 0.4,
		};
		let trail = trail(&head, &params, &glyphs, &mut rng);
		// 35, 20, 5 are on screen; -10 and -25 are not.
		assert_eq!(trail.len(), 3);
		assert!((trail[0].alpha - 0.34).abs() < 1e-12);
		assert!(trail.windows(2).all(|w| w[1].alpha < w[0].alpha));
		assert!(trail.iter().all(|t| t.pos.x == 40.0));
	}
}
