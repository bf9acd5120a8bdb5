//! Mouse-reactive particle field.
//!
//! Particles drift, pulse, wrap around the viewport and link up with nearby
//! neighbours. Two variants share the update rule but differ in how many
//! neighbour pairs they test, how they are drawn and how often they tick.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::{self, Bounds};
use super::scheduler::Throttle;

/// Which particle engine to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleVariant {
	/// Flat discs, windowed neighbour links, 30 fps wall-clock pacing.
	#[default]
	Basic,
	/// Radial glow, all-pairs links, every other display frame.
	Glow,
}

/// Which neighbour pairs are tested for a connecting line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NeighbourWindow {
	/// Only particles whose index is a multiple of `stride` look ahead, and
	/// only at the next `look_ahead` particles in array order.
	Windowed { stride: usize, look_ahead: usize },
	/// Every particle against every particle after it.
	AllPairs,
}

/// Motion and linking constants for one variant.
#[derive(Clone, Debug)]
pub struct ParticleParams {
	pub max_count: usize,
	/// One particle per this many pixels of viewport width.
	pub width_per_particle: f64,
	pub margin: f64,
	pub damping: f64,
	pub initial_speed: f64,
	pub radius_range: (f64, f64),
	pub opacity_range: (f64, f64),
	pub pulse_step: f64,
	pub pulse_amplitude: f64,
	pub pointer_radius: f64,
	pub pointer_strength: f64,
	pub link_range: f64,
	pub link_peak_alpha: f64,
	pub pointer_link_range: f64,
	pub pointer_link_peak_alpha: f64,
	pub neighbours: NeighbourWindow,
	pub glow: bool,
	pub throttle: Throttle,
}

impl ParticleParams {
	pub fn for_variant(variant: ParticleVariant) -> Self {
		let basic = Self {
			max_count: 100,
			width_per_particle: 15.0,
			margin: 50.0,
			damping: 0.995,
			initial_speed: 0.15,
			radius_range: (0.5, 2.5),
			opacity_range: (0.2, 0.6),
			pulse_step: 0.05,
			pulse_amplitude: 0.2,
			pointer_radius: 200.0,
			pointer_strength: 0.015,
			link_range: 150.0,
			link_peak_alpha: 0.3,
			pointer_link_range: 250.0,
			pointer_link_peak_alpha: 0.4,
			neighbours: NeighbourWindow::Windowed {
				stride: 2,
				look_ahead: 14,
			},
			glow: false,
			throttle: Throttle::TargetFps(30.0),
		};
		match variant {
			ParticleVariant::Basic => basic,
			ParticleVariant::Glow => Self {
				pointer_radius: 250.0,
				pointer_strength: 0.012,
				neighbours: NeighbourWindow::AllPairs,
				glow: true,
				throttle: Throttle::EveryNth(2),
				..basic
			},
		}
	}

	/// `min(max_count, floor(width / width_per_particle))`.
	pub fn count_for_width(&self, width: f64) -> usize {
		if width <= 0.0 || self.width_per_particle <= 0.0 {
			return 0;
		}
		((width / self.width_per_particle).floor() as usize).min(self.max_count)
	}
}

/// A single drifting point.
#[derive(Clone, Debug)]
pub struct Particle {
	pub pos: DVec2,
	pub vel: DVec2,
	pub radius: f64,
	pub opacity: f64,
	/// Index into the theme palette.
	pub color: usize,
	pub pulse_phase: f64,
}

impl Particle {
	/// Radius including the current pulse.
	pub fn pulsed_radius(&self, amplitude: f64) -> f64 {
		self.radius * (1.0 + self.pulse_phase.sin() * amplitude)
	}
}

/// What a tick reads from the outside world.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
	/// Pointer position in viewport pixels while it is over the page.
	pub pointer: Option<DVec2>,
	pub bounds: Bounds,
}

/// A line between two particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub a: usize,
	pub b: usize,
	pub alpha: f64,
}

/// A line from a particle to the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerLink {
	pub particle: usize,
	pub alpha: f64,
}

/// Creates `count` particles scattered across the viewport.
pub fn spawn<R: Rng>(
	count: usize,
	width: f64,
	height: f64,
	params: &ParticleParams,
	palette_len: usize,
	rng: &mut R,
) -> Vec<Particle> {
	let palette_len = palette_len.max(1);
	let speed = params.initial_speed;
	(0..count)
		.map(|_| Particle {
			pos: DVec2::new(
				rng.gen_range(0.0..width.max(f64::EPSILON)),
				rng.gen_range(0.0..height.max(f64::EPSILON)),
			),
			vel: DVec2::new(rng.gen_range(-speed..=speed), rng.gen_range(-speed..=speed)),
			radius: rng.gen_range(params.radius_range.0..=params.radius_range.1),
			opacity: rng.gen_range(params.opacity_range.0..=params.opacity_range.1),
			color: rng.gen_range(0..palette_len),
			pulse_phase: rng.gen_range(0.0..TAU),
		})
		.collect()
}

/// Advances every particle by one tick, in array order.
///
/// Pulse, integrate, attract toward the pointer, wrap, then damp. The pointer
/// pull is an impulse on velocity, so particles overshoot and orbit rather
/// than snapping to the cursor.
pub fn tick(particles: &mut [Particle], input: &FrameInput, params: &ParticleParams) {
	for p in particles.iter_mut() {
		p.pulse_phase += params.pulse_step;
		p.pos += p.vel;

		if let Some(pointer) = input.pointer {
			p.vel += field::attraction(p.pos, pointer, params.pointer_radius, params.pointer_strength);
		}

		p.pos = input.bounds.wrap(p.pos);
		p.vel = field::damp(p.vel, params.damping);
	}
}

/// Connecting lines between particles closer than `link_range`.
pub fn links(particles: &[Particle], params: &ParticleParams) -> Vec<Link> {
	let range_sq = params.link_range * params.link_range;
	let n = particles.len();
	let mut out = Vec::new();

	for (i, p) in particles.iter().enumerate() {
		let end = match params.neighbours {
			NeighbourWindow::Windowed { stride, look_ahead } => {
				if stride > 1 && i % stride != 0 {
					continue;
				}
				(i + 1 + look_ahead).min(n)
			}
			NeighbourWindow::AllPairs => n,
		};
		for (j, other) in particles.iter().enumerate().take(end).skip(i + 1) {
			let dist_sq = p.pos.distance_squared(other.pos);
			if dist_sq < range_sq {
				out.push(Link {
					a: i,
					b: j,
					alpha: field::proximity_alpha(
						dist_sq.sqrt(),
						params.link_range,
						params.link_peak_alpha,
					),
				});
			}
		}
	}
	out
}

/// Lines from particles to the pointer, when it is close enough.
pub fn pointer_links(
	particles: &[Particle],
	pointer: DVec2,
	params: &ParticleParams,
) -> Vec<PointerLink> {
	let range_sq = params.pointer_link_range * params.pointer_link_range;
	particles
		.iter()
		.enumerate()
		.filter_map(|(i, p)| {
			let dist_sq = p.pos.distance_squared(pointer);
			(dist_sq < range_sq).then(|| PointerLink {
				particle: i,
				alpha: field::proximity_alpha(
					dist_sq.sqrt(),
					params.pointer_link_range,
					params.pointer_link_peak_alpha,
				),
			})
		})
		.collect()
}

/// Owns the particle array for one canvas.
pub struct ParticleField {
	pub variant: ParticleVariant,
	pub params: ParticleParams,
	pub particles: Vec<Particle>,
	pub bounds: Bounds,
	palette_len: usize,
}

impl ParticleField {
	pub fn new<R: Rng>(
		variant: ParticleVariant,
		width: f64,
		height: f64,
		palette_len: usize,
		rng: &mut R,
	) -> Self {
		let params = ParticleParams::for_variant(variant);
		let count = params.count_for_width(width);
		let particles = spawn(count, width, height, &params, palette_len, rng);
		Self {
			variant,
			bounds: Bounds::new(width, height, params.margin),
			params,
			particles,
			palette_len,
		}
	}

	/// Throws the current particles away and scatters a fresh set sized for
	/// the new viewport.
	pub fn reset<R: Rng>(&mut self, width: f64, height: f64, rng: &mut R) {
		let count = self.params.count_for_width(width);
		self.particles = spawn(count, width, height, &self.params, self.palette_len, rng);
		self.bounds = Bounds::new(width, height, self.params.margin);
	}

	pub fn step(&mut self, pointer: Option<DVec2>) {
		let input = FrameInput {
			pointer,
			bounds: self.bounds,
		};
		tick(&mut self.particles, &input, &self.params);
	}

	pub fn links(&self) -> Vec<Link> {
		links(&self.particles, &self.params)
	}

	pub fn pointer_links(&self, pointer: DVec2) -> Vec<PointerLink> {
		pointer_links(&self.particles, pointer, &self.params)
	}
}
