//! Slow Lissajous drift for the background blobs.

use std::f64::consts::TAU;

use glam::DVec2;

/// One shape's path around its static layout position.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
	pub angle: f64,
	pub radius: f64,
	/// Radians added per display frame.
	pub speed: f64,
}

impl Orbit {
	/// Offset from the layout position: a 2:3 Lissajous figure, flattened
	/// vertically.
	pub fn offset(&self) -> DVec2 {
		DVec2::new(
			self.angle.cos() * self.radius,
			(self.angle * 1.5).sin() * self.radius * 0.6,
		)
	}
}

/// The full set of orbiting shapes. Created once; never grows or shrinks.
#[derive(Clone, Debug)]
pub struct OrbitSet {
	pub orbits: Vec<Orbit>,
}

impl OrbitSet {
	/// Spreads `count` shapes evenly around the circle, each further out and a
	/// little faster than the one before.
	pub fn new(count: usize) -> Self {
		let orbits = (0..count)
			.map(|i| Orbit {
				angle: i as f64 * TAU / count as f64,
				radius: 150.0 + i as f64 * 50.0,
				speed: 0.002 + i as f64 * 0.001,
			})
			.collect();
		Self { orbits }
	}

	pub fn advance(&mut self) {
		for orbit in &mut self.orbits {
			orbit.angle += orbit.speed;
		}
	}

	pub fn offsets(&self) -> impl Iterator<Item = DVec2> + '_ {
		self.orbits.iter().map(Orbit::offset)
	}
}

/// CSS transform for one offset.
pub fn translate_css(offset: DVec2) -> String {
	format!("translate({:.2}px, {:.2}px)", offset.x, offset.y)
}
