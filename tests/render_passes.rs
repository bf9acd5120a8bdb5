// Render passes drawn against a recording surface.

use ambient_fx::components::ambient::particles::{ParticleField, ParticleVariant};
use ambient_fx::components::ambient::render::{draw_field, draw_streams};
use ambient_fx::components::ambient::streams::StreamField;
use ambient_fx::components::ambient::surface::Surface;
use ambient_fx::components::ambient::theme::{Color, Theme};
use glam::DVec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Clone, Debug, PartialEq)]
enum Op {
	Clear,
	Veil(Color),
	Line { color: Color, width: f64 },
	Disc { radius: f64 },
	Halo { inner: f64, outer: f64 },
	Glyph(char),
}

#[derive(Default)]
struct Recorder {
	ops: Vec<Op>,
}

impl Recorder {
	fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
		self.ops.iter().filter(|op| pred(op)).count()
	}
}

impl Surface for Recorder {
	fn size(&self) -> (f64, f64) {
		(1500.0, 800.0)
	}

	fn clear(&mut self) {
		self.ops.push(Op::Clear);
	}

	fn veil(&mut self, color: Color) {
		self.ops.push(Op::Veil(color));
	}

	fn line(&mut self, _from: DVec2, _to: DVec2, color: Color, width: f64) {
		self.ops.push(Op::Line { color, width });
	}

	fn disc(&mut self, _center: DVec2, radius: f64, _color: Color) {
		self.ops.push(Op::Disc { radius });
	}

	fn halo(&mut self, _center: DVec2, inner: f64, outer: f64, _color: Color) {
		self.ops.push(Op::Halo { inner, outer });
	}

	fn glyph(&mut self, glyph: char, _at: DVec2, _font: &str, _color: Color) {
		self.ops.push(Op::Glyph(glyph));
	}
}

#[test]
fn basic_field_veils_then_draws_flat_discs() {
	let mut rng = StdRng::seed_from_u64(1);
	let field = ParticleField::new(ParticleVariant::Basic, 1500.0, 800.0, 4, &mut rng);
	let theme = Theme::neon();
	let mut surface = Recorder::default();

	draw_field(&mut surface, &field, None, &theme);

	assert_eq!(surface.ops[0], Op::Veil(Color::rgba(2, 2, 4, 0.15)));
	assert_eq!(surface.count(|op| matches!(op, Op::Disc { .. })), field.particles.len());
	assert_eq!(surface.count(|op| matches!(op, Op::Halo { .. })), 0);
	assert_eq!(surface.count(|op| matches!(op, Op::Line { .. })), field.links().len());
}

#[test]
fn glow_field_clears_and_haloes_every_particle() {
	let mut rng = StdRng::seed_from_u64(2);
	let field = ParticleField::new(ParticleVariant::Glow, 1500.0, 800.0, 4, &mut rng);
	let mut surface = Recorder::default();

	draw_field(&mut surface, &field, None, &Theme::neon_glow());

	assert_eq!(surface.ops[0], Op::Clear);
	assert_eq!(surface.count(|op| matches!(op, Op::Halo { .. })), field.particles.len());
	for op in &surface.ops {
		if let Op::Halo { inner, outer } = op {
			assert!((outer / inner - 8.0).abs() < 1e-9);
		}
	}
}

#[test]
fn pointer_links_are_drawn_last() {
	let mut rng = StdRng::seed_from_u64(3);
	let field = ParticleField::new(ParticleVariant::Basic, 1500.0, 800.0, 4, &mut rng);
	let theme = Theme::neon();
	let pointer = DVec2::new(750.0, 400.0);
	let expected = field.pointer_links(pointer).len();
	assert!(expected > 0);

	let mut surface = Recorder::default();
	draw_field(&mut surface, &field, Some(pointer), &theme);

	let tail = &surface.ops[surface.ops.len() - expected..];
	assert!(tail.iter().all(|op| matches!(
		op,
		Op::Line { width, .. } if *width == theme.field.pointer_link_width
	)));
}

#[test]
fn streams_clear_then_draw_heads_and_trails() {
	let mut rng = StdRng::seed_from_u64(4);
	let field = StreamField::new(1500.0, 800.0, &mut rng);
	let mut surface = Recorder::default();

	draw_streams(&mut surface, &field, &Theme::neon(), &mut rng);

	assert_eq!(surface.ops[0], Op::Clear);
	assert_eq!(surface.count(|op| *op == Op::Clear), 1);
	let glyphs = surface.count(|op| matches!(op, Op::Glyph(_)));
	assert!(glyphs >= field.particles.len());
	assert!(glyphs <= field.particles.len() * 6);
}
