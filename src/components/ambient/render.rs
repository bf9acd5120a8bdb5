//! Drawing passes for the canvas engines.
//!
//! The particle field draws in passes for correct layering:
//! 1. Fade veil, or a full clear when the theme has none
//! 2. Particle-to-particle links
//! 3. Glow halos, then particle discs
//! 4. Pointer links on top

use glam::DVec2;
use rand::Rng;

use super::particles::ParticleField;
use super::streams::{self, StreamField};
use super::surface::Surface;
use super::theme::Theme;

/// Renders one particle field frame.
pub fn draw_field<S: Surface>(
	surface: &mut S,
	field: &ParticleField,
	pointer: Option<DVec2>,
	theme: &Theme,
) {
	let style = &theme.field;
	match style.fade_fill {
		Some(veil) => surface.veil(veil),
		None => surface.clear(),
	}

	for link in field.links() {
		let (a, b) = (&field.particles[link.a], &field.particles[link.b]);
		surface.line(a.pos, b.pos, style.link_color.with_alpha(link.alpha), style.link_width);
	}

	let amplitude = field.params.pulse_amplitude;
	for p in &field.particles {
		let radius = p.pulsed_radius(amplitude);
		let color = theme.palette.get(p.color);
		if field.params.glow {
			surface.halo(
				p.pos,
				radius * 0.5,
				radius * style.glow_scale,
				color.lighten(0.2).with_alpha(p.opacity * 0.5),
			);
		}
		surface.disc(p.pos, radius, color.with_alpha(p.opacity));
	}

	if let Some(pointer) = pointer {
		for link in field.pointer_links(pointer) {
			let p = &field.particles[link.particle];
			surface.line(
				p.pos,
				pointer,
				style.pointer_link_color.with_alpha(link.alpha),
				style.pointer_link_width,
			);
		}
	}
}

/// Renders one stream frame: full clear, then each head and its trail.
pub fn draw_streams<S: Surface, R: Rng>(
	surface: &mut S,
	field: &StreamField,
	theme: &Theme,
	rng: &mut R,
) {
	let style = &theme.streams;
	surface.clear();

	for p in &field.particles {
		surface.glyph(
			p.glyph,
			DVec2::new(p.x, p.y),
			style.font,
			style.color.with_alpha(p.opacity),
		);
		for t in streams::trail(p, &field.params, &field.glyphs, rng) {
			surface.glyph(t.glyph, t.pos, style.font, style.color.with_alpha(t.alpha));
		}
	}
}
