//! Visual theming for the ambient layers.
//!
//! Colours, fills and glyph fonts live here. Motion constants do not; those
//! belong to each engine's `Params`.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Scales the existing alpha, e.g. for distance fades.
	pub fn fade(self, factor: f64) -> Self {
		Self {
			a: (self.a * factor).clamp(0.0, 1.0),
			..self
		}
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// The four accent colours shared by particles and blobs.
#[derive(Clone, Debug)]
pub struct NeonPalette {
	pub colors: Vec<Color>,
}

impl NeonPalette {
	pub fn neon() -> Self {
		Self {
			colors: vec![
				Color::rgb(46, 110, 255),  // Electric blue
				Color::rgb(0, 240, 255),   // Cyan
				Color::rgb(184, 41, 221),  // Violet
				Color::rgb(255, 46, 140),  // Hot pink
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}
}

/// Particle field colours.
#[derive(Clone, Debug)]
pub struct FieldStyle {
	/// Translucent fill laid over the previous frame instead of clearing,
	/// leaving short motion trails. `None` clears the canvas outright.
	pub fade_fill: Option<Color>,
	/// Particle-to-particle link colour (alpha is replaced per link).
	pub link_color: Color,
	pub link_width: f64,
	/// Particle-to-pointer link colour (alpha is replaced per link).
	pub pointer_link_color: Color,
	pub pointer_link_width: f64,
	/// Glow halo radius as a multiple of the particle radius.
	pub glow_scale: f64,
}

/// Falling glyph stream colours.
#[derive(Clone, Debug)]
pub struct StreamStyle {
	pub color: Color,
	pub font: &'static str,
	/// CSS opacity of the whole stream canvas.
	pub canvas_opacity: f64,
}

/// One drifting blob.
#[derive(Clone, Debug)]
pub struct BlobStyle {
	pub color: Color,
	/// Square edge length in CSS pixels.
	pub size: f64,
	pub opacity: f64,
	pub blur: f64,
	/// CSS placement, e.g. `top: 10%; left: 10%;`.
	pub anchor: &'static str,
}

/// Cursor follower look.
#[derive(Clone, Debug)]
pub struct TrailStyle {
	pub cursor_class: &'static str,
	pub trail_class: &'static str,
	/// Opacity of the first trail dot; each following dot loses `opacity_step`.
	pub opacity: f64,
	pub opacity_step: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub palette: NeonPalette,
	pub field: FieldStyle,
	pub streams: StreamStyle,
	pub blobs: Vec<BlobStyle>,
	pub trail: TrailStyle,
}

impl Theme {
	/// Dark page with neon accents (default)
	pub fn neon() -> Self {
		let palette = NeonPalette::neon();
		Self {
			name: "neon",
			field: FieldStyle {
				fade_fill: Some(Color::rgba(2, 2, 4, 0.15)),
				link_color: palette.get(0),
				link_width: 0.5,
				pointer_link_color: palette.get(1),
				pointer_link_width: 0.8,
				glow_scale: 4.0,
			},
			streams: StreamStyle {
				color: palette.get(1),
				font: "14px monospace",
				canvas_opacity: 0.4,
			},
			blobs: vec![
				BlobStyle {
					color: palette.get(0),
					size: 600.0,
					opacity: 0.2,
					blur: 80.0,
					anchor: "top: 10%; left: 10%;",
				},
				BlobStyle {
					color: palette.get(1),
					size: 500.0,
					opacity: 0.15,
					blur: 60.0,
					anchor: "top: 50%; right: 5%;",
				},
				BlobStyle {
					color: palette.get(2),
					size: 400.0,
					opacity: 0.15,
					blur: 70.0,
					anchor: "bottom: 10%; left: 30%;",
				},
				BlobStyle {
					color: palette.get(3),
					size: 300.0,
					opacity: 0.1,
					blur: 50.0,
					anchor: "top: 30%; right: 20%;",
				},
			],
			trail: TrailStyle {
				cursor_class: "custom-cursor",
				trail_class: "cursor-trail",
				opacity: 0.3,
				opacity_step: 0.05,
			},
			palette,
		}
	}

	/// Same palette, but the particle field clears fully each tick instead of
	/// smearing.
	pub fn neon_glow() -> Self {
		let mut theme = Self::neon();
		theme.name = "neon_glow";
		theme.field.fade_fill = None;
		theme
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::neon()
	}
}

impl BlobStyle {
	/// Inline CSS for the blob's static layout; motion is applied on top as a
	/// transform.
	pub fn css(&self) -> String {
		format!(
			"position: absolute; width: {size}px; height: {size}px; opacity: {opacity}; \
			 background: radial-gradient(circle, {color} 0%, transparent 70%); \
			 filter: blur({blur}px); will-change: transform; {anchor}",
			size = self.size,
			opacity = self.opacity,
			color = self.color.to_css(),
			blur = self.blur,
			anchor = self.anchor,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_uses_hex_for_opaque_and_rgba_otherwise() {
		assert_eq!(Color::rgb(46, 110, 255).to_css(), "#2e6eff");
		assert_eq!(
			Color::rgb(0, 240, 255).with_alpha(0.25).to_css(),
			"rgba(0, 240, 255, 0.25)"
		);
	}

	#[test]
	fn fade_scales_and_clamps_alpha() {
		let c = Color::rgba(1, 2, 3, 0.5);
		assert_eq!(c.fade(0.5).a, 0.25);
		assert_eq!(c.fade(4.0).a, 1.0);
	}

	#[test]
	fn neon_theme_has_one_blob_per_accent() {
		let theme = Theme::neon();
		assert_eq!(theme.blobs.len(), theme.palette.len());
		assert!(theme.field.fade_fill.is_some());
		assert!(Theme::neon_glow().field.fade_fill.is_none());
	}
}
