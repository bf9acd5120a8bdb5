//! Drawing surface abstraction.
//!
//! Engines draw through [`Surface`] so their render passes can run against a
//! recording surface in tests and against a 2D canvas in the browser.

use std::f64::consts::TAU;

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;
use crate::error::SetupError;

/// The handful of 2D operations the ambient layers need.
pub trait Surface {
	/// Drawable size in pixels.
	fn size(&self) -> (f64, f64);
	/// Clears every pixel to transparent.
	fn clear(&mut self);
	/// Paints a translucent rectangle over the whole surface.
	fn veil(&mut self, color: Color);
	fn line(&mut self, from: DVec2, to: DVec2, color: Color, width: f64);
	fn disc(&mut self, center: DVec2, radius: f64, color: Color);
	/// Radial halo fading from `color` at `inner` to transparent at `outer`.
	fn halo(&mut self, center: DVec2, inner: f64, outer: f64, color: Color);
	fn glyph(&mut self, glyph: char, at: DVec2, font: &str, color: Color);
}

/// [`Surface`] backed by a canvas element's 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	glyph_buf: [u8; 4],
}

impl CanvasSurface {
	/// Acquires the 2D context, failing if the browser refuses one.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SetupError> {
		let ctx = canvas
			.get_context("2d")?
			.ok_or(SetupError::ContextUnavailable)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| SetupError::ContextUnavailable)?;
		Ok(Self {
			canvas,
			ctx,
			glyph_buf: [0; 4],
		})
	}

	/// Matches the backing store to the given CSS size.
	pub fn resize(&self, width: f64, height: f64) {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn clear(&mut self) {
		let (w, h) = self.size();
		self.ctx.clear_rect(0.0, 0.0, w, h);
	}

	fn veil(&mut self, color: Color) {
		let (w, h) = self.size();
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(0.0, 0.0, w, h);
	}

	fn line(&mut self, from: DVec2, to: DVec2, color: Color, width: f64) {
		self.ctx.begin_path();
		self.ctx.move_to(from.x, from.y);
		self.ctx.line_to(to.x, to.y);
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.stroke();
	}

	fn disc(&mut self, center: DVec2, radius: f64, color: Color) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
		self.ctx.set_fill_style_str(&color.with_alpha(1.0).to_css());
		self.ctx.set_global_alpha(color.a);
		self.ctx.fill();
		self.ctx.set_global_alpha(1.0);
	}

	fn halo(&mut self, center: DVec2, inner: f64, outer: f64, color: Color) {
		let Ok(gradient) = self
			.ctx
			.create_radial_gradient(center.x, center.y, inner, center.x, center.y, outer)
		else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");

		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, outer, 0.0, TAU);
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill();
	}

	fn glyph(&mut self, glyph: char, at: DVec2, font: &str, color: Color) {
		self.ctx.set_font(font);
		self.ctx.set_fill_style_str(&color.to_css());
		let text = glyph.encode_utf8(&mut self.glyph_buf);
		let _ = self.ctx.fill_text(text, at.x, at.y);
	}
}
