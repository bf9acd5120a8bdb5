//! Leptos components mounting the ambient layers.
//!
//! Each component creates its DOM node, then starts its engine in an effect
//! once the node exists. An engine that cannot get a drawing surface logs a
//! warning and leaves its layer blank. Everything an engine acquires lives in
//! one [`EngineRuntime`], dropped when the component is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, HtmlElement};

use super::orbits::{OrbitSet, translate_css};
use super::particles::{ParticleField, ParticleVariant};
use super::render;
use super::scheduler::{FrameGate, Throttle};
use super::streams::StreamField;
use super::surface::CanvasSurface;
use super::theme::Theme;
use super::trail::{CursorTrail, TrailParams};
use crate::components::runtime::{
	self, AnimationLoop, ListenerGuard, PointerTracker, ScopedSlot, scoped_slot,
};
use crate::config::EffectsConfig;
use crate::error::SetupError;

/// Resources held by a running engine. Dropping it stops the engine.
struct EngineRuntime {
	_frames: AnimationLoop,
	_listeners: Vec<ListenerGuard>,
	_pointer: Option<PointerTracker>,
}

fn mount(
	slot: &ScopedSlot<EngineRuntime>,
	layer: &str,
	start: impl FnOnce() -> Result<EngineRuntime, SetupError>,
) {
	// Drop any previous engine before starting the replacement.
	slot.borrow_mut().take();
	match start() {
		Ok(rt) => *slot.borrow_mut() = Some(rt),
		Err(e) => warn!("{layer}: layer disabled: {e}"),
	}
}

fn pointer_or_attach(
	shared: Option<PointerTracker>,
	window: &web_sys::Window,
) -> Result<PointerTracker, SetupError> {
	match shared {
		Some(tracker) => Ok(tracker),
		None => PointerTracker::attach(window),
	}
}

/// Elements under `root` matching `selector`, in document order.
fn html_children(root: &Element, selector: &str) -> Result<Vec<HtmlElement>, SetupError> {
	let list = root.query_selector_all(selector)?;
	Ok((0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<HtmlElement>().ok())
		.collect())
}

struct ParticleEngine {
	surface: CanvasSurface,
	field: ParticleField,
	gate: FrameGate,
	rng: StdRng,
}

fn start_particles(
	canvas: HtmlCanvasElement,
	variant: ParticleVariant,
	pointer: Option<PointerTracker>,
) -> Result<EngineRuntime, SetupError> {
	let window = runtime::window()?;
	let surface = CanvasSurface::new(canvas)?;
	let (w, h) = runtime::viewport_size(&window);
	surface.resize(w, h);

	let theme = match variant {
		ParticleVariant::Basic => Theme::neon(),
		ParticleVariant::Glow => Theme::neon_glow(),
	};
	let mut rng = StdRng::from_entropy();
	let field = ParticleField::new(variant, w, h, theme.palette.len(), &mut rng);
	info!(
		"particles: {variant:?} field with {} particles in {w}x{h}",
		field.particles.len()
	);
	let pointer = pointer_or_attach(pointer, &window)?;

	let engine = Rc::new(RefCell::new(ParticleEngine {
		surface,
		gate: FrameGate::new(field.params.throttle),
		field,
		rng,
	}));

	let resize = {
		let (engine, win) = (engine.clone(), window.clone());
		ListenerGuard::attach(&window, "resize", move |_| {
			let (w, h) = runtime::viewport_size(&win);
			let mut e = engine.borrow_mut();
			let ParticleEngine {
				surface, field, rng, ..
			} = &mut *e;
			surface.resize(w, h);
			field.reset(w, h, rng);
			debug!("particles: reinitialised {} for {w}x{h}", field.particles.len());
		})?
	};

	let frames = {
		let (engine, win, pointer) = (engine.clone(), window.clone(), pointer.clone());
		AnimationLoop::start(&window, move |now| {
			let mut e = engine.borrow_mut();
			if !e.gate.admit(now, runtime::document_hidden(&win)) {
				return;
			}
			let at = pointer.get().position();
			let ParticleEngine { surface, field, .. } = &mut *e;
			field.step(at);
			render::draw_field(surface, field, at, &theme);
		})?
	};

	Ok(EngineRuntime {
		_frames: frames,
		_listeners: vec![resize],
		_pointer: Some(pointer),
	})
}

/// Full-viewport particle field that reacts to the pointer.
#[component]
pub fn ParticleCanvas(#[prop(default = ParticleVariant::Basic)] variant: ParticleVariant) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let slot = scoped_slot();
	let pointer = use_context::<PointerTracker>();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let pointer = pointer.clone();
		mount(&slot, "particles", move || start_particles(canvas, variant, pointer));
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-particles"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 1;"
		/>
	}
}

struct StreamEngine {
	surface: CanvasSurface,
	field: StreamField,
	gate: FrameGate,
	rng: StdRng,
}

fn start_streams(canvas: HtmlCanvasElement, theme: Theme) -> Result<EngineRuntime, SetupError> {
	let window = runtime::window()?;
	let surface = CanvasSurface::new(canvas)?;
	let (w, h) = runtime::viewport_size(&window);
	surface.resize(w, h);

	let mut rng = StdRng::from_entropy();
	let field = StreamField::new(w, h, &mut rng);
	info!("streams: {} lanes", field.particles.len());

	let engine = Rc::new(RefCell::new(StreamEngine {
		surface,
		gate: FrameGate::new(field.params.throttle),
		field,
		rng,
	}));

	let resize = {
		let (engine, win) = (engine.clone(), window.clone());
		ListenerGuard::attach(&window, "resize", move |_| {
			let (w, h) = runtime::viewport_size(&win);
			let mut e = engine.borrow_mut();
			e.surface.resize(w, h);
			e.field.resize(w, h);
		})?
	};

	let frames = {
		let (engine, win) = (engine.clone(), window.clone());
		AnimationLoop::start(&window, move |now| {
			let mut e = engine.borrow_mut();
			if !e.gate.admit(now, runtime::document_hidden(&win)) {
				return;
			}
			let StreamEngine {
				surface, field, rng, ..
			} = &mut *e;
			field.step(rng);
			render::draw_streams(surface, field, &theme, rng);
		})?
	};

	Ok(EngineRuntime {
		_frames: frames,
		_listeners: vec![resize],
		_pointer: None,
	})
}

/// Full-viewport falling glyph streams.
#[component]
pub fn StreamCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let slot = scoped_slot();
	let theme = Theme::default();
	let style = format!(
		"position: fixed; inset: 0; pointer-events: none; z-index: 1; opacity: {};",
		theme.streams.canvas_opacity
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let theme = theme.clone();
		mount(&slot, "streams", move || start_streams(canvas, theme));
	});

	view! { <canvas node_ref=canvas_ref class="ambient-streams" style=style /> }
}

fn start_orbits(container: Element) -> Result<EngineRuntime, SetupError> {
	let window = runtime::window()?;
	let blobs = html_children(&container, ".ambient-blob")?;
	let mut orbits = OrbitSet::new(blobs.len());
	let mut gate = FrameGate::new(Throttle::EveryFrame);

	let win = window.clone();
	let frames = AnimationLoop::start(&window, move |now| {
		if !gate.admit(now, runtime::document_hidden(&win)) {
			return;
		}
		orbits.advance();
		for (blob, offset) in blobs.iter().zip(orbits.offsets()) {
			let _ = blob.style().set_property("transform", &translate_css(offset));
		}
	})?;

	Ok(EngineRuntime {
		_frames: frames,
		_listeners: Vec::new(),
		_pointer: None,
	})
}

/// Large blurred colour blobs drifting behind the page.
#[component]
pub fn OrbitBlobs() -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let slot = scoped_slot();
	let blobs = Theme::default()
		.blobs
		.into_iter()
		.map(|blob| view! { <div class="ambient-blob" style=blob.css() /> })
		.collect_view();

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let container: Element = container.into();
		mount(&slot, "orbits", move || start_orbits(container));
	});

	view! {
		<div
			node_ref=container_ref
			class="ambient-orbits"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0; overflow: hidden;"
		>
			{blobs}
		</div>
	}
}

fn follower_css(pos: DVec2) -> String {
	format!(
		"translate({:.1}px, {:.1}px) translate(-50%, -50%)",
		pos.x, pos.y
	)
}

fn start_cursor_trail(
	container: Element,
	pointer: Option<PointerTracker>,
) -> Result<EngineRuntime, SetupError> {
	let window = runtime::window()?;
	let cursor = html_children(&container, ".ambient-cursor")?;
	let dots = html_children(&container, ".ambient-trail")?;
	let pointer = pointer_or_attach(pointer, &window)?;

	let mut trail = CursorTrail::new(&TrailParams {
		trail_len: dots.len(),
		..TrailParams::default()
	});
	let mut gate = FrameGate::new(Throttle::EveryFrame);
	let mut last_time: Option<f64> = None;
	let mut last_pointer: Option<DVec2> = None;

	let (win, tracker) = (window.clone(), pointer.clone());
	let frames = AnimationLoop::start(&window, move |now| {
		if !gate.admit(now, runtime::document_hidden(&win)) {
			last_time = None;
			return;
		}
		let dt = last_time.map_or(0.0, |t| (now - t) / 1000.0);
		last_time = Some(now);

		let at = tracker.get().position();
		if let Some(pos) = at.filter(|p| Some(*p) != last_pointer) {
			trail.point_to(pos);
		}
		last_pointer = at;
		if trail.is_settled() {
			return;
		}
		trail.advance(dt);

		for el in &cursor {
			let _ = el.style().set_property("transform", &follower_css(trail.cursor.position()));
		}
		for (el, dot) in dots.iter().zip(&trail.trail) {
			let _ = el.style().set_property("transform", &follower_css(dot.position()));
		}
	})?;

	Ok(EngineRuntime {
		_frames: frames,
		_listeners: Vec::new(),
		_pointer: Some(pointer),
	})
}

fn is_coarse_pointer() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media("(pointer: coarse)").ok().flatten())
		.is_some_and(|mq| mq.matches())
}

/// Custom cursor with a staggered trail. Not rendered on touch devices.
#[component]
pub fn CursorTrailLayer() -> impl IntoView {
	if is_coarse_pointer() {
		return None;
	}

	let container_ref = NodeRef::<leptos::html::Div>::new();
	let slot = scoped_slot();
	let pointer = use_context::<PointerTracker>();
	let style = Theme::default().trail;
	let params = TrailParams::default();

	let dots = (0..params.trail_len)
		.map(|i| {
			let opacity = (style.opacity - i as f64 * style.opacity_step).max(0.0);
			view! {
				<div
					class=format!("ambient-trail {}", style.trail_class)
					style=format!("opacity: {opacity}; transform: translate(-50%, -50%);")
				/>
			}
		})
		.collect_view();

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let container: Element = container.into();
		let pointer = pointer.clone();
		mount(&slot, "cursor", move || start_cursor_trail(container, pointer));
	});

	Some(view! {
		<div node_ref=container_ref class="ambient-cursor-layer" style="pointer-events: none;">
			{dots}
			<div
				class=format!("ambient-cursor {}", style.cursor_class)
				style="transform: translate(-50%, -50%);"
			/>
		</div>
	})
}

/// All enabled ambient layers, sharing one pointer tracker.
#[component]
pub fn AmbientBackdrop(config: EffectsConfig) -> impl IntoView {
	match runtime::window().and_then(|w| PointerTracker::attach(&w)) {
		Ok(tracker) => provide_context(tracker),
		Err(e) => warn!("pointer tracking unavailable: {e}"),
	}

	let variant = config.particles.variant;
	view! {
		{config.orbits.enabled.then(|| view! { <OrbitBlobs /> })}
		{config.particles.enabled.then(|| view! { <ParticleCanvas variant=variant /> })}
		{config.streams.enabled.then(|| view! { <StreamCanvas /> })}
		{config.cursor_trail.enabled.then(|| view! { <CursorTrailLayer /> })}
	}
}
