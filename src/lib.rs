//! ambient-fx: decorative canvas layers and pinned-section scroll snapping.
//!
//! The crate mounts a set of background effects (particle field, glyph
//! streams, orbiting blobs, cursor trail) behind a static page and exposes a
//! snap target function to the page's smooth scroller.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlScriptElement, Window};

// Pulled in only for its `js` entropy source.
use getrandom as _;

pub mod components;
pub mod config;
pub mod error;

pub use components::ambient::{AmbientBackdrop, ParticleVariant};
pub use components::scroll::ScrollChoreography;
use components::scroll::bridge;
pub use config::EffectsConfig;
pub use error::SetupError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-fx: logging initialized");
}

/// Load effect settings from a script element with id="effects-config".
/// A missing element yields defaults; so does a blob that fails to parse.
pub fn load_config() -> EffectsConfig {
	let Some(json_text) = config_text() else {
		return EffectsConfig::default();
	};

	match EffectsConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"ambient-fx: config loaded (particles: {:?}, scroll snapping: {})",
				config.particles.variant, config.scroll.enabled
			);
			config
		}
		Err(e) => {
			warn!("ambient-fx: failed to parse effects config: {}", e);
			EffectsConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("effects-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Whether a snap mapping is currently installed.
#[wasm_bindgen]
pub fn snap_installed() -> bool {
	bridge::is_installed()
}

/// Snap target for a resting scroll fraction, or `undefined` when snapping is
/// not installed.
#[wasm_bindgen]
pub fn snap_target(value: f64) -> Option<f64> {
	bridge::snap_target(value)
}

/// Snap animation settings as a plain object, or `null` when snapping is not
/// installed.
#[wasm_bindgen]
pub fn snap_settings() -> JsValue {
	bridge::snap_settings()
		.and_then(|settings| serde_json::to_string(&settings).ok())
		.and_then(|json| js_sys::JSON::parse(&json).ok())
		.unwrap_or(JsValue::NULL)
}

/// Installed regions as `[{ start, end, center }]` scroll fractions.
#[wasm_bindgen]
pub fn snap_regions() -> JsValue {
	serde_json::to_string(&bridge::installed_regions())
		.ok()
		.and_then(|json| js_sys::JSON::parse(&json).ok())
		.unwrap_or(JsValue::NULL)
}

/// Registers (or moves) a pinned section owned by `id`, in scroll pixels.
/// Takes effect at the next settle or rescan.
#[wasm_bindgen]
pub fn register_pin(id: &str, start: f64, end: f64) {
	bridge::register_pin(id, start, end);
}

#[wasm_bindgen]
pub fn unregister_pin(id: &str) -> bool {
	bridge::unregister_pin(id)
}

/// Tells the choreographer that layout is final. The first call settles; later
/// ones are ignored.
#[wasm_bindgen]
pub fn layout_stabilized() {
	if !bridge::notify_stabilized() {
		warn!("ambient-fx: layout_stabilized called before scroll snapping mounted");
	}
}

/// Main application component.
/// Loads settings from the DOM and mounts every enabled effect.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let scroll = config.scroll.clone();

	view! {
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="theme-color" content="#020204" />

		<div class="ambient-fx" aria-hidden="true">
			<AmbientBackdrop config=config />
		</div>
		<ScrollChoreography config=scroll />
	}
}
