//! Runtime configuration, read from a JSON script block in the host page.
//!
//! Every field has a default so an absent or partial blob still yields the
//! stock look.

use serde::{Deserialize, Serialize};

use crate::components::ambient::ParticleVariant;

/// Top-level effect configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EffectsConfig {
	pub particles: ParticlesConfig,
	pub streams: ToggleConfig,
	pub orbits: ToggleConfig,
	pub cursor_trail: ToggleConfig,
	pub scroll: ScrollConfig,
}

/// Particle field toggle and variant selection.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ParticlesConfig {
	pub enabled: bool,
	pub variant: ParticleVariant,
}

impl Default for ParticlesConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			variant: ParticleVariant::Basic,
		}
	}
}

/// On/off switch for effects with no other knobs.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ToggleConfig {
	pub enabled: bool,
}

impl Default for ToggleConfig {
	fn default() -> Self {
		Self { enabled: true }
	}
}

/// Scroll choreography settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollConfig {
	pub enabled: bool,
	/// Band around each pinned region, in scroll fractions.
	pub tolerance: f64,
	/// Fallback delay before regions are scanned if no pin owner signals
	/// that layout has stabilised.
	pub settle_delay_ms: i32,
	/// Re-scan pinned regions after a window resize once settled.
	pub rescan_on_resize: bool,
	/// CSS selector for elements that declare a pin in markup.
	pub pin_selector: String,
	pub snap: SnapSettings,
}

impl Default for ScrollConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			tolerance: 0.02,
			settle_delay_ms: 1000,
			rescan_on_resize: false,
			pin_selector: "[data-pin]".to_string(),
			snap: SnapSettings::default(),
		}
	}
}

/// Parameters handed to the external smooth-scroll driver alongside the snap
/// target function.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnapSettings {
	/// Shortest snap animation, in seconds.
	pub duration_min: f64,
	/// Longest snap animation, in seconds.
	pub duration_max: f64,
	pub delay: f64,
	pub ease: String,
}

impl Default for SnapSettings {
	fn default() -> Self {
		Self {
			duration_min: 0.15,
			duration_max: 0.4,
			delay: 0.0,
			ease: "power2.out".to_string(),
		}
	}
}

impl EffectsConfig {
	/// Parses a JSON blob, falling back to defaults for any missing field.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
