//! Setup failures for effect surfaces.
//!
//! Nothing here is raised during steady-state animation. A component that hits
//! one of these while mounting logs it and stays inert.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Reasons an effect could not acquire its browser resources.
#[derive(Debug, Error)]
pub enum SetupError {
	#[error("no global window")]
	NoWindow,
	#[error("window has no document")]
	NoDocument,
	#[error("2d drawing context unavailable")]
	ContextUnavailable,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for SetupError {
	fn from(value: JsValue) -> Self {
		SetupError::Js(format!("{value:?}"))
	}
}
