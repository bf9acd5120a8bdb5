//! Process-wide snap state read by the page's smooth scroller.
//!
//! The scroller lives outside Rust and only sees the functions exported from
//! the crate root. Those read and write the state kept here: the installed
//! query, explicitly registered pins, and the hook that turns a
//! "layout is stable" notification into a settle.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::choreographer::{PinRegistry, SnapDriver};
use super::regions::{PinDescriptor, PinnedRegion};
use super::snap::SnapQuery;
use crate::config::SnapSettings;

thread_local! {
	static INSTALLED: RefCell<Option<(SnapQuery, SnapSettings)>> = const { RefCell::new(None) };
	static REGISTRY: RefCell<PinRegistry> = RefCell::new(PinRegistry::default());
	static ON_STABILIZED: RefCell<Option<Rc<dyn Fn()>>> = const { RefCell::new(None) };
}

/// [`SnapDriver`] publishing into the shared state.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalSnapDriver;

impl SnapDriver for GlobalSnapDriver {
	fn install(&mut self, query: SnapQuery, settings: &SnapSettings) {
		INSTALLED.with_borrow_mut(|slot| *slot = Some((query, settings.clone())));
	}

	fn uninstall(&mut self) {
		INSTALLED.with_borrow_mut(|slot| *slot = None);
	}
}

pub fn is_installed() -> bool {
	INSTALLED.with_borrow(|slot| slot.is_some())
}

/// Where a scroll resting at `value` should settle, or `None` when no
/// snapping is installed.
pub fn snap_target(value: f64) -> Option<f64> {
	INSTALLED.with_borrow(|slot| slot.as_ref().map(|(query, _)| query.snap(value)))
}

pub fn snap_settings() -> Option<SnapSettings> {
	INSTALLED.with_borrow(|slot| slot.as_ref().map(|(_, settings)| settings.clone()))
}

pub fn installed_regions() -> Vec<PinnedRegion> {
	INSTALLED.with_borrow(|slot| {
		slot.as_ref()
			.map(|(query, _)| query.regions().to_vec())
			.unwrap_or_default()
	})
}

pub fn register_pin(id: &str, start: f64, end: f64) {
	REGISTRY.with_borrow_mut(|registry| registry.register(id, start, end));
	debug!("scroll: pin {id} registered at {start}..{end}");
}

pub fn unregister_pin(id: &str) -> bool {
	REGISTRY.with_borrow_mut(|registry| registry.unregister(id))
}

pub fn registered_pins() -> Vec<PinDescriptor> {
	REGISTRY.with_borrow(|registry| registry.descriptors())
}

/// Sets or clears the callback run by [`notify_stabilized`].
pub fn set_on_stabilized(hook: Option<Rc<dyn Fn()>>) {
	ON_STABILIZED.with_borrow_mut(|slot| *slot = hook);
}

/// Runs the stabilised hook, if any. Returns whether one was set.
pub fn notify_stabilized() -> bool {
	// Cloned out first so the hook may replace itself.
	let hook = ON_STABILIZED.with_borrow(|slot| slot.clone());
	match hook {
		Some(hook) => {
			hook();
			true
		}
		None => false,
	}
}
