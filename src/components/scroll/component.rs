use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use super::bridge::{self, GlobalSnapDriver};
use super::choreographer::ScrollChoreographer;
use super::regions::PinDescriptor;
use crate::components::runtime::{self, ListenerGuard, TimeoutGuard, scoped_slot};
use crate::config::ScrollConfig;
use crate::error::SetupError;

type Shared = Rc<RefCell<ScrollChoreographer<GlobalSnapDriver>>>;

/// Pins reported by the page: explicit registrations first, then elements
/// matching `selector`. An element pins for `data-pin` percent of the
/// viewport height, 100 if the attribute has no number.
fn collect_pins(window: &Window, selector: &str) -> Vec<PinDescriptor> {
	let mut pins = bridge::registered_pins();
	let Some(document) = window.document() else {
		return pins;
	};
	let list = match document.query_selector_all(selector) {
		Ok(list) => list,
		Err(e) => {
			warn!("scroll: bad pin selector {selector:?}: {e:?}");
			return pins;
		}
	};

	let scroll_y = window.scroll_y().unwrap_or(0.0);
	let (_, viewport_h) = runtime::viewport_size(window);
	pins.extend(
		(0..list.length())
			.filter_map(|i| list.item(i))
			.filter_map(|node| node.dyn_into::<Element>().ok())
			.map(|el| {
				let start = el.get_bounding_client_rect().top() + scroll_y;
				let percent = el
					.get_attribute("data-pin")
					.and_then(|v| v.trim().trim_end_matches('%').parse::<f64>().ok())
					.unwrap_or(100.0);
				PinDescriptor::pinned(start, start + viewport_h * percent / 100.0)
			}),
	);
	pins
}

fn max_scroll(window: &Window) -> f64 {
	let (_, viewport_h) = runtime::viewport_size(window);
	window
		.document()
		.and_then(|d| d.document_element())
		.map_or(0.0, |root| root.scroll_height() as f64 - viewport_h)
}

fn settle(choreographer: &Weak<RefCell<ScrollChoreographer<GlobalSnapDriver>>>, window: &Window, selector: &str) {
	let Some(choreographer) = choreographer.upgrade() else {
		return;
	};
	let pins = collect_pins(window, selector);
	choreographer.borrow_mut().settle(&pins, max_scroll(window));
}

struct ScrollRuntime {
	choreographer: Shared,
	_fallback: TimeoutGuard,
	_listeners: Vec<ListenerGuard>,
}

impl Drop for ScrollRuntime {
	fn drop(&mut self) {
		bridge::set_on_stabilized(None);
		self.choreographer.borrow_mut().teardown();
	}
}

fn start(config: ScrollConfig) -> Result<ScrollRuntime, SetupError> {
	let window = runtime::window()?;
	let choreographer: Shared = Rc::new(RefCell::new(ScrollChoreographer::new(
		GlobalSnapDriver,
		config.tolerance,
		config.snap.clone(),
	)));
	let selector: Rc<str> = config.pin_selector.into();

	let hook: Rc<dyn Fn()> = {
		let (weak, win, selector) = (Rc::downgrade(&choreographer), window.clone(), selector.clone());
		Rc::new(move || settle(&weak, &win, &selector))
	};

	let fallback = {
		let hook = hook.clone();
		TimeoutGuard::once(&window, config.settle_delay_ms, move || hook())?
	};

	let mut listeners = Vec::new();
	if config.rescan_on_resize {
		let (weak, win) = (Rc::downgrade(&choreographer), window.clone());
		listeners.push(ListenerGuard::attach(&window, "resize", move |_| {
			if let Some(choreographer) = weak.upgrade() {
				let pins = collect_pins(&win, &selector);
				choreographer.borrow_mut().rescan(&pins, max_scroll(&win));
			}
		})?);
	}

	bridge::set_on_stabilized(Some(hook));
	Ok(ScrollRuntime {
		choreographer,
		_fallback: fallback,
		_listeners: listeners,
	})
}

/// Snaps the page to pinned sections once layout has settled.
///
/// Settling happens on the first `layout_stabilized` notification from the
/// page, or after `settle_delay_ms` if none arrives. Renders nothing.
#[component]
pub fn ScrollChoreography(config: ScrollConfig) -> impl IntoView {
	let slot = scoped_slot();

	Effect::new(move |_| {
		if !config.enabled {
			return;
		}
		slot.borrow_mut().take();
		match start(config.clone()) {
			Ok(rt) => *slot.borrow_mut() = Some(rt),
			Err(e) => warn!("scroll: snapping disabled: {e}"),
		}
	});
}
