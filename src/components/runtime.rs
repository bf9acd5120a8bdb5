//! Browser resources scoped to Rust lifetimes.
//!
//! Each guard acquires one thing (a listener, a pending animation frame, a
//! timer) and releases it on `Drop`. A component keeps its guards in one
//! struct, so teardown and every early `?` during setup release exactly what
//! was acquired.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glam::DVec2;
use leptos::prelude::on_cleanup;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, MouseEvent, Window};

use crate::error::SetupError;

/// A DOM event listener that is removed when dropped.
pub struct ListenerGuard {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl ListenerGuard {
	pub fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, SetupError>
	where
		F: FnMut(Event) + 'static,
	{
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for ListenerGuard {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

struct LoopState {
	window: Window,
	handle: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
	fn arm(&self) -> Result<(), SetupError> {
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return Ok(());
		};
		let id = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
		self.handle.set(Some(id));
		Ok(())
	}
}

/// Self-sustaining `requestAnimationFrame` chain.
///
/// The next frame is requested before `frame` runs, so a callback that decides
/// to skip its tick still keeps the chain alive. Dropping the loop cancels the
/// pending frame.
pub struct AnimationLoop {
	state: Rc<LoopState>,
}

impl AnimationLoop {
	pub fn start<F>(window: &Window, mut frame: F) -> Result<Self, SetupError>
	where
		F: FnMut(f64) + 'static,
	{
		let state = Rc::new(LoopState {
			window: window.clone(),
			handle: Cell::new(None),
			callback: RefCell::new(None),
		});
		let weak: Weak<LoopState> = Rc::downgrade(&state);
		let callback = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
			let Some(state) = weak.upgrade() else {
				return;
			};
			state.handle.set(None);
			if state.arm().is_err() {
				log::warn!("animation loop could not request the next frame");
			}
			frame(now);
		});
		*state.callback.borrow_mut() = Some(callback);
		state.arm()?;
		Ok(Self { state })
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		if let Some(id) = self.state.handle.take() {
			let _ = self.state.window.cancel_animation_frame(id);
		}
		self.state.callback.borrow_mut().take();
	}
}

/// A one-shot timer that is cleared if dropped before it fires.
pub struct TimeoutGuard {
	window: Window,
	handle: i32,
	_callback: Closure<dyn FnMut()>,
}

impl TimeoutGuard {
	pub fn once<F>(window: &Window, delay_ms: i32, f: F) -> Result<Self, SetupError>
	where
		F: FnOnce() + 'static,
	{
		let mut f = Some(f);
		let callback = Closure::<dyn FnMut()>::new(move || {
			if let Some(f) = f.take() {
				f();
			}
		});
		let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
			callback.as_ref().unchecked_ref(),
			delay_ms.max(0),
		)?;
		Ok(Self {
			window: window.clone(),
			handle,
			_callback: callback,
		})
	}
}

impl Drop for TimeoutGuard {
	fn drop(&mut self) {
		self.window.clear_timeout_with_handle(self.handle);
	}
}

/// Holder for whatever a component starts, emptied when the component's
/// reactive owner is cleaned up.
pub type ScopedSlot<T> = SendWrapper<Rc<RefCell<Option<T>>>>;

pub fn scoped_slot<T: 'static>() -> ScopedSlot<T> {
	let slot: ScopedSlot<T> = SendWrapper::new(Rc::new(RefCell::new(None)));
	let on_drop = slot.clone();
	on_cleanup(move || {
		on_drop.borrow_mut().take();
	});
	slot
}

pub fn window() -> Result<Window, SetupError> {
	web_sys::window().ok_or(SetupError::NoWindow)
}

/// Inner viewport size in CSS pixels; zero if the browser will not say.
pub fn viewport_size(window: &Window) -> (f64, f64) {
	let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(w, h)
}

pub fn document_hidden(window: &Window) -> bool {
	window.document().is_some_and(|d| d.hidden())
}

/// Last known pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	pub pos: DVec2,
	/// False until the first move, and again after the pointer leaves.
	pub active: bool,
}

impl PointerState {
	pub fn position(&self) -> Option<DVec2> {
		self.active.then_some(self.pos)
	}
}

struct PointerInner {
	state: Rc<Cell<PointerState>>,
	_listeners: Vec<ListenerGuard>,
}

/// Shared pointer position, written only by its own listeners and read by
/// every engine on its next frame.
///
/// Clones share one set of listeners, which are removed when the last clone
/// drops.
#[derive(Clone)]
pub struct PointerTracker {
	inner: SendWrapper<Rc<PointerInner>>,
}

impl PointerTracker {
	pub fn attach(window: &Window) -> Result<Self, SetupError> {
		let document = window.document().ok_or(SetupError::NoDocument)?;
		let state = Rc::new(Cell::new(PointerState::default()));

		let on_move = {
			let state = state.clone();
			move |ev: Event| {
				if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
					state.set(PointerState {
						pos: DVec2::new(ev.client_x() as f64, ev.client_y() as f64),
						active: true,
					});
				}
			}
		};
		let on_leave = {
			let state = state.clone();
			move |_: Event| {
				let mut s = state.get();
				s.active = false;
				state.set(s);
			}
		};

		let mut listeners = vec![ListenerGuard::attach(window, "mousemove", on_move)?];
		if let Some(root) = document.document_element() {
			listeners.push(ListenerGuard::attach(&root, "mouseleave", on_leave)?);
		}

		Ok(Self {
			inner: SendWrapper::new(Rc::new(PointerInner {
				state,
				_listeners: listeners,
			})),
		})
	}

	pub fn get(&self) -> PointerState {
		self.inner.state.get()
	}
}
