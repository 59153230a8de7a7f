//! Browser wiring for the particle field.
//!
//! [`ParticleField`] binds a [`FieldState`] to a canvas: it sizes the canvas
//! to the viewport, subscribes to pointer, touch, scroll and resize events,
//! watches the body class for theme flips and drives the state from a
//! `requestAnimationFrame` loop. [`ParticleField::dispose`] undoes all of it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, CanvasRenderingContext2d, Document, Event, EventTarget,
	HtmlCanvasElement, MouseEvent, MutationObserver, MutationObserverInit, TouchEvent, Window,
};

use super::config::FieldConfig;
use super::particle::Point;
use super::state::{FieldState, Lifecycle};
use super::theme::BodyClassTheme;

type Shared<T> = Rc<RefCell<T>>;

/// A DOM event subscription that can be undone.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn attach(
		target: &EventTarget,
		event: &'static str,
		passive: bool,
		callback: impl FnMut(Event) + 'static,
	) -> Result<Self, JsValue> {
		let callback = Closure::<dyn FnMut(Event)>::new(callback);
		if passive {
			let options = AddEventListenerOptions::new();
			options.set_passive(true);
			target.add_event_listener_with_callback_and_add_event_listener_options(
				event,
				callback.as_ref().unchecked_ref(),
				&options,
			)?;
		} else {
			target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		}
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}

	fn detach(&self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Theme class watcher; clears the canvas whenever `body.class` changes.
struct ThemeObserver {
	observer: MutationObserver,
	_callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

/// A running particle background bound to one canvas.
pub struct ParticleField {
	window: Window,
	state: Shared<FieldState>,
	frame: Rc<Cell<Option<i32>>>,
	animate: Shared<Option<Closure<dyn FnMut()>>>,
	listeners: Vec<Listener>,
	theme_observer: Option<ThemeObserver>,
	theme_clears: Rc<Cell<u32>>,
	scroll_timer: Shared<Option<Timeout>>,
}

fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
	let width = window
		.inner_width()?
		.as_f64()
		.ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
	let height = window
		.inner_height()?
		.as_f64()
		.ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
	Ok((width as u32, height as u32))
}

/// Canvas-relative position of a mouse or first touch point.
fn pointer_position(canvas: &HtmlCanvasElement, event: &Event) -> Option<Point> {
	let (client_x, client_y) = if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
		(mouse.client_x(), mouse.client_y())
	} else {
		let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
		(touch.client_x(), touch.client_y())
	};
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		client_x as f64 - rect.left(),
		client_y as f64 - rect.top(),
	))
}

impl ParticleField {
	/// Look up a canvas by element id and attach to it.
	pub fn attach_by_id(canvas_id: &str, config: FieldConfig) -> Result<Self, JsValue> {
		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or_else(|| JsValue::from_str("no document"))?;
		let canvas: HtmlCanvasElement = document
			.get_element_by_id(canvas_id)
			.ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
			.dyn_into()
			.map_err(JsValue::from)?;
		Self::attach(canvas, config)
	}

	/// Size `canvas` to the viewport and start animating.
	///
	/// Fails if there is no window/document or the canvas has no 2D context;
	/// nothing is left subscribed in that case.
	pub fn attach(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let document: Document = window
			.document()
			.ok_or_else(|| JsValue::from_str("no document"))?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
			.dyn_into()
			.map_err(JsValue::from)?;

		let (w, h) = viewport_size(&window)?;
		canvas.set_width(w);
		canvas.set_height(h);

		let debounce_ms = config.scroll_debounce_ms;
		let state = Rc::new(RefCell::new(FieldState::from_entropy(config, w, h)));
		let mobile = state.borrow().device_class().is_mobile();

		let mut field = Self {
			window: window.clone(),
			state: state.clone(),
			frame: Rc::new(Cell::new(None)),
			animate: Rc::new(RefCell::new(None)),
			listeners: Vec::new(),
			theme_observer: None,
			theme_clears: Rc::new(Cell::new(0)),
			scroll_timer: Rc::new(RefCell::new(None)),
		};

		// Dropping `field` on an early return runs dispose, so a partial
		// attach never leaves listeners behind.
		field.subscribe(&window, &document, &canvas, mobile, debounce_ms)?;
		field.theme_observer = Some(Self::observe_theme(
			&document,
			&state,
			&ctx,
			field.theme_clears.clone(),
		)?);
		field.start_loop(ctx);

		info!(
			"particle field: attached {}x{} ({:?}, {} particles)",
			w,
			h,
			state.borrow().device_class(),
			state.borrow().particles.len()
		);
		Ok(field)
	}

	fn subscribe(
		&mut self,
		window: &Window,
		document: &Document,
		canvas: &HtmlCanvasElement,
		mobile: bool,
		debounce_ms: u32,
	) -> Result<(), JsValue> {
		let (state, canvas_resize) = (self.state.clone(), canvas.clone());
		self.listeners.push(Listener::attach(window, "resize", false, move |_| {
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Ok((nw, nh)) = viewport_size(&win) {
				canvas_resize.set_width(nw);
				canvas_resize.set_height(nh);
				state.borrow_mut().resize(nw, nh);
				info!("particle field: resized to {}x{}", nw, nh);
			}
		})?);

		let (state, canvas_move) = (self.state.clone(), canvas.clone());
		self.listeners.push(Listener::attach(document, "mousemove", false, move |ev| {
			if let Some(p) = pointer_position(&canvas_move, &ev) {
				state.borrow_mut().set_pointer(Some(p));
			}
		})?);

		let state = self.state.clone();
		self.listeners.push(Listener::attach(document, "mouseleave", false, move |_| {
			state.borrow_mut().set_pointer(None);
		})?);

		if mobile {
			for event in ["touchstart", "touchmove"] {
				let (state, canvas_touch) = (self.state.clone(), canvas.clone());
				self.listeners.push(Listener::attach(document, event, true, move |ev| {
					if let Some(p) = pointer_position(&canvas_touch, &ev) {
						state.borrow_mut().set_pointer(Some(p));
					}
				})?);
			}

			let state = self.state.clone();
			self.listeners.push(Listener::attach(document, "touchend", false, move |_| {
				state.borrow_mut().set_pointer(None);
			})?);
		}

		let (state, timer) = (self.state.clone(), self.scroll_timer.clone());
		self.listeners.push(Listener::attach(document, "scroll", false, move |_| {
			let generation = state.borrow_mut().scroll.on_scroll();
			let state_timeout = state.clone();
			// Replacing the previous timeout drops and thereby cancels it.
			*timer.borrow_mut() = Some(Timeout::new(debounce_ms, move || {
				state_timeout.borrow_mut().scroll.expire(generation);
			}));
		})?);

		Ok(())
	}

	fn observe_theme(
		document: &Document,
		state: &Shared<FieldState>,
		ctx: &CanvasRenderingContext2d,
		clears: Rc<Cell<u32>>,
	) -> Result<ThemeObserver, JsValue> {
		let body = document
			.body()
			.ok_or_else(|| JsValue::from_str("no body"))?;

		let (state, ctx) = (state.clone(), ctx.clone());
		let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
			move |_: js_sys::Array, _: MutationObserver| {
				state.borrow().clear(&ctx);
				clears.set(clears.get().wrapping_add(1));
			},
		);
		let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;

		let init = MutationObserverInit::new();
		init.set_attributes(true);
		init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("class")));
		observer.observe_with_options(&body, &init)?;

		Ok(ThemeObserver {
			observer,
			_callback: callback,
		})
	}

	fn start_loop(&mut self, ctx: CanvasRenderingContext2d) {
		let (state, frame, animate_inner) =
			(self.state.clone(), self.frame.clone(), self.animate.clone());

		*self.animate.borrow_mut() = Some(Closure::new(move || {
			frame.set(None);
			let outcome = state.borrow_mut().tick(&ctx, &BodyClassTheme);
			if !outcome.reschedule() {
				return;
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				frame.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));

		if let Some(ref cb) = *self.animate.borrow() {
			self.frame.set(
				self.window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}
	}

	/// Current loop state of the underlying simulation.
	pub fn lifecycle(&self) -> Lifecycle {
		self.state.borrow().lifecycle()
	}

	/// Whether a scroll happened within the debounce window.
	pub fn is_scrolling(&self) -> bool {
		self.state.borrow().scroll.is_scrolling()
	}

	/// How many times a body class change has wiped the canvas.
	pub fn theme_clear_count(&self) -> u32 {
		self.theme_clears.get()
	}

	/// Particles in the current collection.
	pub fn particle_count(&self) -> usize {
		self.state.borrow().particles.len()
	}

	/// Number of live DOM event subscriptions.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	/// Stop animating and release every subscription.
	///
	/// Cancels the pending frame, removes all event listeners, disconnects the
	/// theme observer and cancels a pending scroll timer. Idempotent.
	pub fn dispose(&mut self) {
		if let Some(id) = self.frame.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// Breaks the closure's reference to itself.
		self.animate.borrow_mut().take();

		for listener in self.listeners.drain(..) {
			listener.detach();
		}
		if let Some(theme) = self.theme_observer.take() {
			theme.observer.disconnect();
		}
		self.scroll_timer.borrow_mut().take();

		self.state.borrow_mut().dispose();
	}
}

impl Drop for ParticleField {
	fn drop(&mut self) {
		self.dispose();
	}
}
