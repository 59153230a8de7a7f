//! Browser tests for attaching and disposing the particle field.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]
// Test target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use gloo_timers::future::TimeoutFuture;
use portfolio_particles::components::particle_field::theme::LIGHT_THEME_CLASS;
use portfolio_particles::components::particle_field::{FieldConfig, Lifecycle, ParticleField};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) -> HtmlCanvasElement {
	let document = web_sys::window().unwrap().document().unwrap();
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")
		.unwrap()
		.dyn_into()
		.unwrap();
	canvas.set_id(id);
	document.body().unwrap().append_child(&canvas).unwrap();
	canvas
}

fn fire(target: &web_sys::EventTarget, event: &str) {
	let event = Event::new(event).unwrap();
	target.dispatch_event(&event).unwrap();
}

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn attach_sizes_canvas_to_viewport() {
	let canvas = mount_canvas("attach-test");
	let field = ParticleField::attach(canvas.clone(), FieldConfig::default()).unwrap();

	let window = web_sys::window().unwrap();
	let width = window.inner_width().unwrap().as_f64().unwrap() as u32;
	assert_eq!(canvas.width(), width);
	assert!(field.particle_count() == 40 || field.particle_count() == 80);
	assert_ne!(field.lifecycle(), Lifecycle::Disposed);
	assert!(field.listener_count() >= 4);
}

#[wasm_bindgen_test]
fn dispose_releases_every_listener() {
	mount_canvas("dispose-test");
	let mut field = ParticleField::attach_by_id("dispose-test", FieldConfig::default()).unwrap();

	field.dispose();
	assert_eq!(field.lifecycle(), Lifecycle::Disposed);
	assert_eq!(field.listener_count(), 0);

	field.dispose();
	assert_eq!(field.lifecycle(), Lifecycle::Disposed);
}

#[wasm_bindgen_test]
fn missing_canvas_does_not_activate() {
	assert!(ParticleField::attach_by_id("no-such-canvas", FieldConfig::default()).is_err());
}

#[wasm_bindgen_test]
fn disposed_field_ignores_resize() {
	let canvas = mount_canvas("dispose-resize-test");
	let mut field = ParticleField::attach(canvas.clone(), FieldConfig::default()).unwrap();

	field.dispose();
	canvas.set_width(1);
	fire(&web_sys::window().unwrap(), "resize");

	assert_eq!(canvas.width(), 1);
}

#[wasm_bindgen_test]
async fn scroll_flag_clears_after_quiet_period() {
	let canvas = mount_canvas("scroll-test");
	let field = ParticleField::attach(canvas, FieldConfig::default()).unwrap();
	let document = document();
	assert!(!field.is_scrolling());

	fire(&document, "scroll");
	assert!(field.is_scrolling());

	TimeoutFuture::new(100).await;
	fire(&document, "scroll");
	assert!(field.is_scrolling());

	// The first scroll's timer would have fired by now.
	TimeoutFuture::new(100).await;
	assert!(field.is_scrolling());

	TimeoutFuture::new(200).await;
	assert!(!field.is_scrolling());
}

#[wasm_bindgen_test]
async fn theme_flip_clears_canvas_until_disposed() {
	let canvas = mount_canvas("theme-test");
	let mut field = ParticleField::attach(canvas, FieldConfig::default()).unwrap();
	let body = document().body().unwrap();
	assert_eq!(field.theme_clear_count(), 0);

	body.class_list().add_1(LIGHT_THEME_CLASS).unwrap();
	TimeoutFuture::new(0).await;
	let after_light = field.theme_clear_count();
	assert!(after_light >= 1);

	body.class_list().remove_1(LIGHT_THEME_CLASS).unwrap();
	TimeoutFuture::new(0).await;
	assert!(field.theme_clear_count() > after_light);

	field.dispose();
	let after_dispose = field.theme_clear_count();
	body.class_list().add_1(LIGHT_THEME_CLASS).unwrap();
	TimeoutFuture::new(0).await;
	body.class_list().remove_1(LIGHT_THEME_CLASS).unwrap();
	TimeoutFuture::new(0).await;
	assert_eq!(field.theme_clear_count(), after_dispose);
}
