//! Leptos component wrapping the particle background canvas.
//!
//! The component renders a fixed, full-viewport canvas behind the page and
//! attaches a [`ParticleField`] to it once mounted. The field is disposed when
//! the component's owner is cleaned up.

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlCanvasElement;

use super::config::FieldConfig;
use super::field::ParticleField;

/// Element id the canvas carries, matching the site's stylesheet.
pub const CANVAS_ID: &str = "particles-background";

/// Renders the mouse-reactive particle background.
///
/// Pass a [`FieldConfig`] to override colors, counts or physics; the default
/// matches the portfolio site. If the browser cannot provide a 2D context the
/// canvas stays blank and a warning is logged.
#[component]
pub fn ParticleBackground(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let field = StoredValue::new_local(None::<ParticleField>);
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		match ParticleField::attach(canvas, config.clone()) {
			Ok(attached) => field.set_value(Some(attached)),
			Err(e) => warn!("particle field: not starting: {:?}", e),
		}
	});

	on_cleanup(move || {
		field.update_value(|slot| {
			if let Some(mut attached) = slot.take() {
				attached.dispose();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id=CANVAS_ID
			class="particles-background"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none; display: block;"
		/>
	}
}
