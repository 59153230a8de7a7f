//! portfolio-particles: mouse-reactive particle background for a portfolio site.
//!
//! This crate provides a WASM canvas component that fills the viewport with
//! drifting particles, pushes them away from the pointer and joins close pairs
//! with faint lines, following the page's light/dark theme.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Only needed for its `js` entropy backend on wasm32.
use getrandom as _;

pub mod components;

pub use components::particle_field::{
	FieldConfig, FieldState, ParticleBackground, ParticleField, ThemeSource,
};

/// Element id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "particle-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-particles: logging initialized");
}

/// Parse a [`FieldConfig`] from JSON, falling back to defaults on error.
pub fn parse_field_config(json_text: &str) -> FieldConfig {
	match serde_json::from_str::<FieldConfig>(json_text) {
		Ok(config) => config,
		Err(e) => {
			warn!("portfolio-particles: ignoring bad particle config: {}", e);
			FieldConfig::default()
		}
	}
}

/// Load the field configuration from a script element with id="particle-config".
/// Missing element means defaults.
pub fn load_field_config() -> FieldConfig {
	let text = (|| {
		let window: Window = web_sys::window()?;
		let document = window.document()?;
		let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
		let script: HtmlScriptElement = element.dyn_into().ok()?;
		script.text().ok()
	})();

	match text {
		Some(json_text) => {
			let config = parse_field_config(&json_text);
			info!(
				"portfolio-particles: loaded config (breakpoint {}px)",
				config.mobile_breakpoint
			);
			config
		}
		None => FieldConfig::default(),
	}
}

/// Main application component.
/// Reads the page's particle config and mounts the background canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();

	view! {
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<ParticleBackground config=config />
	}
}
