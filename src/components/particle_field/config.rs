//! Tunable parameters for the particle field.
//!
//! Everything that depends on the device class lives in [`DeviceProfile`];
//! constants shared by both classes live in [`Physics`]. The whole tree
//! deserializes from JSON with every field optional, so a page can override a
//! single value without restating the rest.
//!
//! ```json
//! { "mobile_breakpoint": 640, "desktop": { "count": 120 } }
//! ```

use serde::{Deserialize, Deserializer};

/// Viewport classification that gates particle count, speeds and radii.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
	/// Narrow viewports (at or below the breakpoint).
	Mobile,
	/// Everything wider than the breakpoint.
	Desktop,
}

impl DeviceClass {
	/// Classify a viewport width. Widths at the breakpoint count as mobile.
	pub fn from_viewport_width(width: f64, breakpoint: f64) -> Self {
		if width <= breakpoint {
			DeviceClass::Mobile
		} else {
			DeviceClass::Desktop
		}
	}

	/// Shorthand for `== DeviceClass::Mobile`.
	pub fn is_mobile(self) -> bool {
		self == DeviceClass::Mobile
	}
}

/// Per-device-class constants.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceProfile {
	/// Number of particles spawned on (re)initialization.
	pub count: usize,
	/// Lower bound of the base size range (inclusive).
	pub size_min: f64,
	/// Upper bound of the base size range (exclusive).
	pub size_max: f64,
	/// Initial velocity per axis is drawn from `[-0.5, 0.5) * speed_factor`.
	pub speed_factor: f64,
	/// Pointer distance below which particles are pushed away.
	pub interaction_radius: f64,
	/// Velocity impulse at maximal force.
	pub repulsion_strength: f64,
	/// Per-axis velocity bound.
	pub max_speed: f64,
	/// Pair distance below which a connecting line is drawn.
	pub connection_radius: f64,
	/// Line opacity for two coincident particles.
	pub connection_opacity: f64,
	/// Connecting line width in pixels.
	pub line_width: f64,
}

impl DeviceProfile {
	/// Defaults for narrow viewports: fewer, slower, smaller particles.
	pub fn mobile() -> Self {
		Self {
			count: 40,
			size_min: 0.5,
			size_max: 1.7,
			speed_factor: 0.5,
			interaction_radius: 100.0,
			repulsion_strength: 1.5,
			max_speed: 2.0,
			connection_radius: 50.0,
			connection_opacity: 0.1,
			line_width: 0.3,
		}
	}

	/// Defaults for wide viewports.
	pub fn desktop() -> Self {
		Self {
			count: 80,
			size_min: 1.0,
			size_max: 3.0,
			speed_factor: 1.0,
			interaction_radius: 200.0,
			repulsion_strength: 2.0,
			max_speed: 4.0,
			connection_radius: 100.0,
			connection_opacity: 0.2,
			line_width: 0.5,
		}
	}
}

/// JSON shape of a profile: any field left out keeps the class default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileOverride {
	count: Option<usize>,
	size_min: Option<f64>,
	size_max: Option<f64>,
	speed_factor: Option<f64>,
	interaction_radius: Option<f64>,
	repulsion_strength: Option<f64>,
	max_speed: Option<f64>,
	connection_radius: Option<f64>,
	connection_opacity: Option<f64>,
	line_width: Option<f64>,
}

impl ProfileOverride {
	fn apply(self, base: DeviceProfile) -> DeviceProfile {
		DeviceProfile {
			count: self.count.unwrap_or(base.count),
			size_min: self.size_min.unwrap_or(base.size_min),
			size_max: self.size_max.unwrap_or(base.size_max),
			speed_factor: self.speed_factor.unwrap_or(base.speed_factor),
			interaction_radius: self.interaction_radius.unwrap_or(base.interaction_radius),
			repulsion_strength: self.repulsion_strength.unwrap_or(base.repulsion_strength),
			max_speed: self.max_speed.unwrap_or(base.max_speed),
			connection_radius: self.connection_radius.unwrap_or(base.connection_radius),
			connection_opacity: self.connection_opacity.unwrap_or(base.connection_opacity),
			line_width: self.line_width.unwrap_or(base.line_width),
		}
	}
}

fn mobile_profile<'de, D: Deserializer<'de>>(d: D) -> Result<DeviceProfile, D::Error> {
	ProfileOverride::deserialize(d).map(|o| o.apply(DeviceProfile::mobile()))
}

fn desktop_profile<'de, D: Deserializer<'de>>(d: D) -> Result<DeviceProfile, D::Error> {
	ProfileOverride::deserialize(d).map(|o| o.apply(DeviceProfile::desktop()))
}

/// Constants shared by every device class.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Physics {
	/// Velocity multiplier applied once per tick after clamping.
	pub friction: f64,
	/// Half-width of the uniform per-axis velocity jitter.
	pub jitter: f64,
	/// Size gain at maximal pointer force (`size = base * (1 + force * growth)`).
	pub growth: f64,
}

impl Default for Physics {
	fn default() -> Self {
		Self {
			friction: 0.95,
			jitter: 0.05,
			growth: 0.5,
		}
	}
}

/// Complete field configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Viewport widths at or below this are treated as mobile.
	pub mobile_breakpoint: f64,
	/// Particle and line color while the light theme is active.
	pub light_color: String,
	/// Particle and line color while the dark theme is active.
	pub dark_color: String,
	/// Quiet period after the last scroll event before simulation resumes.
	pub scroll_debounce_ms: u32,
	/// Multiply each particle's fill by its own opacity.
	///
	/// Off by default: the stored opacity has never modulated the fill.
	pub use_particle_opacity: bool,
	/// Device-independent motion constants.
	pub physics: Physics,
	#[serde(deserialize_with = "mobile_profile")]
	pub mobile: DeviceProfile,
	#[serde(deserialize_with = "desktop_profile")]
	pub desktop: DeviceProfile,
}

impl FieldConfig {
	/// Classify `viewport_width` against this config's breakpoint.
	pub fn device_class(&self, viewport_width: f64) -> DeviceClass {
		DeviceClass::from_viewport_width(viewport_width, self.mobile_breakpoint)
	}

	/// Constants for `class`.
	pub fn profile(&self, class: DeviceClass) -> &DeviceProfile {
		match class {
			DeviceClass::Mobile => &self.mobile,
			DeviceClass::Desktop => &self.desktop,
		}
	}
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			mobile_breakpoint: 768.0,
			light_color: "#9a5961".to_string(),
			dark_color: "#ad656d".to_string(),
			scroll_debounce_ms: 150,
			use_particle_opacity: false,
			physics: Physics::default(),
			mobile: DeviceProfile::mobile(),
			desktop: DeviceProfile::desktop(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn breakpoint_is_inclusive() {
		assert_eq!(
			DeviceClass::from_viewport_width(768.0, 768.0),
			DeviceClass::Mobile
		);
		assert_eq!(
			DeviceClass::from_viewport_width(769.0, 768.0),
			DeviceClass::Desktop
		);
	}

	#[test]
	fn same_width_same_profile() {
		let config = FieldConfig::default();
		for width in [320.0, 768.0, 1200.0, 2560.0] {
			let a = config.profile(config.device_class(width)).clone();
			let b = config.profile(config.device_class(width)).clone();
			assert_eq!(a, b);
		}
	}

	#[test]
	fn empty_json_gives_defaults() {
		let config: FieldConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, FieldConfig::default());
	}

	#[test]
	fn partial_json_overrides_only_named_fields() {
		let config: FieldConfig = serde_json::from_str(
			r#"{ "mobile_breakpoint": 640, "desktop": { "count": 120 }, "physics": { "jitter": 0.0 } }"#,
		)
		.unwrap();

		assert_eq!(config.mobile_breakpoint, 640.0);
		assert_eq!(config.desktop.count, 120);
		assert_eq!(config.desktop.max_speed, 4.0);
		assert_eq!(config.physics.jitter, 0.0);
		assert_eq!(config.physics.friction, 0.95);
		assert_eq!(config.mobile, DeviceProfile::mobile());
	}

	#[test]
	fn mobile_override_keeps_mobile_defaults() {
		let config: FieldConfig =
			serde_json::from_str(r#"{ "mobile": { "count": 10 } }"#).unwrap();

		assert_eq!(config.mobile.count, 10);
		assert_eq!(config.mobile.max_speed, 2.0);
		assert_eq!(config.mobile.interaction_radius, 100.0);
	}
}
