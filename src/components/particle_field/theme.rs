//! Theme-dependent colors for the particle field.
//!
//! The field never owns theme state. It asks a [`ThemeSource`] once per frame
//! whether the light theme is active and picks one of two fixed colors.

use std::fmt;

use super::config::FieldConfig;

/// Class toggled on `document.body` by the site's theme switcher.
pub const LIGHT_THEME_CLASS: &str = "light-theme";

/// An sRGB color with straight alpha.
///
/// `Display` writes the shortest CSS form a canvas fill or stroke accepts:
/// `#rrggbb` when opaque, `rgba(..)` otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Substituted for any color string that fails to parse.
	pub const FALLBACK: Color = Color::opaque(128, 128, 128);

	/// Fully opaque color from its channels.
	pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with its alpha scaled by `factor`.
	pub fn faded(self, factor: f64) -> Self {
		Self {
			a: self.a * factor,
			..self
		}
	}

	fn is_opaque(&self) -> bool {
		self.a >= 0.999
	}

	/// Parses `#RRGGBB`, `#RGB`, `rgb(..)` or `rgba(..)`.
	/// Unparseable input yields [`Color::FALLBACK`].
	pub fn from_css(color_str: &str) -> Self {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#').filter(|h| h.is_ascii()) {
			let channel = |h: &str| u8::from_str_radix(h, 16).unwrap_or(128);
			match hex.len() {
				6 => Color::opaque(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
				3 => {
					let short = |h: &str| channel(h).saturating_mul(17);
					Color::opaque(short(&hex[0..1]), short(&hex[1..2]), short(&hex[2..3]))
				}
				_ => Color::FALLBACK,
			}
		} else if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let channel = |i: usize| {
				nums.get(i)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(128)
			};
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color {
				r: channel(0),
				g: channel(1),
				b: channel(2),
				a,
			}
		} else {
			Color::FALLBACK
		}
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Color { r, g, b, a } = *self;
		match self.is_opaque() {
			true => write!(f, "#{r:02x}{g:02x}{b:02x}"),
			false => write!(f, "rgba({r}, {g}, {b}, {a})"),
		}
	}
}

/// Which of the two site themes is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
	/// `light-theme` is set on the body.
	Light,
	/// Anything else; the site's default.
	Dark,
}

/// Read-only view of the site theme.
pub trait ThemeSource {
	/// Whether the light theme is active right now.
	fn is_light(&self) -> bool;

	/// [`ThemeSource::is_light`] as a [`ThemeMode`].
	fn mode(&self) -> ThemeMode {
		if self.is_light() {
			ThemeMode::Light
		} else {
			ThemeMode::Dark
		}
	}
}

impl ThemeSource for ThemeMode {
	fn is_light(&self) -> bool {
		*self == ThemeMode::Light
	}
}

impl<F: Fn() -> bool> ThemeSource for F {
	fn is_light(&self) -> bool {
		self()
	}
}

/// Reads the theme from the `light-theme` class on `document.body`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyClassTheme;

impl ThemeSource for BodyClassTheme {
	fn is_light(&self) -> bool {
		web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.body())
			.is_some_and(|body| body.class_list().contains(LIGHT_THEME_CLASS))
	}
}

/// The two fixed field colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	/// Used under the light theme.
	pub light: Color,
	/// Used under the dark theme.
	pub dark: Color,
}

impl Palette {
	/// Parse both configured color strings.
	pub fn from_config(config: &FieldConfig) -> Self {
		Self {
			light: Color::from_css(&config.light_color),
			dark: Color::from_css(&config.dark_color),
		}
	}

	/// Color for `mode`.
	pub fn color(&self, mode: ThemeMode) -> Color {
		match mode {
			ThemeMode::Light => self.light,
			ThemeMode::Dark => self.dark,
		}
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::from_config(&FieldConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_palette_matches_site_colors() {
		let palette = Palette::default();
		assert_eq!(palette.color(ThemeMode::Light).to_string(), "#9a5961");
		assert_eq!(palette.color(ThemeMode::Dark).to_string(), "#ad656d");
	}

	#[test]
	fn parses_css_forms() {
		assert_eq!(Color::from_css("#fff"), Color::opaque(255, 255, 255));
		assert_eq!(
			Color::from_css("rgba(10, 20, 30, 0.5)"),
			Color::opaque(10, 20, 30).faded(0.5)
		);
		assert_eq!(Color::from_css("teal"), Color::FALLBACK);
		assert_eq!(Color::from_css("#ab"), Color::FALLBACK);
	}

	#[test]
	fn fading_compounds_existing_alpha() {
		let c = Color::from_css("rgba(173, 101, 109, 0.5)").faded(0.5);
		assert_eq!(c.a, 0.25);
		assert_eq!(c.to_string(), "rgba(173, 101, 109, 0.25)");
		assert_eq!(Color::opaque(173, 101, 109).faded(1.0).to_string(), "#ad656d");
	}

	#[test]
	fn closures_act_as_theme_sources() {
		let light = || true;
		assert_eq!(light.mode(), ThemeMode::Light);
		assert!(!ThemeMode::Dark.is_light());
	}
}
