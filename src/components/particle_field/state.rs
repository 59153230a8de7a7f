//! Particle field simulation state.
//!
//! Owns the particle collection, surface size, pointer and scroll tracking.
//! Nothing in here touches the DOM: the browser layer feeds it events and
//! hands it a [`Surface`] and a [`ThemeSource`] once per animation frame.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{DeviceClass, DeviceProfile, FieldConfig};
use super::particle::{Bounds, Particle, Point};
use super::render::{self, Surface};
use super::scroll::ScrollDebounce;
use super::theme::{Palette, ThemeSource};

/// Where the animation loop is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
	/// Built, no frame run yet.
	Initializing,
	/// Last frame simulated and drew.
	Running,
	/// Last frame was skipped because a mobile page is scrolling.
	FrameSkipped,
	/// Terminal. Only reached through [`FieldState::dispose`].
	Disposed,
}

/// Result of one [`FieldState::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
	/// Simulated and drew; schedule the next frame.
	Rendered,
	/// Frozen in place while scrolling; schedule the next frame anyway.
	Skipped,
	/// Disposed; do not schedule again.
	Disposed,
}

impl FrameOutcome {
	/// Whether the loop should request another frame.
	pub fn reschedule(self) -> bool {
		!matches!(self, FrameOutcome::Disposed)
	}
}

/// Core field state, created once when the canvas attaches and mutated each
/// frame by the animation loop.
pub struct FieldState<R = SmallRng> {
	/// Live particles, respawned on every (re)initialization.
	pub particles: Vec<Particle>,
	/// Debounced scroll flag; freezes mobile frames while raised.
	pub scroll: ScrollDebounce,
	config: FieldConfig,
	palette: Palette,
	width: u32,
	height: u32,
	device: DeviceClass,
	pointer: Option<Point>,
	lifecycle: Lifecycle,
	rng: R,
}

impl FieldState<SmallRng> {
	/// Field seeded from the platform entropy source.
	pub fn from_entropy(config: FieldConfig, width: u32, height: u32) -> Self {
		Self::new(config, width, height, SmallRng::from_entropy())
	}
}

impl<R: Rng> FieldState<R> {
	/// Field for a `width` x `height` surface, spawned from `rng`.
	pub fn new(config: FieldConfig, width: u32, height: u32, rng: R) -> Self {
		let palette = Palette::from_config(&config);
		let device = config.device_class(width as f64);
		let mut state = Self {
			particles: Vec::new(),
			scroll: ScrollDebounce::default(),
			config,
			palette,
			width,
			height,
			device,
			pointer: None,
			lifecycle: Lifecycle::Initializing,
			rng,
		};
		state.initialize();
		state
	}

	/// Reclassify the device from the current width and respawn every particle.
	pub fn initialize(&mut self) {
		self.device = self.config.device_class(self.width as f64);
		let profile = self.config.profile(self.device);
		let bounds = self.bounds();

		self.particles = (0..profile.count)
			.map(|_| Particle::create(bounds, profile, &mut self.rng))
			.collect();

		debug!(
			"particle field: {} particles for {:?} at {}x{}",
			self.particles.len(),
			self.device,
			self.width,
			self.height
		);
	}

	/// Match a new viewport. Old particles are discarded, not rescaled.
	pub fn resize(&mut self, width: u32, height: u32) {
		if self.lifecycle == Lifecycle::Disposed {
			return;
		}
		self.width = width;
		self.height = height;
		self.initialize();
	}

	/// Surface width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Surface height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Surface extent as particle bounds.
	pub fn bounds(&self) -> Bounds {
		Bounds {
			width: self.width as f64,
			height: self.height as f64,
		}
	}

	/// Class fixed at the last (re)initialization.
	pub fn device_class(&self) -> DeviceClass {
		self.device
	}

	/// Constants for the current device class.
	pub fn profile(&self) -> &DeviceProfile {
		self.config.profile(self.device)
	}

	/// Configuration this field was built from.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Where the loop is in its life.
	pub fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}

	/// Last known pointer, if any.
	pub fn pointer(&self) -> Option<Point> {
		self.pointer
	}

	/// Record the pointer in surface coordinates, or clear it with `None`.
	pub fn set_pointer(&mut self, pointer: Option<Point>) {
		if self.lifecycle != Lifecycle::Disposed {
			self.pointer = pointer;
		}
	}

	/// Wipe the surface, e.g. right after the theme flips.
	pub fn clear<S: Surface + ?Sized>(&self, surface: &S) {
		surface.clear(self.width as f64, self.height as f64);
	}

	/// Run one animation frame.
	pub fn tick<S, T>(&mut self, surface: &S, theme: &T) -> FrameOutcome
	where
		S: Surface + ?Sized,
		T: ThemeSource + ?Sized,
	{
		match self.lifecycle {
			Lifecycle::Disposed => return FrameOutcome::Disposed,
			_ if self.device.is_mobile() && self.scroll.is_scrolling() => {
				self.lifecycle = Lifecycle::FrameSkipped;
				return FrameOutcome::Skipped;
			}
			_ => self.lifecycle = Lifecycle::Running,
		}

		let bounds = self.bounds();
		let profile = self.config.profile(self.device);
		let physics = &self.config.physics;
		let color = self.palette.color(theme.mode());

		surface.clear(bounds.width, bounds.height);
		render::draw_connections(surface, &self.particles, profile, color);

		let solid = color.to_string();
		for p in &mut self.particles {
			p.update(self.pointer, bounds, profile, physics, &mut self.rng);
			if self.config.use_particle_opacity {
				p.draw(surface, &color.faded(p.opacity).to_string());
			} else {
				p.draw(surface, &solid);
			}
		}

		FrameOutcome::Rendered
	}

	/// Stop the simulation for good. Safe to call more than once.
	pub fn dispose(&mut self) {
		if self.lifecycle == Lifecycle::Disposed {
			return;
		}
		self.lifecycle = Lifecycle::Disposed;
		self.pointer = None;
		self.scroll.reset();
		info!("particle field: disposed");
	}
}
