//! A single drifting particle and its per-tick physics.

use rand::Rng;

use super::config::{DeviceProfile, Physics};
use super::render::Surface;

/// A point in surface space (canvas pixels, origin top-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	/// Pixels from the left edge.
	pub x: f64,
	/// Pixels from the top edge.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Drawing surface extent. Particles bounce off its edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Surface width in pixels.
	pub width: f64,
	/// Surface height in pixels.
	pub height: f64,
}

/// Normalized push strength for a particle `distance` away from the pointer.
///
/// Returns `None` outside `radius`. Inside it the force grows linearly from
/// just above 0 at the rim to exactly 1 at the pointer itself.
pub fn repulsion_force(distance: f64, radius: f64) -> Option<f64> {
	(distance < radius).then(|| (radius - distance) / radius)
}

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity in pixels per tick.
	pub vx: f64,
	/// Vertical velocity in pixels per tick.
	pub vy: f64,
	/// Resting radius chosen at spawn.
	pub base_size: f64,
	/// Radius actually drawn; grows while the pointer is close.
	pub size: f64,
	/// Kept per particle, only drawn when `use_particle_opacity` is set.
	pub opacity: f64,
}

impl Particle {
	/// Spawn a particle at a uniformly random spot inside `bounds`.
	pub fn create<R: Rng + ?Sized>(bounds: Bounds, profile: &DeviceProfile, rng: &mut R) -> Self {
		let x = rng.r#gen::<f64>() * bounds.width;
		let y = rng.r#gen::<f64>() * bounds.height;
		let base_size =
			profile.size_min + rng.r#gen::<f64>() * (profile.size_max - profile.size_min);
		let vx = (rng.r#gen::<f64>() - 0.5) * profile.speed_factor;
		let vy = (rng.r#gen::<f64>() - 0.5) * profile.speed_factor;

		Self {
			x,
			y,
			vx,
			vy,
			base_size,
			size: base_size,
			opacity: 0.4 + rng.r#gen::<f64>() * 0.5,
		}
	}

	/// Current position as a [`Point`].
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// Advance one tick.
	///
	/// Order matters: repulsion, integration, edge reflection, jitter,
	/// clamping, then friction last so it always acts on the clamped speed.
	pub fn update<R: Rng + ?Sized>(
		&mut self,
		pointer: Option<Point>,
		bounds: Bounds,
		profile: &DeviceProfile,
		physics: &Physics,
		rng: &mut R,
	) {
		if let Some(pointer) = pointer {
			self.repel_from(pointer, profile, physics);
		}

		self.x += self.vx;
		self.y += self.vy;

		// Reflect only; the position may sit outside for one frame.
		if self.x < 0.0 || self.x > bounds.width {
			self.vx = -self.vx;
		}
		if self.y < 0.0 || self.y > bounds.height {
			self.vy = -self.vy;
		}

		self.vx += (rng.r#gen::<f64>() - 0.5) * 2.0 * physics.jitter;
		self.vy += (rng.r#gen::<f64>() - 0.5) * 2.0 * physics.jitter;

		self.vx = self.vx.clamp(-profile.max_speed, profile.max_speed);
		self.vy = self.vy.clamp(-profile.max_speed, profile.max_speed);

		self.vx *= physics.friction;
		self.vy *= physics.friction;
	}

	fn repel_from(&mut self, pointer: Point, profile: &DeviceProfile, physics: &Physics) {
		let (dx, dy) = (pointer.x - self.x, pointer.y - self.y);
		let distance = (dx * dx + dy * dy).sqrt();

		match repulsion_force(distance, profile.interaction_radius) {
			Some(force) => {
				// atan2(0, 0) is 0, so a pointer dead on the particle pushes along -x.
				let angle = dy.atan2(dx);
				self.vx -= angle.cos() * force * profile.repulsion_strength;
				self.vy -= angle.sin() * force * profile.repulsion_strength;
				self.size = self.base_size * (1.0 + force * physics.growth);
			}
			None => self.size = self.base_size,
		}
	}

	/// Fill the particle's circle at its current size.
	pub fn draw<S: Surface + ?Sized>(&self, surface: &S, fill: &str) {
		surface.fill_circle(self.x, self.y, self.size.max(0.0), fill);
	}
}
