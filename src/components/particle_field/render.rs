//! Drawing for the particle field.
//!
//! Rendering goes through the small [`Surface`] trait so the frame logic can
//! run against a recording surface in tests. Each rendered frame is:
//! 1. clear
//! 2. connection lines between close pairs
//! 3. particles, in collection order (drawn by the field as it updates them)

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::DeviceProfile;
use super::particle::Particle;
use super::theme::Color;

/// The handful of 2D drawing calls the field needs.
pub trait Surface {
	/// Erase the rectangle from the origin to `(width, height)`.
	fn clear(&self, width: f64, height: f64);
	/// Fill a full circle with a CSS color.
	fn fill_circle(&self, x: f64, y: f64, radius: f64, fill: &str);
	/// Stroke a straight segment with a CSS color.
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), width: f64, stroke: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, fill: &str) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(fill);
		self.fill();
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), width: f64, stroke: &str) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(stroke);
		self.set_line_width(width);
		self.stroke();
	}
}

/// Line opacity for a pair `distance` apart, or `None` if they are too far.
pub fn connection_opacity(distance: f64, profile: &DeviceProfile) -> Option<f64> {
	(distance < profile.connection_radius)
		.then(|| (1.0 - distance / profile.connection_radius) * profile.connection_opacity)
}

/// Draw one line per unordered pair closer than the connection radius.
///
/// Quadratic in the particle count (3160 pair checks at 80 particles). This is
/// the dominant per-frame cost; a grid bucketed by connection radius would cut
/// it to near neighbours if counts grow much past the defaults.
///
/// Returns the number of lines drawn.
pub fn draw_connections<S: Surface + ?Sized>(
	surface: &S,
	particles: &[Particle],
	profile: &DeviceProfile,
	color: Color,
) -> usize {
	let mut drawn = 0;

	for (i, p1) in particles.iter().enumerate() {
		for p2 in &particles[i + 1..] {
			let distance = p1.position().distance(p2.position());
			if let Some(opacity) = connection_opacity(distance, profile) {
				surface.stroke_line(
					(p1.x, p1.y),
					(p2.x, p2.y),
					profile.line_width,
					&color.faded(opacity).to_string(),
				);
				drawn += 1;
			}
		}
	}

	drawn
}

#[cfg(test)]
pub(crate) mod recording {
	//! In-memory [`Surface`] that logs every call.

	use std::cell::RefCell;

	use super::Surface;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Clear { width: f64, height: f64 },
		Circle { x: f64, y: f64, radius: f64, fill: String },
		Line { from: (f64, f64), to: (f64, f64), width: f64, stroke: String },
	}

	#[derive(Debug, Default)]
	pub struct RecordingSurface {
		pub ops: RefCell<Vec<Op>>,
	}

	impl RecordingSurface {
		pub fn take(&self) -> Vec<Op> {
			self.ops.take()
		}
	}

	impl Surface for RecordingSurface {
		fn clear(&self, width: f64, height: f64) {
			self.ops.borrow_mut().push(Op::Clear { width, height });
		}

		fn fill_circle(&self, x: f64, y: f64, radius: f64, fill: &str) {
			self.ops.borrow_mut().push(Op::Circle {
				x,
				y,
				radius,
				fill: fill.to_string(),
			});
		}

		fn stroke_line(&self, from: (f64, f64), to: (f64, f64), width: f64, stroke: &str) {
			self.ops.borrow_mut().push(Op::Line {
				from,
				to,
				width,
				stroke: stroke.to_string(),
			});
		}
	}
}
