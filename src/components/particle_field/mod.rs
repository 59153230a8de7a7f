//! Mouse-reactive particle background.
//!
//! Renders drifting particles on a full-viewport canvas with:
//! - Repulsion from the mouse (and touch on narrow viewports)
//! - Faint lines between particles that drift close together
//! - Light/dark colors read from the site's theme class
//! - A frozen frame while a mobile page is scrolling
//!
//! The simulation ([`FieldState`]) is plain Rust and draws through the
//! [`Surface`] trait; [`ParticleField`] is the browser binding.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_particles::{FieldConfig, ParticleBackground};
//!
//! view! { <ParticleBackground config=FieldConfig::default() /> }
//! ```

mod component;
pub mod config;
mod field;
mod particle;
mod render;
mod scroll;
mod state;
pub mod theme;

pub use component::{CANVAS_ID, ParticleBackground};
pub use config::{DeviceClass, DeviceProfile, FieldConfig, Physics};
pub use field::ParticleField;
pub use particle::{Bounds, Particle, Point, repulsion_force};
pub use render::{Surface, connection_opacity, draw_connections};
pub use scroll::ScrollDebounce;
pub use state::{FieldState, FrameOutcome, Lifecycle};
pub use theme::{BodyClassTheme, Color, Palette, ThemeMode, ThemeSource};
