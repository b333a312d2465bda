//! # driftmesh - animated particle mesh background
//!
//! A calm, slowly evolving network of drifting points, proximity links and
//! softly shaded triangles, meant to sit behind page content. The whole
//! animation runs on the CPU as a deterministic simulation; the GPU only
//! presents the finished frame.
//!
//! ## Quick Start
//!
//! ```no_run
//! use driftmesh::Background;
//!
//! fn main() {
//!     if let Err(e) = Background::new()
//!         .with_density(1.0)
//!         .with_accent_css("hsl(38 92% 50%)")
//!         .run()
//!     {
//!         eprintln!("background failed: {e}");
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Motion
//!
//! Each particle drifts slowly and oscillates around its base position as
//! the sum of three sinusoids with incommensurate periods (36 s, 54 s,
//! 81 s), so the field never visibly repeats. A slow "harmony" envelope
//! modulates the amplitude over minutes, and at random intervals a snap
//! pulse pulls every particle toward the nearest hexagonal lattice site
//! before releasing it again.
//!
//! ### Mesh
//!
//! Particles within the link distance are connected by faint lines, and
//! mutually-adjacent triples are filled as translucent triangles whose
//! opacity is smoothed over time so the mesh breathes instead of
//! flickering.
//!
//! ### Load governor
//!
//! Frame rate is sampled over one-second windows. Sustained low rates turn
//! off triangle shading and shed 10% of the particles; recovery restores
//! shading but never regrows the count.
//!
//! ### Headless use
//!
//! [`Background::build`] returns the [`Renderer`] directly. It is driven by
//! explicit millisecond timestamps and draws into a software RGBA canvas,
//! so frames can be produced without a window (e.g. for snapshot export via
//! [`Canvas::save_png`](canvas::Canvas::save_png)).

pub mod background;
pub mod canvas;
pub mod config;
pub mod error;
pub mod field;
pub mod governor;
pub mod mesh;
pub mod motion;
pub mod renderer;
pub mod rng;
pub mod spatial;
pub mod time;
mod window;

pub use background::Background;
pub use canvas::{Canvas, Hsla};
pub use config::{accent_hue, BackgroundConfig, FieldSize};
pub use error::{BackgroundError, GpuError, SnapshotError};
pub use glam::Vec2;
pub use renderer::{RenderState, Renderer};

/// Convenient re-exports for common usage.
///
/// ```no_run
/// use driftmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::background::Background;
    pub use crate::canvas::{Canvas, Hsla};
    pub use crate::config::{accent_hue, BackgroundConfig, FieldSize};
    pub use crate::error::{BackgroundError, GpuError, SnapshotError};
    pub use crate::renderer::{RenderState, Renderer};
    pub use crate::Vec2;
}
