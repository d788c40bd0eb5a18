//! orbmap: renders the on-sky positional uncertainty of a minor-planet
//! observation as a small raster image.
//!
//! Candidate sky positions arrive as angular offsets from a field center
//! (arcseconds, tagged with a display color); the renderer projects them
//! onto a pixel grid with an independent linear scale per axis, draws a
//! ring marker at each, applies optional whole-image flips, and saves a
//! PNG. Two windowing policies share the one core: a clipped, re-centered
//! map and a full-field overview.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod points;
pub mod render;
pub mod time;

pub use error::RenderError;
pub use render::{Canvas, MapSpec, Palette, Rgb, UncertaintyMap, Windowing};
