//! Uncertainty-map rendering core
//!
//! Maps angular offsets (arcseconds from a field center) onto a pixel grid
//! and draws a ring marker per candidate position:
//! - independent linear arcsecond→pixel scale per axis (no gnomonic/WCS)
//! - windowed (clipping, re-centered) and full-field (draw-all) policies
//! - background-aware marker palette
//! - whole-canvas flips as a display-orientation post-step

mod canvas;
mod map;
mod palette;
mod transform;

pub use canvas::*;
pub use map::*;
pub use palette::*;
pub use transform::*;
