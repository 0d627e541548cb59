//! Presentation surfaces for a computed [`RenderPlan`].
//!
//! Two interchangeable backends:
//! - SVG document writer (`svg`) — vector output with per-cell hover titles
//! - RGBA raster + hand-rolled PNG encoder (`raster`, `png`, `glyphs`)
//!
//! Both consume the plan's geometry as-is; hover/tooltip behavior beyond the
//! embedded text is the host's concern.
//!
//! [`RenderPlan`]: heatmap_core::RenderPlan

pub mod glyphs;
pub mod png;
pub mod raster;
pub mod svg;

pub use raster::{render_raster, Canvas};
pub use svg::render_svg;
