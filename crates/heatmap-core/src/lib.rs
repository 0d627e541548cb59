//! Heat-map rendering core.
//!
//! Pure data-to-visual mapping: consumes a [`TemperatureDataset`] and
//! produces screen-space geometry, quantized colors, axis ticks, and legend
//! metadata as a [`RenderPlan`]. No I/O, no hidden state; a swappable
//! presentation surface (SVG, raster, ...) consumes the plan.
//!
//! [`TemperatureDataset`]: heatmap_common::TemperatureDataset

pub mod plan;
pub mod scale;

pub use plan::{build_plan, month_name, AxisTick, CellAttributes, LegendPlan, LegendSwatch, RenderPlan};
pub use scale::{linear_ticks, tick_years, year_domain, BandScale, QuantizeScale};
