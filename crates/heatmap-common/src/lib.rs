//! Common types shared across the heat-map crates and services.

pub mod color;
pub mod dataset;
pub mod error;
pub mod options;

pub use color::{Color, PALETTE};
pub use dataset::{TemperatureDataset, VarianceRecord};
pub use error::{ChartError, ChartResult};
pub use options::ChartOptions;
