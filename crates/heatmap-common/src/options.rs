//! Visual layout options for the chart.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel span of the legend's linear tick axis.
pub const LEGEND_AXIS_SPAN: f64 = 300.0;

/// Chart layout constants. All purely cosmetic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Padding around the plot area (axis gutter)
    pub padding: u32,
    /// Legend canvas width
    pub legend_width: u32,
    /// Legend canvas height
    pub legend_height: u32,
    /// Width of one legend swatch
    pub swatch_width: u32,
    /// Height of one legend swatch
    pub swatch_height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            padding: 60,
            legend_width: 400,
            legend_height: 50,
            swatch_width: 30,
            swatch_height: 20,
        }
    }
}

impl ChartOptions {
    /// Width of the plot area between the axis gutters.
    pub fn plot_width(&self) -> f64 {
        (self.width - 2 * self.padding) as f64
    }

    /// Height of the plot area between the axis gutters.
    pub fn plot_height(&self) -> f64 {
        (self.height - 2 * self.padding) as f64
    }

    /// Check that the options leave a positive plot area to draw into.
    pub fn validate(&self) -> ChartResult<()> {
        if self.width <= 2 * self.padding || self.height <= 2 * self.padding {
            return Err(ChartError::InvalidOptions(format!(
                "padding {} leaves no plot area in a {}x{} canvas",
                self.padding, self.width, self.height
            )));
        }
        if self.swatch_height > self.legend_height {
            return Err(ChartError::InvalidOptions(format!(
                "swatch height {} exceeds legend height {}",
                self.swatch_height, self.legend_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ChartOptions::default().validate().is_ok());
    }

    #[test]
    fn test_excessive_padding_rejected() {
        let options = ChartOptions {
            width: 100,
            height: 100,
            padding: 60,
            ..ChartOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
