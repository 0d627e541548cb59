//! Render-plan computation: records in, drawable geometry out.

use serde::Serialize;
use tracing::warn;

use heatmap_common::{
    options::LEGEND_AXIS_SPAN, ChartError, ChartOptions, ChartResult, Color, TemperatureDataset,
    PALETTE,
};

use crate::scale::{linear_ticks, tick_years, year_domain, BandScale, QuantizeScale};

/// Long English month names, indexed by 0-based month slot.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month name for a 0-indexed slot. Slots outside 0..=11 never reach this
/// point; malformed records are skipped during partitioning.
pub fn month_name(slot: usize) -> &'static str {
    MONTH_NAMES[slot]
}

/// Everything a presentation surface needs to draw one heat-map cell.
#[derive(Debug, Clone, Serialize)]
pub struct CellAttributes {
    pub year: i32,
    /// 0-indexed month slot, always in 0..=11.
    pub month_slot: usize,
    /// Index of the year within the ascending year domain.
    pub x_slot: usize,
    /// Pixel position of the cell's top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    /// Hover text: `"<year> - <MonthName>\n<temp>°C"`.
    pub tooltip: String,
    pub absolute_temp: f64,
}

/// One axis tick: a label and its offset along the axis.
#[derive(Debug, Clone, Serialize)]
pub struct AxisTick {
    pub label: String,
    pub offset: f64,
}

/// One legend rectangle: a quantization bucket with its bounds and position.
#[derive(Debug, Clone, Serialize)]
pub struct LegendSwatch {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub color: Color,
    /// Pixel offset of the swatch within the legend canvas.
    pub x: f64,
}

/// Legend geometry: one swatch per palette color plus a linear tick axis.
#[derive(Debug, Clone, Serialize)]
pub struct LegendPlan {
    pub swatches: Vec<LegendSwatch>,
    pub ticks: Vec<AxisTick>,
    pub width: u32,
    pub height: u32,
    pub swatch_width: u32,
    pub swatch_height: u32,
}

/// The complete drawable description of one chart.
#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    pub options: ChartOptions,
    pub cells: Vec<CellAttributes>,
    /// Year labels along the bottom axis (multiples of 10 only).
    pub x_ticks: Vec<AxisTick>,
    /// Month labels along the left axis, one per slot.
    pub y_ticks: Vec<AxisTick>,
    pub legend: LegendPlan,
    /// Count of malformed records dropped during planning.
    pub skipped: usize,
    /// `[min, max]` of absolute temperature across the plotted records.
    pub temp_domain: (f64, f64),
}

/// Build the full render plan for a dataset.
///
/// Pure and deterministic: the same dataset and options always produce an
/// identical plan. Malformed records (month outside 1..=12 or non-finite
/// variance) are skipped and reported once in aggregate; an empty record set
/// is a `NoData` precondition failure since the color scale has no domain.
pub fn build_plan(
    dataset: &TemperatureDataset,
    options: &ChartOptions,
) -> ChartResult<RenderPlan> {
    options.validate()?;

    let (records, skipped) = dataset.partition_records();
    if skipped > 0 {
        warn!(skipped, "dropped malformed variance records");
    }
    if records.is_empty() {
        return Err(ChartError::NoData);
    }

    let padding = options.padding as f64;
    let x_scale = BandScale::new(
        year_domain(&records),
        (padding, options.width as f64 - padding),
    );
    // Bottom-up range puts January at the bottom of the plot.
    let y_scale = BandScale::months((options.height as f64 - padding, padding));

    let color_scale = QuantizeScale::from_records(&records, dataset.base_temperature, &PALETTE)?;

    let mut cells = Vec::with_capacity(records.len());
    for record in &records {
        let Some(x_slot) = x_scale.slot(record.year) else {
            continue;
        };
        let month_slot = record.month_slot();
        let temp = dataset.absolute_temp(record);
        cells.push(CellAttributes {
            year: record.year,
            month_slot,
            x_slot,
            x: x_scale.position(x_slot),
            y: y_scale.position(month_slot),
            width: x_scale.bandwidth(),
            height: y_scale.bandwidth(),
            fill: color_scale.color(temp),
            tooltip: format!("{} - {}\n{:.2}°C", record.year, month_name(month_slot), temp),
            absolute_temp: temp,
        });
    }

    let x_ticks = tick_years(x_scale.domain())
        .into_iter()
        .map(|year| {
            // slot() cannot miss: tick years are drawn from the domain itself.
            let slot = x_scale.slot(year).unwrap_or_default();
            AxisTick {
                label: year.to_string(),
                offset: x_scale.center(slot),
            }
        })
        .collect();

    let y_ticks = (0..y_scale.len())
        .map(|slot| AxisTick {
            label: month_name(slot).to_string(),
            offset: y_scale.center(slot),
        })
        .collect();

    Ok(RenderPlan {
        options: *options,
        cells,
        x_ticks,
        y_ticks,
        legend: build_legend(&color_scale, options),
        skipped,
        temp_domain: color_scale.domain(),
    })
}

fn build_legend(color_scale: &QuantizeScale, options: &ChartOptions) -> LegendPlan {
    let swatches = (0..color_scale.bucket_count())
        .map(|index| {
            let (lower_bound, upper_bound) = color_scale.invert_extent(index);
            LegendSwatch {
                lower_bound,
                upper_bound,
                color: color_scale.color(lower_bound),
                x: (index as u32 * options.swatch_width) as f64,
            }
        })
        .collect();

    let (min, max) = color_scale.domain();
    let span = max - min;
    let ticks = linear_ticks(min, max, 5)
        .into_iter()
        .map(|value| {
            let offset = if span > 0.0 {
                (value - min) / span * LEGEND_AXIS_SPAN
            } else {
                0.0
            };
            AxisTick {
                label: format!("{}", value),
                offset,
            }
        })
        .collect();

    LegendPlan {
        swatches,
        ticks,
        width: options.legend_width,
        height: options.legend_height,
        swatch_width: options.swatch_width,
        swatch_height: options.swatch_height,
    }
}
