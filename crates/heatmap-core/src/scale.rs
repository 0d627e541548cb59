//! Scale functions: categorical band axes, equal-width color quantization,
//! and linear tick generation for the legend axis.

use heatmap_common::{ChartError, ChartResult, Color, VarianceRecord};

/// Fixed vertical slots: the month axis always has 12 bands (0..=11), even
/// when some months are absent from the data.
pub const MONTH_SLOT_COUNT: usize = 12;

/// Distinct years present in the records, ascending. Empty input yields an
/// empty domain (a degenerate but valid chart with zero cells).
pub fn year_domain(records: &[&VarianceRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Sparsification rule for the horizontal axis: only years divisible by 10
/// get a tick label, in ascending order.
pub fn tick_years(domain: &[i32]) -> Vec<i32> {
    domain.iter().copied().filter(|y| y % 10 == 0).collect()
}

/// A categorical band axis: a discrete ordered domain mapped to equal-width
/// bands across a pixel range.
///
/// Descending ranges are supported; the first domain entry then takes the
/// band nearest the range's second endpoint (the month axis uses this to put
/// January at the bottom of the chart).
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<i32>,
    range: (f64, f64),
}

impl BandScale {
    pub fn new(domain: Vec<i32>, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Band scale over the fixed 12 month slots. The range runs bottom-up so
    /// slot 0 (January) sits at the bottom of the plot area.
    pub fn months(range: (f64, f64)) -> Self {
        Self::new((0..MONTH_SLOT_COUNT as i32).collect(), range)
    }

    pub fn domain(&self) -> &[i32] {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Width of one band in pixels. Zero for an empty domain.
    pub fn bandwidth(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        (self.range.1 - self.range.0).abs() / self.domain.len() as f64
    }

    /// Index of a key within the domain.
    pub fn slot(&self, key: i32) -> Option<usize> {
        self.domain.iter().position(|&d| d == key)
    }

    /// Leading (low-pixel) edge of the band at `slot`.
    pub fn position(&self, slot: usize) -> f64 {
        let (start, stop) = self.range;
        let step = self.bandwidth();
        if stop >= start {
            start + slot as f64 * step
        } else {
            // Descending range: bands are laid out ascending from the low
            // endpoint, with the domain order reversed.
            stop + (self.domain.len() - 1 - slot) as f64 * step
        }
    }

    /// Center of the band at `slot` (where axis ticks go).
    pub fn center(&self, slot: usize) -> f64 {
        self.position(slot) + self.bandwidth() / 2.0
    }
}

/// Equal-width quantization of a continuous domain onto a fixed color list.
///
/// The domain `[min, max]` is split into `colors.len()` contiguous `[lo, hi)`
/// buckets; the final bucket is closed on both ends so the domain maximum is
/// included. Values on an interior boundary belong to the upper bucket.
#[derive(Debug, Clone)]
pub struct QuantizeScale {
    min: f64,
    max: f64,
    colors: Vec<Color>,
}

impl QuantizeScale {
    pub fn new(min: f64, max: f64, palette: &[&str]) -> ChartResult<Self> {
        if palette.is_empty() {
            return Err(ChartError::InvalidColor("empty palette".to_string()));
        }
        if !min.is_finite() || !max.is_finite() || max < min {
            return Err(ChartError::Render(format!(
                "invalid quantize domain [{}, {}]",
                min, max
            )));
        }
        let colors = palette
            .iter()
            .map(|hex| Color::from_hex(hex))
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self { min, max, colors })
    }

    /// Quantize scale over the absolute temperatures of the given records.
    /// Fails with `NoData` when the record set is empty, since no domain can
    /// be established.
    pub fn from_records(
        records: &[&VarianceRecord],
        base_temperature: f64,
        palette: &[&str],
    ) -> ChartResult<Self> {
        if records.is_empty() {
            return Err(ChartError::NoData);
        }
        let (min, max) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), r| {
                let temp = base_temperature + r.variance;
                (min.min(temp), max.max(temp))
            },
        );
        Self::new(min, max, palette)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn bucket_count(&self) -> usize {
        self.colors.len()
    }

    pub fn bucket_width(&self) -> f64 {
        (self.max - self.min) / self.colors.len() as f64
    }

    /// Index of the bucket containing `value`. Out-of-domain values clamp to
    /// the nearest bucket. A zero-width domain maps everything to bucket 0
    /// (the domain-minimum-inclusive rule).
    pub fn bucket_index(&self, value: f64) -> usize {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0;
        }
        let t = (value - self.min) / span;
        // Small tolerance so a reconstructed bucket boundary (min + k*width)
        // lands in bucket k even when the division picks up rounding noise.
        let raw = (t * self.colors.len() as f64 + 1e-9).floor();
        let max_index = (self.colors.len() - 1) as f64;
        raw.clamp(0.0, max_index) as usize
    }

    pub fn color(&self, value: f64) -> Color {
        self.colors[self.bucket_index(value)]
    }

    /// Inverse mapping for legend rendering: the `[lo, hi)` bounds of bucket
    /// `index`.
    pub fn invert_extent(&self, index: usize) -> (f64, f64) {
        let width = self.bucket_width();
        (
            self.min + index as f64 * width,
            self.min + (index + 1) as f64 * width,
        )
    }
}

/// "Nice" tick values covering `[lo, hi]`, roughly `count` of them, stepped
/// by 1, 2, or 5 times a power of ten. Matches the usual linear-axis tick
/// convention.
pub fn linear_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if count == 0 || !lo.is_finite() || !hi.is_finite() || hi < lo {
        return Vec::new();
    }
    if hi == lo {
        return vec![lo];
    }

    let step = tick_increment(lo, hi, count);
    // Tolerance keeps boundary ticks (e.g. 1.0 / 0.2) from falling off due
    // to binary rounding of the step.
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;

    (first..=last)
        .map(|i| {
            // Round away accumulated float noise so tick labels stay clean.
            let v = i as f64 * step;
            (v * 1e10).round() / 1e10
        })
        .collect()
}

fn tick_increment(lo: f64, hi: f64, count: usize) -> f64 {
    let step = (hi - lo) / count as f64;
    let power = step.log10().floor();
    let base = 10f64.powf(power);
    let error = step / base;

    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}
