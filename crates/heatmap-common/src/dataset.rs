//! The monthly global-temperature dataset as fetched from the source JSON.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One (year, month, deviation-from-baseline) data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceRecord {
    /// Calendar year, used as a categorical axis key.
    pub year: i32,
    /// 1-indexed month as it appears on the wire. Internal vertical-position
    /// lookups use the 0-indexed slot (`month - 1`).
    pub month: u32,
    /// Deviation from the dataset's base temperature, in °C. Can be negative.
    pub variance: f64,
}

impl VarianceRecord {
    /// A record is usable when its month is a real calendar month and its
    /// variance is a finite number.
    pub fn validate(&self) -> ChartResult<()> {
        if (1..=12).contains(&self.month) && self.variance.is_finite() {
            Ok(())
        } else {
            Err(ChartError::MalformedRecord {
                year: self.year,
                month: self.month,
            })
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }

    /// The 0-indexed vertical slot for this record. Only meaningful for
    /// well-formed records.
    pub fn month_slot(&self) -> usize {
        self.month.saturating_sub(1) as usize
    }
}

/// The full dataset: a reference temperature plus variance records.
///
/// Created once per run from the fetched payload and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureDataset {
    /// Reference temperature in °C. Finite, immutable for the dataset's
    /// lifetime.
    pub base_temperature: f64,
    /// Insertion order is irrelevant for rendering; the chart derives its own
    /// axis order from content.
    pub monthly_variance: Vec<VarianceRecord>,
}

impl TemperatureDataset {
    /// Absolute temperature for a record. Derived on demand, never stored.
    pub fn absolute_temp(&self, record: &VarianceRecord) -> f64 {
        self.base_temperature + record.variance
    }

    /// Split records into the well-formed ones (input order preserved) and a
    /// count of malformed ones. Malformed records are skipped rather than
    /// aborting the render; callers report the count once in aggregate.
    pub fn partition_records(&self) -> (Vec<&VarianceRecord>, usize) {
        let mut valid = Vec::with_capacity(self.monthly_variance.len());
        let mut skipped = 0;
        for record in &self.monthly_variance {
            if record.is_well_formed() {
                valid.push(record);
            } else {
                skipped += 1;
            }
        }
        (valid, skipped)
    }

    /// Parse a dataset from the source JSON payload.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
