//! Tests for dataset parsing and record partitioning.

use heatmap_common::{TemperatureDataset, VarianceRecord};

fn record(year: i32, month: u32, variance: f64) -> VarianceRecord {
    VarianceRecord {
        year,
        month,
        variance,
    }
}

#[test]
fn test_parse_wire_payload() {
    let json = r#"{
        "baseTemperature": 8.66,
        "monthlyVariance": [
            {"year": 1753, "month": 1, "variance": -1.366},
            {"year": 1753, "month": 2, "variance": -2.223}
        ]
    }"#;

    let dataset = TemperatureDataset::from_json(json).unwrap();
    assert_eq!(dataset.base_temperature, 8.66);
    assert_eq!(dataset.monthly_variance.len(), 2);
    assert_eq!(dataset.monthly_variance[0].year, 1753);
    assert_eq!(dataset.monthly_variance[1].month, 2);
    assert!((dataset.monthly_variance[1].variance + 2.223).abs() < 1e-9);
}

#[test]
fn test_parse_rejects_wrong_shape() {
    assert!(TemperatureDataset::from_json(r#"{"baseTemperature": 8.0}"#).is_err());
    assert!(TemperatureDataset::from_json("not json").is_err());
}

#[test]
fn test_absolute_temp_is_derived() {
    let dataset = TemperatureDataset {
        base_temperature: 8.0,
        monthly_variance: vec![record(1900, 1, -2.0)],
    };
    assert_eq!(dataset.absolute_temp(&dataset.monthly_variance[0]), 6.0);
}

#[test]
fn test_partition_keeps_order_and_counts_skips() {
    let dataset = TemperatureDataset {
        base_temperature: 8.0,
        monthly_variance: vec![
            record(1900, 1, -2.0),
            record(1900, 13, 0.5), // month out of range
            record(1901, 6, 1.5),
            record(1901, 0, 0.1), // month out of range
        ],
    };

    let (valid, skipped) = dataset.partition_records();
    assert_eq!(skipped, 2);
    assert_eq!(valid.len(), 2);
    assert_eq!((valid[0].year, valid[0].month), (1900, 1));
    assert_eq!((valid[1].year, valid[1].month), (1901, 6));
}

#[test]
fn test_partition_skips_non_finite_variance() {
    let dataset = TemperatureDataset {
        base_temperature: 8.0,
        monthly_variance: vec![record(1900, 1, f64::NAN), record(1900, 2, 0.25)],
    };

    let (valid, skipped) = dataset.partition_records();
    assert_eq!(skipped, 1);
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].month, 2);
}

#[test]
fn test_validate_reports_the_offending_record() {
    let err = record(1900, 13, 0.5).validate().unwrap_err();
    match err {
        heatmap_common::ChartError::MalformedRecord { year, month } => {
            assert_eq!((year, month), (1900, 13));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(record(1900, 6, 0.5).validate().is_ok());
}

#[test]
fn test_month_slot_is_zero_indexed() {
    assert_eq!(record(2000, 1, 0.0).month_slot(), 0);
    assert_eq!(record(2000, 12, 0.0).month_slot(), 11);
}
