//! Tests for PNG encoding of rendered canvases.

use std::io::Read;

use heatmap_common::{ChartOptions, Color, TemperatureDataset, VarianceRecord};
use heatmap_core::build_plan;
use heatmap_render::{png, render_raster, Canvas};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn chart_png() -> (Vec<u8>, usize, usize) {
    let dataset = TemperatureDataset {
        base_temperature: 8.0,
        monthly_variance: (1..=12)
            .map(|month| VarianceRecord {
                year: 1950,
                month,
                variance: month as f64 * 0.3 - 2.0,
            })
            .collect(),
    };
    let plan = build_plan(&dataset, &ChartOptions::default()).unwrap();
    let canvas = render_raster(&plan);
    let (w, h) = (canvas.width(), canvas.height());
    (png::encode(&canvas).unwrap(), w, h)
}

fn chunk<'a>(data: &'a [u8], name: &[u8; 4]) -> Option<&'a [u8]> {
    let mut offset = 8;
    while offset + 8 <= data.len() {
        let len = u32::from_be_bytes(data[offset..offset + 4].try_into().unwrap()) as usize;
        let ty = &data[offset + 4..offset + 8];
        if ty == name {
            return Some(&data[offset + 8..offset + 8 + len]);
        }
        offset += 12 + len;
    }
    None
}

#[test]
fn test_signature_and_chunk_order() {
    let (data, _, _) = chart_png();
    assert_eq!(&data[0..8], &PNG_SIGNATURE);
    assert_eq!(&data[12..16], b"IHDR");
    assert_eq!(&data[data.len() - 8..data.len() - 4], b"IEND");
}

#[test]
fn test_chart_encodes_as_indexed() {
    let (data, width, height) = chart_png();
    let ihdr = chunk(&data, b"IHDR").unwrap();
    assert_eq!(
        u32::from_be_bytes(ihdr[0..4].try_into().unwrap()),
        width as u32
    );
    assert_eq!(
        u32::from_be_bytes(ihdr[4..8].try_into().unwrap()),
        height as u32
    );
    assert_eq!(ihdr[8], 8); // bit depth
    assert_eq!(ihdr[9], 3); // indexed color: few unique colors in a heat map

    let plte = chunk(&data, b"PLTE").unwrap();
    assert_eq!(plte.len() % 3, 0);
    assert!(plte.len() / 3 <= 256);
}

#[test]
fn test_idat_decodes_to_expected_scanlines() {
    let (data, width, height) = chart_png();
    let idat = chunk(&data, b"IDAT").unwrap();

    let mut decoder = flate2::read::ZlibDecoder::new(idat);
    let mut raw = Vec::new();
    decoder.read_to_end(&mut raw).unwrap();

    // Indexed: one filter byte plus one index byte per pixel, per row.
    assert_eq!(raw.len(), height * (1 + width));
    for y in 0..height {
        assert_eq!(raw[y * (1 + width)], 0, "filter type at row {}", y);
    }
}

#[test]
fn test_many_colors_falls_back_to_rgba() {
    // A 32x32 gradient with a unique color per pixel.
    let mut canvas = Canvas::new(32, 32, Color::white());
    for y in 0..32i64 {
        for x in 0..32i64 {
            canvas.set_pixel(x, y, Color::opaque((x * 8) as u8, (y * 8) as u8, 99));
        }
    }
    let data = png::encode(&canvas).unwrap();
    let ihdr = chunk(&data, b"IHDR").unwrap();
    assert_eq!(ihdr[9], 6); // RGBA
    assert!(chunk(&data, b"PLTE").is_none());
}
