//! PNG encoding for the raster backend.
//!
//! A heat-map canvas uses a handful of colors (the 9-color palette plus
//! background and ink), so the common path is an indexed PNG (color type 3):
//! 1 byte per pixel and a small PLTE chunk. Images that somehow exceed 256
//! unique colors fall back to RGBA (color type 6).

use std::collections::HashMap;
use std::io::Write;

use rayon::prelude::*;

use heatmap_common::{ChartError, ChartResult, Color};

use crate::raster::Canvas;

/// Indexed PNG holds at most this many palette entries.
const MAX_PALETTE_SIZE: usize = 256;

/// Below this many pixels the parallel palette pass costs more than it saves.
const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Encode a canvas as PNG, choosing indexed or RGBA automatically.
pub fn encode(canvas: &Canvas) -> ChartResult<Vec<u8>> {
    match extract_palette(canvas.pixels()) {
        Some((palette, indices)) => {
            encode_indexed(canvas.width(), canvas.height(), &palette, &indices)
        }
        None => {
            tracing::debug!("more than 256 unique colors, falling back to RGBA PNG");
            encode_rgba(canvas.pixels(), canvas.width(), canvas.height())
        }
    }
}

fn pack(chunk: &[u8]) -> u32 {
    u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
}

/// Map every pixel to a palette index, or `None` when the image has more
/// than 256 unique colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<Color>, Vec<u8>)> {
    // First pass: collect unique colors. Parallel for full-size canvases.
    let unique: Vec<u32> = if pixels.len() / 4 >= PARALLEL_THRESHOLD {
        let per_chunk: Vec<Vec<u32>> = pixels
            .par_chunks(4 * 4096)
            .map(|chunk| {
                let mut seen: Vec<u32> = Vec::with_capacity(32);
                for px in chunk.chunks_exact(4) {
                    let packed = pack(px);
                    if !seen.contains(&packed) {
                        seen.push(packed);
                        if seen.len() > MAX_PALETTE_SIZE {
                            break;
                        }
                    }
                }
                seen
            })
            .collect();
        let mut merged = Vec::new();
        for chunk in per_chunk {
            for packed in chunk {
                if !merged.contains(&packed) {
                    merged.push(packed);
                    if merged.len() > MAX_PALETTE_SIZE {
                        return None;
                    }
                }
            }
        }
        merged
    } else {
        let mut seen = Vec::new();
        for px in pixels.chunks_exact(4) {
            let packed = pack(px);
            if !seen.contains(&packed) {
                seen.push(packed);
                if seen.len() > MAX_PALETTE_SIZE {
                    return None;
                }
            }
        }
        seen
    };

    let index_of: HashMap<u32, u8> = unique
        .iter()
        .enumerate()
        .map(|(i, &packed)| (packed, i as u8))
        .collect();
    let palette = unique
        .iter()
        .map(|&packed| {
            let [r, g, b, a] = packed.to_le_bytes();
            Color::new(r, g, b, a)
        })
        .collect();

    // Second pass: one index byte per pixel.
    let indices = pixels
        .chunks_exact(4)
        .map(|px| index_of[&pack(px)])
        .collect();

    Some((palette, indices))
}

/// Indexed PNG: IHDR + PLTE (+ tRNS when needed) + IDAT + IEND.
fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[Color],
    indices: &[u8],
) -> ChartResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let mut plte = Vec::with_capacity(palette.len() * 3);
    for color in palette {
        plte.extend_from_slice(&[color.r, color.g, color.b]);
    }
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|c| c.a < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c.a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    write_chunk(&mut png, b"IDAT", &deflate_scanlines(indices, width, height, 1)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// RGBA PNG fallback for >256 unique colors.
fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> ChartResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));
    write_chunk(&mut png, b"IDAT", &deflate_scanlines(pixels, width, height, 4)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Prefix each scanline with filter type 0 and zlib-compress the lot.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> ChartResult<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    let mut raw = Vec::with_capacity(height * (1 + stride));
    for y in 0..height {
        raw.push(0); // filter: none
        raw.extend_from_slice(&data[y * stride..(y + 1) * stride]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&raw)
        .map_err(|e| ChartError::Render(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| ChartError::Render(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_palette_few_colors() {
        // red, green, blue, red
        let pixels = [
            255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 0, 0, 255,
        ];
        let (palette, indices) = extract_palette(&pixels).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(indices.len(), 4);
        assert_eq!(indices[0], indices[3]);
    }

    #[test]
    fn test_extract_palette_too_many_colors() {
        // 300 distinct colors
        let mut pixels = Vec::new();
        for i in 0..300u32 {
            pixels.extend_from_slice(&[(i % 256) as u8, (i / 256) as u8, 7, 255]);
        }
        assert!(extract_palette(&pixels).is_none());
    }

    #[test]
    fn test_extract_palette_parallel_path() {
        // Large two-color image exercises the parallel pass.
        let mut pixels = Vec::with_capacity(128 * 128 * 4);
        for i in 0..128 * 128 {
            if i % 2 == 0 {
                pixels.extend_from_slice(&[10, 20, 30, 255]);
            } else {
                pixels.extend_from_slice(&[200, 100, 50, 255]);
            }
        }
        let (palette, indices) = extract_palette(&pixels).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(indices.len(), 128 * 128);
        assert_ne!(indices[0], indices[1]);
    }

    #[test]
    fn test_write_chunk_layout() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"IEND", &[]);
        assert_eq!(&out[0..4], &[0, 0, 0, 0]); // length
        assert_eq!(&out[4..8], b"IEND");
        assert_eq!(out.len(), 12); // length + type + crc
    }
}
