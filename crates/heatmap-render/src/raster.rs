//! Raster backend: draws a render plan into an RGBA pixel buffer.

use heatmap_common::{options::LEGEND_AXIS_SPAN, Color};
use heatmap_core::RenderPlan;

use crate::glyphs::{self, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};

/// Length of an axis tick mark in pixels.
const TICK_LENGTH: i64 = 4;
/// Gap between a tick mark and its label.
const LABEL_GAP: i64 = 3;

/// An RGBA pixel buffer, row-major, 4 bytes per pixel.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[background.r, background.g, background.b, background.a]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        for py in y..y + h {
            for px in x..x + w {
                self.set_pixel(px, py, color);
            }
        }
    }

    pub fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Color) {
        for x in x0..=x1 {
            self.set_pixel(x, y, color);
        }
    }

    pub fn vline(&mut self, x: i64, y0: i64, y1: i64, color: Color) {
        for y in y0..=y1 {
            self.set_pixel(x, y, color);
        }
    }

    /// Draw text with the built-in 5x7 glyphs, top-left anchored. Characters
    /// without a glyph advance without drawing.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Color) {
        let mut cursor = x;
        for c in text.chars() {
            if let Some(rows) = glyphs::glyph(c) {
                for (dy, row) in rows.iter().enumerate() {
                    for dx in 0..GLYPH_WIDTH {
                        if row & (1u8 << (GLYPH_WIDTH - 1 - dx)) != 0 {
                            self.set_pixel(cursor + dx as i64, y + dy as i64, color);
                        }
                    }
                }
            }
            cursor += (GLYPH_WIDTH + GLYPH_SPACING) as i64;
        }
    }
}

/// Render the plan into a single image: chart on top, legend underneath.
pub fn render_raster(plan: &RenderPlan) -> Canvas {
    let options = &plan.options;
    let total_height = (options.height + options.legend_height) as usize;
    let mut canvas = Canvas::new(options.width as usize, total_height, Color::white());

    draw_cells(&mut canvas, plan);
    draw_axes(&mut canvas, plan);
    draw_legend(&mut canvas, plan);

    canvas
}

fn draw_cells(canvas: &mut Canvas, plan: &RenderPlan) {
    for cell in &plan.cells {
        // Round both edges so adjacent cells tile without hairline gaps.
        let x0 = cell.x.round() as i64;
        let x1 = (cell.x + cell.width).round() as i64;
        let y0 = cell.y.round() as i64;
        let y1 = (cell.y + cell.height).round() as i64;
        canvas.fill_rect(x0, y0, x1 - x0, y1 - y0, cell.fill);
    }
}

fn draw_axes(canvas: &mut Canvas, plan: &RenderPlan) {
    let options = &plan.options;
    let ink = Color::black();
    let padding = options.padding as i64;
    let right = (options.width - options.padding) as i64;
    let bottom = (options.height - options.padding) as i64;

    canvas.hline(padding, right, bottom, ink);
    canvas.vline(padding, padding, bottom, ink);

    for tick in &plan.x_ticks {
        let x = tick.offset.round() as i64;
        canvas.vline(x, bottom, bottom + TICK_LENGTH, ink);
        let label_x = x - glyphs::text_width(&tick.label) as i64 / 2;
        canvas.draw_text(label_x, bottom + TICK_LENGTH + LABEL_GAP, &tick.label, ink);
    }

    for tick in &plan.y_ticks {
        let y = tick.offset.round() as i64;
        canvas.hline(padding - TICK_LENGTH, padding, y, ink);
        let label_x = padding - TICK_LENGTH - LABEL_GAP - glyphs::text_width(&tick.label) as i64;
        canvas.draw_text(label_x, y - (GLYPH_HEIGHT as i64) / 2, &tick.label, ink);
    }
}

fn draw_legend(canvas: &mut Canvas, plan: &RenderPlan) {
    let options = &plan.options;
    let legend = &plan.legend;
    let ink = Color::black();

    // Legend sits below the chart, left-aligned with the plot area.
    let origin_x = options.padding as i64;
    let origin_y = options.height as i64;

    for swatch in &legend.swatches {
        canvas.fill_rect(
            origin_x + swatch.x.round() as i64,
            origin_y,
            legend.swatch_width as i64,
            legend.swatch_height as i64,
            swatch.color,
        );
    }

    let axis_y = origin_y + legend.swatch_height as i64;
    canvas.hline(origin_x, origin_x + LEGEND_AXIS_SPAN as i64, axis_y, ink);

    for tick in &legend.ticks {
        let x = origin_x + tick.offset.round() as i64;
        canvas.vline(x, axis_y, axis_y + TICK_LENGTH, ink);
        let label_x = x - glyphs::text_width(&tick.label) as i64 / 2;
        canvas.draw_text(label_x, axis_y + TICK_LENGTH + LABEL_GAP, &tick.label, ink);
    }
}
