//! SVG backend: writes a render plan as a standalone SVG document.
//!
//! Cells carry the original chart's data attributes (`data-year`,
//! `data-month` with the 0-indexed slot, `data-temp`) and a `<title>` child,
//! so browsers show the tooltip text on hover without any script.

use std::fmt::Write;

use heatmap_common::options::LEGEND_AXIS_SPAN;
use heatmap_core::RenderPlan;

/// Length of an axis tick mark in pixels.
const TICK_LENGTH: f64 = 6.0;
const FONT: &str = "font-family=\"sans-serif\" font-size=\"11\"";

/// Render the plan as a complete SVG document. Chart on top, legend below,
/// deterministic output for a given plan.
pub fn render_svg(plan: &RenderPlan) -> String {
    let options = &plan.options;
    let total_height = options.height + options.legend_height;

    let mut svg = String::new();
    // Writes into a String cannot fail; the unwraps below are infallible.
    writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">",
        options.width, total_height
    )
    .unwrap();
    writeln!(
        svg,
        "  <rect width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
        options.width, total_height
    )
    .unwrap();

    write_cells(&mut svg, plan);
    write_axes(&mut svg, plan);
    write_legend(&mut svg, plan);

    svg.push_str("</svg>\n");
    svg
}

fn write_cells(svg: &mut String, plan: &RenderPlan) {
    writeln!(svg, "  <g id=\"cells\">").unwrap();
    for cell in &plan.cells {
        writeln!(
            svg,
            "    <rect class=\"cell\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" \
             fill=\"{}\" data-year=\"{}\" data-month=\"{}\" data-temp=\"{}\"><title>{}</title></rect>",
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            cell.fill.to_hex(),
            cell.year,
            cell.month_slot,
            cell.absolute_temp,
            escape(&cell.tooltip),
        )
        .unwrap();
    }
    writeln!(svg, "  </g>").unwrap();
}

fn write_axes(svg: &mut String, plan: &RenderPlan) {
    let options = &plan.options;
    let padding = options.padding as f64;
    let right = (options.width - options.padding) as f64;
    let bottom = (options.height - options.padding) as f64;

    writeln!(svg, "  <g id=\"x-axis\" stroke=\"#000000\">").unwrap();
    writeln!(
        svg,
        "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>",
        padding, bottom, right, bottom
    )
    .unwrap();
    for tick in &plan.x_ticks {
        writeln!(
            svg,
            "    <line x1=\"{o:.2}\" y1=\"{}\" x2=\"{o:.2}\" y2=\"{}\"/>",
            bottom,
            bottom + TICK_LENGTH,
            o = tick.offset
        )
        .unwrap();
        writeln!(
            svg,
            "    <text x=\"{:.2}\" y=\"{}\" text-anchor=\"middle\" stroke=\"none\" {}>{}</text>",
            tick.offset,
            bottom + TICK_LENGTH + 14.0,
            FONT,
            escape(&tick.label)
        )
        .unwrap();
    }
    writeln!(svg, "  </g>").unwrap();

    writeln!(svg, "  <g id=\"y-axis\" stroke=\"#000000\">").unwrap();
    writeln!(
        svg,
        "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>",
        padding, padding, padding, bottom
    )
    .unwrap();
    for tick in &plan.y_ticks {
        writeln!(
            svg,
            "    <line x1=\"{}\" y1=\"{o:.2}\" x2=\"{}\" y2=\"{o:.2}\"/>",
            padding - TICK_LENGTH,
            padding,
            o = tick.offset
        )
        .unwrap();
        writeln!(
            svg,
            "    <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" stroke=\"none\" {}>{}</text>",
            padding - TICK_LENGTH - 4.0,
            tick.offset + 4.0,
            FONT,
            escape(&tick.label)
        )
        .unwrap();
    }
    writeln!(svg, "  </g>").unwrap();
}

fn write_legend(svg: &mut String, plan: &RenderPlan) {
    let options = &plan.options;
    let legend = &plan.legend;

    writeln!(
        svg,
        "  <g id=\"legend\" transform=\"translate({}, {})\">",
        options.padding, options.height
    )
    .unwrap();
    for swatch in &legend.swatches {
        writeln!(
            svg,
            "    <rect x=\"{:.2}\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            swatch.x,
            legend.swatch_width,
            legend.swatch_height,
            swatch.color.to_hex()
        )
        .unwrap();
    }

    let axis_y = legend.swatch_height as f64;
    writeln!(
        svg,
        "    <line x1=\"0\" y1=\"{a}\" x2=\"{}\" y2=\"{a}\" stroke=\"#000000\"/>",
        LEGEND_AXIS_SPAN,
        a = axis_y
    )
    .unwrap();
    for tick in &legend.ticks {
        writeln!(
            svg,
            "    <line x1=\"{o:.2}\" y1=\"{a}\" x2=\"{o:.2}\" y2=\"{}\" stroke=\"#000000\"/>",
            axis_y + TICK_LENGTH,
            o = tick.offset,
            a = axis_y
        )
        .unwrap();
        writeln!(
            svg,
            "    <text x=\"{:.2}\" y=\"{}\" text-anchor=\"middle\" {}>{}</text>",
            tick.offset,
            axis_y + TICK_LENGTH + 12.0,
            FONT,
            escape(&tick.label)
        )
        .unwrap();
    }
    writeln!(svg, "  </g>").unwrap();
}

/// Escape the XML special characters that can appear in labels and tooltips.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape("plain"), "plain");
    }
}
