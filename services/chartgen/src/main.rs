//! Heat-map chart generator.
//!
//! Fetches the monthly global-temperature variance dataset (or reads it from
//! a local file), computes the render plan, and writes the chart as SVG or
//! PNG. Single pass: fetch, plan, render, write.

mod fetch;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap_common::ChartOptions;
use heatmap_core::build_plan;
use heatmap_render::{png, render_raster, render_svg};

use fetch::{load_from_file, DatasetLoader, DEFAULT_DATASET_URL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Png,
}

#[derive(Parser, Debug)]
#[command(name = "chartgen")]
#[command(about = "Render the global-temperature heat map to SVG or PNG")]
struct Args {
    /// Dataset URL
    #[arg(long, env = "DATASET_URL", default_value = DEFAULT_DATASET_URL)]
    url: String,

    /// Read the dataset from a local JSON file instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "heatmap.svg")]
    output: PathBuf,

    /// Output format (default: inferred from the output extension)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Canvas width in pixels
    #[arg(long, default_value = "1200")]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Padding around the plot area
    #[arg(long, default_value = "60")]
    padding: u32,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Pick the output format: explicit flag first, file extension second, SVG
/// as the fallback.
fn output_format(path: &Path, explicit: Option<OutputFormat>) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
        _ => OutputFormat::Svg,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let dataset = match &args.input {
        Some(path) => {
            info!(path = %path.display(), "loading dataset from file");
            load_from_file(path)?
        }
        None => {
            let loader = DatasetLoader::new(Duration::from_secs(args.timeout_secs))?;
            loader.load(&args.url).await?
        }
    };

    let options = ChartOptions {
        width: args.width,
        height: args.height,
        padding: args.padding,
        ..ChartOptions::default()
    };

    // build_plan logs the aggregate skipped-record count itself.
    let plan = build_plan(&dataset, &options).context("failed to build render plan")?;
    info!(
        cells = plan.cells.len(),
        skipped = plan.skipped,
        temp_min = plan.temp_domain.0,
        temp_max = plan.temp_domain.1,
        "render plan built"
    );

    let format = output_format(&args.output, args.format);
    let bytes = match format {
        OutputFormat::Svg => render_svg(&plan).into_bytes(),
        OutputFormat::Png => {
            let canvas = render_raster(&plan);
            png::encode(&canvas).context("failed to encode PNG")?
        }
    };

    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        bytes = bytes.len(),
        format = ?format,
        "chart written"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_inference() {
        assert_eq!(
            output_format(Path::new("chart.png"), None),
            OutputFormat::Png
        );
        assert_eq!(
            output_format(Path::new("chart.svg"), None),
            OutputFormat::Svg
        );
        assert_eq!(output_format(Path::new("chart"), None), OutputFormat::Svg);
        assert_eq!(
            output_format(Path::new("chart.svg"), Some(OutputFormat::Png)),
            OutputFormat::Png
        );
    }
}
