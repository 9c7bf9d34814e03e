//! ChartLab CLI — render a candlestick + volume chart from a price file.
//!
//! Pipeline, strictly left to right:
//! load file → rolling average over the full series → trailing date window
//! → classify the latest close → render PNG beside the input.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use chartlab_core::data::load_series;
use chartlab_core::domain::Bar;
use chartlab_core::indicators::Sma;
use chartlab_core::signal::PriceLocation;
use chartlab_core::window::trailing_window;
use chartlab_core::SMA_PERIOD;
use chartlab_render::{chart_output_path, render_chart, ChartInput, Theme};

#[derive(Parser)]
#[command(
    name = "chartlab",
    about = "Render a candlestick + volume chart with a trailing moving-average overlay"
)]
struct Cli {
    /// Path to the delimited price file (header row with Date, Open, High, Low, Close, Vol).
    data_file: PathBuf,

    /// Trailing window to display, in years. Fractional values work (0.5 = six months).
    #[arg(default_value_t = 1.0, allow_negative_numbers = true)]
    years: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_series(&cli.data_file)
        .with_context(|| format!("failed to load '{}'", cli.data_file.display()))?;
    for warning in &loaded.warnings {
        eprintln!("WARNING: {warning}");
    }

    let sma = Sma::new(SMA_PERIOD);
    if loaded.bars.len() < sma.period() {
        eprintln!(
            "WARNING: {} row(s) is fewer than the {}-period average needs; rendering without the overlay",
            loaded.bars.len(),
            sma.period()
        );
    }
    let averages = sma.compute(&loaded.bars);

    // Average first, window second: values stay defined at the left edge
    // of the displayed range.
    let start = trailing_window(&loaded.bars, cli.years)?;
    let bars = &loaded.bars[start..];
    let averages = &averages[start..];

    let status = match (bars.last(), averages.last()) {
        (Some(bar), Some(Some(avg))) => Some(PriceLocation::classify(bar.close, *avg)),
        _ => None,
    };

    let symbol = cli
        .data_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("SERIES")
        .to_uppercase();

    let output = chart_output_path(&cli.data_file);
    let input = ChartInput {
        symbol: &symbol,
        bars,
        averages,
        status,
        sma_period: sma.period(),
    };
    render_chart(&input, &output, &Theme::default())
        .with_context(|| format!("failed to render '{}'", output.display()))?;

    print_summary(&symbol, bars, status, sma.period());
    println!("Chart saved to {}", output.display());
    Ok(())
}

fn print_summary(symbol: &str, bars: &[Bar], status: Option<PriceLocation>, period: usize) {
    println!();
    println!("=== Chart Summary ===");
    println!("Symbol:   {symbol}");
    println!("Records:  {}", bars.len());
    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        println!("Period:   {} to {}", first.date, last.date);
    }
    match status {
        Some(status) => println!("Status:   {}", status.label(period)),
        None => println!("Status:   n/a (series shorter than the {period}-period average)"),
    }
    println!();
}
