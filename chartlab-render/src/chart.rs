//! Two-panel chart renderer.
//!
//! Upper panel: candlesticks colored by direction with the rolling-average
//! line overlaid, symbol name and price-vs-average annotation top-left.
//! Lower panel: direction-colored volume bars. Both panels share a
//! record-index x axis (non-trading-day gaps closed); tick labels map the
//! index back to month/year.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

use chartlab_core::domain::Bar;
use chartlab_core::signal::PriceLocation;

use crate::theme::Theme;

/// Output bitmap dimensions in pixels.
pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 800;

/// Pixel rows given to the price panel; the rest is the volume panel.
const PRICE_PANEL_HEIGHT: u32 = CHART_HEIGHT * 3 / 4;

/// Horizontal chrome shared by both panels so their x axes line up.
const MARGIN: u32 = 10;
const Y_LABEL_AREA: u32 = 70;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to draw: the windowed series is empty")]
    EmptySeries,

    #[error("windowed series has {bars} bar(s) but {averages} average value(s)")]
    MisalignedColumns { bars: usize, averages: usize },

    #[error("chart backend error: {0}")]
    Backend(String),
}

/// Everything the renderer needs, already windowed and aligned.
pub struct ChartInput<'a> {
    /// Symbol name drawn top-left (typically the uppercased input stem).
    pub symbol: &'a str,
    /// Windowed bars, ascending by date.
    pub bars: &'a [Bar],
    /// Rolling-average column aligned by position with `bars`.
    pub averages: &'a [Option<f64>],
    /// Classification of the most recent record, when the average exists.
    pub status: Option<PriceLocation>,
    /// Window size of the rolling average, for the annotation text.
    pub sma_period: usize,
}

/// Derive the output path: the input with its extension replaced by
/// `_chart.png`, in the same directory.
pub fn chart_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chart");
    input.with_file_name(format!("{stem}_chart.png"))
}

/// Render the two-panel chart to `path`, overwriting any existing file.
pub fn render_chart(input: &ChartInput, path: &Path, theme: &Theme) -> Result<(), RenderError> {
    if input.bars.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    if input.bars.len() != input.averages.len() {
        return Err(RenderError::MisalignedColumns {
            bars: input.bars.len(),
            averages: input.averages.len(),
        });
    }
    draw(input, path, theme).map_err(|e| RenderError::Backend(e.to_string()))
}

fn draw(
    input: &ChartInput,
    path: &Path,
    theme: &Theme,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&theme.background)?;

    let (upper, lower) = root.split_vertically(PRICE_PANEL_HEIGHT as i32);

    let n = input.bars.len();
    // Half-bar padding keeps the first and last candles fully inside.
    let x_range = -0.5..(n as f64 - 0.5);

    let (y_min, y_max) = price_bounds(input);
    let range = y_max - y_min;
    let pad = if range > 0.0 { range * 0.05 } else { 1.0 };

    let label_font = ("sans-serif", 14).into_font().color(&theme.text);

    // ── Price panel ──────────────────────────────────────────────────
    let mut price_chart = ChartBuilder::on(&upper)
        .margin(MARGIN as i32)
        .y_label_area_size(Y_LABEL_AREA as i32)
        .x_label_area_size(0)
        .build_cartesian_2d(x_range.clone(), (y_min - pad)..(y_max + pad))?;

    price_chart
        .configure_mesh()
        .y_labels(6)
        .axis_style(theme.grid.mix(0.8))
        .bold_line_style(theme.grid.mix(0.3))
        .light_line_style(theme.grid.mix(0.1))
        .label_style(label_font.clone())
        .y_label_formatter(&|v| format!("{v:.1}"))
        .draw()?;

    let candle_px = candle_width_px(n);
    price_chart.draw_series(input.bars.iter().enumerate().map(|(i, bar)| {
        // close >= open is an up candle; plotters' own gain/loss split
        // would color a doji as a loss, so pick the style ourselves.
        let style = if bar.is_up() {
            theme.up.filled()
        } else {
            theme.down.filled()
        };
        CandleStick::new(
            i as f64, bar.open, bar.high, bar.low, bar.close, style, style, candle_px,
        )
    }))?;

    price_chart.draw_series(LineSeries::new(
        input
            .averages
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v))),
        theme.average.stroke_width(2),
    ))?;

    // Symbol and status annotation, in panel pixel coordinates.
    upper.draw(&Text::new(
        input.symbol.to_string(),
        ((MARGIN + Y_LABEL_AREA + 15) as i32, 20),
        ("sans-serif", 28).into_font().color(&theme.text),
    ))?;
    if let Some(status) = input.status {
        let dot = theme.status_color(status);
        upper.draw(&Circle::new(
            ((MARGIN + Y_LABEL_AREA + 21) as i32, 66),
            5,
            dot.filled(),
        ))?;
        upper.draw(&Text::new(
            status.label(input.sma_period),
            ((MARGIN + Y_LABEL_AREA + 33) as i32, 58),
            ("sans-serif", 16).into_font().color(&theme.text),
        ))?;
    }

    // ── Volume panel ─────────────────────────────────────────────────
    let max_volume = input
        .bars
        .iter()
        .map(|b| b.volume)
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let mut volume_chart = ChartBuilder::on(&lower)
        .margin(MARGIN as i32)
        .y_label_area_size(Y_LABEL_AREA as i32)
        .x_label_area_size(30)
        .build_cartesian_2d(x_range, 0.0..max_volume * 1.05)?;

    volume_chart
        .configure_mesh()
        .x_labels(10)
        .y_labels(4)
        .axis_style(theme.grid.mix(0.8))
        .bold_line_style(theme.grid.mix(0.3))
        .light_line_style(theme.grid.mix(0.1))
        .label_style(label_font)
        .x_label_formatter(&|x| month_label(input.bars, *x))
        .y_label_formatter(&|v| format_volume(*v))
        .draw()?;

    volume_chart.draw_series(input.bars.iter().enumerate().map(|(i, bar)| {
        let color = if bar.is_up() { theme.up } else { theme.down };
        let x = i as f64;
        // Full-width bars: adjacent records touch, like the candles' axis.
        Rectangle::new([(x - 0.5, 0.0), (x + 0.5, bar.volume as f64)], color.filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Price bounds over lows/highs and any defined average values.
fn price_bounds(input: &ChartInput) -> (f64, f64) {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for bar in input.bars {
        y_min = y_min.min(bar.low);
        y_max = y_max.max(bar.high);
    }
    for avg in input.averages.iter().flatten() {
        y_min = y_min.min(*avg);
        y_max = y_max.max(*avg);
    }
    (y_min, y_max)
}

/// Candle body width in pixels: 60% of the per-record slot, at least 1.
fn candle_width_px(n: usize) -> u32 {
    let plot_width = (CHART_WIDTH - 2 * MARGIN - Y_LABEL_AREA) as f64;
    let slot = plot_width / n.max(1) as f64;
    (slot * 0.6).max(1.0) as u32
}

/// Map a record-index tick back to the record's month/year.
fn month_label(bars: &[Bar], x: f64) -> String {
    if x < 0.0 {
        return String::new();
    }
    match bars.get(x.round() as usize) {
        Some(bar) => bar.date.format("%b %y").to_string(),
        None => String::new(),
    }
}

/// Humanize a volume axis value: 1200000 → "1.2M".
fn format_volume(v: f64) -> String {
    if v >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        format!("{v:.0}")
    }
}
