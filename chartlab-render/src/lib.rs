//! ChartLab Render — static two-panel chart output.
//!
//! Takes a windowed bar series with its aligned rolling-average column and
//! writes a dark-theme PNG: candlestick panel with the average overlaid on
//! top, volume bars below, sharing one record-index x axis.

pub mod chart;
pub mod theme;

pub use chart::{chart_output_path, render_chart, ChartInput, RenderError};
pub use theme::Theme;
