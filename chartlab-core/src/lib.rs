//! ChartLab Core — price series domain types and the data pipeline.
//!
//! This crate contains everything up to (but not including) rendering:
//! - Domain types (daily OHLCV bars)
//! - Delimited-file loader with column resolution and data-quality checks
//! - Rolling simple-moving-average indicator
//! - Price-vs-average classification
//! - Trailing date-window selection

pub mod data;
pub mod domain;
pub mod indicators;
pub mod signal;
pub mod window;

/// Rolling-average window used for the overlay and classification.
pub const SMA_PERIOD: usize = 150;
