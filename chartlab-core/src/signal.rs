//! Price-vs-average classification.
//!
//! Annotates the most recent displayed record with where the close sits
//! relative to the rolling average. Comparison is exact: `On` requires
//! equality, not a tolerance band.

use serde::{Deserialize, Serialize};

/// Where the close sits relative to the rolling average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceLocation {
    Above,
    Below,
    On,
}

impl PriceLocation {
    /// Classify a close against a defined average.
    pub fn classify(close: f64, average: f64) -> Self {
        if close > average {
            Self::Above
        } else if close < average {
            Self::Below
        } else {
            Self::On
        }
    }

    /// Annotation text for the chart, e.g. `Above (150) SMA`.
    pub fn label(&self, period: usize) -> String {
        let word = match self {
            Self::Above => "Above",
            Self::Below => "Below",
            Self::On => "On",
        };
        format!("{word} ({period}) SMA")
    }
}
