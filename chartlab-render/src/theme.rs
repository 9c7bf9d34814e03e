//! Dark theme tokens for chart rendering.
//!
//! # Color Palette
//! - **Background**: near-black charcoal
//! - **Grid/Text**: mid gray, used for axes, labels, and the symbol name
//! - **Up**: bright green (rising candles and their volume bars)
//! - **Down**: soft red (falling candles and their volume bars)
//! - **Average**: light gray (rolling-average line)
//! - **On-status**: yellow (close sitting exactly on the average)

use chartlab_core::signal::PriceLocation;
use plotters::style::RGBColor;

/// Theme tokens for the two-panel chart.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (both panels and figure surround)
    pub background: RGBColor,
    /// Grid lines and axis labels
    pub grid: RGBColor,
    /// Text (symbol name, annotation)
    pub text: RGBColor,
    /// Rising candles and their volume bars
    pub up: RGBColor,
    /// Falling candles and their volume bars
    pub down: RGBColor,
    /// Rolling-average overlay line
    pub average: RGBColor,
    /// Status dot when the close sits exactly on the average
    pub on_status: RGBColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            background: RGBColor(0x0f, 0x0f, 0x0f),
            grid: RGBColor(0x86, 0x86, 0x86),
            text: RGBColor(0x86, 0x86, 0x86),
            up: RGBColor(0x15, 0xff, 0x25),
            down: RGBColor(0xff, 0x84, 0x86),
            average: RGBColor(0xe2, 0xe2, 0xe2),
            on_status: RGBColor(0xff, 0xff, 0x00),
        }
    }

    /// Status dot color for a price-vs-average classification.
    pub fn status_color(&self, status: PriceLocation) -> RGBColor {
        match status {
            PriceLocation::Above => self.up,
            PriceLocation::Below => self.down,
            PriceLocation::On => self.on_status,
        }
    }
}
