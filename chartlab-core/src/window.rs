//! Trailing date-window selection.
//!
//! Selects the sub-sequence of the series whose dates fall within a
//! duration in years measured backward from the last date. Returns the
//! start index so callers can slice the bar vector and any aligned
//! indicator columns consistently.

use chrono::Duration;
use thiserror::Error;

use crate::domain::Bar;

/// Days per year used for the cutoff, matching calendar-days windowing.
const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window length must be a positive number of years (got {years})")]
    NonPositiveYears { years: f64 },
}

/// Index of the first bar inside the trailing window of `years` years.
///
/// The cutoff is `last date - years * 365 days`, honoring fractional years
/// at sub-day precision; bars strictly after the cutoff are retained. A
/// window longer than the available history clamps to the full series.
/// `bars` must be sorted ascending by date (the loader guarantees this).
pub fn trailing_window(bars: &[Bar], years: f64) -> Result<usize, WindowError> {
    if !years.is_finite() || years <= 0.0 {
        return Err(WindowError::NonPositiveYears { years });
    }

    let Some(last) = bars.last() else {
        return Ok(0);
    };

    let span = Duration::seconds((years * DAYS_PER_YEAR * 86_400.0) as i64);

    // Ascending dates mean descending ages, so "too old" is a prefix.
    // A bar is kept when it sits strictly after `last - span`.
    let start = bars.partition_point(|b| last.date - b.date >= span);
    Ok(start)
}
