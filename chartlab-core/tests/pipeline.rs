//! End-to-end core pipeline: load → indicator → window → classify.
//!
//! Exercises the stages together against a real on-disk fixture, the way
//! the CLI drives them.

use std::io::Write;

use chartlab_core::data::load_series;
use chartlab_core::indicators::Sma;
use chartlab_core::signal::PriceLocation;
use chartlab_core::window::trailing_window;
use chartlab_core::SMA_PERIOD;
use chrono::{Duration, NaiveDate};

/// Write a 200-row daily CSV with linearly rising closes.
fn write_series(days: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    writeln!(file, "Date,Time,Open,High,Low,Close,Vol,OI").unwrap();
    for i in 0..days {
        let date = start + Duration::days(i as i64);
        let close = 100.0 + i as f64;
        writeln!(
            file,
            "{date},00:00:00,{open},{high},{low},{close},{vol},0",
            open = close - 0.5,
            high = close + 1.0,
            low = close - 1.5,
            vol = 10_000 + i
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn full_pipeline_on_200_rows() {
    let file = write_series(200);
    let loaded = load_series(file.path()).unwrap();
    assert_eq!(loaded.bars.len(), 200);
    assert!(loaded.warnings.is_empty());

    let sma = Sma::new(SMA_PERIOD);
    let averages = sma.compute(&loaded.bars);
    assert_eq!(averages.len(), 200);
    assert!(averages[SMA_PERIOD - 2].is_none());
    assert!(averages[SMA_PERIOD - 1].is_some());

    // Window over the full series: 200 days < 1 year, clamps to everything.
    let start = trailing_window(&loaded.bars, 1.0).unwrap();
    assert_eq!(start, 0);

    let bars = &loaded.bars[start..];
    let averages = &averages[start..];

    // Rising closes: the last close sits above its trailing mean.
    let last_avg = averages.last().unwrap().unwrap();
    let last_close = bars.last().unwrap().close;
    assert_eq!(
        PriceLocation::classify(last_close, last_avg),
        PriceLocation::Above
    );
}

#[test]
fn short_series_degrades_to_no_indicator() {
    let file = write_series(30);
    let loaded = load_series(file.path()).unwrap();

    let averages = Sma::new(SMA_PERIOD).compute(&loaded.bars);
    assert!(averages.iter().all(|v| v.is_none()));

    // Windowing still works without the indicator.
    let start = trailing_window(&loaded.bars, 1.0).unwrap();
    assert_eq!(start, 0);
}

#[test]
fn windowed_slices_stay_aligned() {
    let file = write_series(200);
    let loaded = load_series(file.path()).unwrap();
    let averages = Sma::new(20).compute(&loaded.bars);

    let start = trailing_window(&loaded.bars, 0.25).unwrap();
    assert!(start > 0);

    let bars = &loaded.bars[start..];
    let averages = &averages[start..];
    assert_eq!(bars.len(), averages.len());

    // Every displayed average equals the mean over the FULL series window,
    // i.e. windowing did not shift the indicator column.
    let full = &loaded.bars;
    for (offset, avg) in averages.iter().enumerate() {
        let i = start + offset;
        if let Some(avg) = avg {
            let mean: f64 =
                full[i + 1 - 20..=i].iter().map(|b| b.close).sum::<f64>() / 20.0;
            assert!((avg - mean).abs() < 1e-9);
        }
    }
}
