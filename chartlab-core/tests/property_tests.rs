//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. SMA definedness — a value exists exactly when a full window exists
//! 2. SMA correctness — every defined value equals the brute-force mean
//! 3. Window retention — selected bars all sit after the cutoff
//! 4. Classification trichotomy — exactly one of above/below/on holds

use chartlab_core::domain::Bar;
use chartlab_core::indicators::Sma;
use chartlab_core::signal::PriceLocation;
use chartlab_core::window::trailing_window;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: base + Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        })
        .collect()
}

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10.0..500.0_f64, 0..60)
}

// ── 1 & 2. SMA definedness and correctness ───────────────────────────

proptest! {
    #[test]
    fn sma_defined_iff_full_window(closes in arb_closes(), period in 1..12usize) {
        let bars = bars_from_closes(&closes);
        let result = Sma::new(period).compute(&bars);
        prop_assert_eq!(result.len(), bars.len());
        for (i, value) in result.iter().enumerate() {
            prop_assert_eq!(value.is_some(), i + 1 >= period, "index {}", i);
        }
    }

    #[test]
    fn sma_matches_brute_force_mean(closes in arb_closes(), period in 1..12usize) {
        let bars = bars_from_closes(&closes);
        let result = Sma::new(period).compute(&bars);
        for (i, value) in result.iter().enumerate() {
            if let Some(value) = value {
                let mean = closes[i + 1 - period..=i].iter().sum::<f64>() / period as f64;
                prop_assert!((value - mean).abs() < 1e-6);
            }
        }
    }
}

// ── 3. Window retention ──────────────────────────────────────────────

proptest! {
    #[test]
    fn window_keeps_exactly_the_trailing_span(
        days in 1..800usize,
        years in 0.1..3.0_f64,
    ) {
        let closes = vec![100.0; days];
        let bars = bars_from_closes(&closes);
        let start = trailing_window(&bars, years).unwrap();
        prop_assert!(start <= bars.len());

        let last = bars.last().unwrap().date;
        let span_days = years * 365.0;
        for bar in &bars[start..] {
            let age = (last - bar.date).num_days() as f64;
            prop_assert!(age < span_days);
        }
        if start > 0 {
            // The cutoff truncates to whole seconds, so allow 1s of slack.
            let age_secs = (last - bars[start - 1].date).num_seconds() as f64;
            prop_assert!(age_secs >= span_days * 86_400.0 - 1.0);
        }
    }
}

// ── 4. Classification trichotomy ─────────────────────────────────────

proptest! {
    #[test]
    fn classification_is_a_trichotomy(close in 1.0..1000.0_f64, avg in 1.0..1000.0_f64) {
        let location = PriceLocation::classify(close, avg);
        let expected = if close > avg {
            PriceLocation::Above
        } else if close < avg {
            PriceLocation::Below
        } else {
            PriceLocation::On
        };
        prop_assert_eq!(location, expected);
    }
}
