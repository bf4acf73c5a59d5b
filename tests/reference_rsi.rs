mod fixtures;

use fixtures::{assert_series_matches, load_ref_values, load_reference_bars, load_reference_series};
use overlay_ta::{Rsi, RsiConfig, compute_rsi};

const REF_PATH: &str = "tests/fixtures/data/rsi-14-close.csv";

/// Tolerance: 1e-9.
/// Simple rolling averages: no infinite memory, only running-sum drift.
const TOLERANCE: f64 = 1e-9;

#[test]
fn rsi_14_close_matches_reference() {
    let series = load_reference_series();
    let reference = load_ref_values(REF_PATH);

    let rsi = compute_rsi(&series, 14).unwrap();

    assert_eq!(rsi.first_defined(), Some(14));
    assert_series_matches(&rsi, &reference, TOLERANCE, "RSI(14)");
}

#[test]
fn rsi_stays_in_range_for_all_periods() {
    let series = load_reference_series();

    for period in 2..=30 {
        let rsi = compute_rsi(&series, period).unwrap();
        for value in rsi.values().flatten() {
            assert!(
                (0.0..=100.0).contains(&value),
                "RSI({period}) out of range: {value}"
            );
        }
    }
}

#[test]
fn rsi_14_streaming_matches_batch() {
    let series = load_reference_series();
    let batch = compute_rsi(&series, 14).unwrap();

    let mut rsi = Rsi::new(RsiConfig::default());
    for (bar, point) in load_reference_bars().iter().zip(&batch) {
        assert_eq!(rsi.compute(bar), point.value);
    }
}
