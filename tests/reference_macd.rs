mod fixtures;

use fixtures::{assert_near, load_macd_ref, load_reference_bars, load_reference_series};
use overlay_ta::{Macd, MacdConfig, compute_macd};

const REF_PATH: &str = "tests/fixtures/data/macd-12-26-9-close.csv";

/// Tolerance: 1e-9.
/// All three lines are recursively smoothed from the first bar.
const TOLERANCE: f64 = 1e-9;

#[test]
fn macd_12_26_9_close_matches_reference() {
    let series = load_reference_series();
    let reference = load_macd_ref(REF_PATH);

    let macd = compute_macd(&series, 12, 26, 9).unwrap();

    assert_eq!(macd.len(), reference.len());

    for (i, expected) in reference.iter().enumerate() {
        let context = |line: &str| format!("MACD {line} at bar {i} (t={})", expected.timestamp);

        assert_eq!(macd.macd[i].timestamp, expected.timestamp);
        assert_near(
            macd.macd[i].value.unwrap(),
            expected.macd,
            TOLERANCE,
            &context("line"),
        );
        assert_near(
            macd.signal[i].value.unwrap(),
            expected.signal,
            TOLERANCE,
            &context("signal"),
        );
        assert_near(
            macd.histogram[i].value.unwrap(),
            expected.histogram,
            TOLERANCE,
            &context("histogram"),
        );
    }
}

#[test]
fn histogram_is_exactly_macd_minus_signal() {
    let series = load_reference_series();

    for (fast, slow, signal) in [(12, 26, 9), (5, 35, 5), (26, 12, 9), (1, 2, 1)] {
        let macd = compute_macd(&series, fast, slow, signal).unwrap();

        for i in 0..macd.len() {
            let (m, s, h) = (
                macd.macd[i].value.unwrap(),
                macd.signal[i].value.unwrap(),
                macd.histogram[i].value.unwrap(),
            );
            assert_eq!(h.to_bits(), (m - s).to_bits(), "MACD({fast},{slow},{signal}) at {i}");
        }
    }
}

#[test]
fn macd_streaming_matches_batch() {
    let series = load_reference_series();
    let batch = compute_macd(&series, 12, 26, 9).unwrap();

    let mut macd = Macd::new(MacdConfig::default_close());
    for (i, bar) in load_reference_bars().iter().enumerate() {
        let value = macd.compute(bar).unwrap();
        assert_eq!(Some(value.macd()), batch.macd[i].value);
        assert_eq!(Some(value.signal()), batch.signal[i].value);
        assert_eq!(Some(value.histogram()), batch.histogram[i].value);
    }
}
