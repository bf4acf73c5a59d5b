#![allow(dead_code)]

use overlay_ta::{IndicatorSeries, Ohlcv, Price, PriceSeries, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// OHLC bar parsed from the reference CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub timestamp: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.timestamp
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub timestamp: u64,
    pub expected: f64,
}

/// Reference MACD value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub timestamp: u64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

const OHLC_PATH: &str = "tests/fixtures/data/aapl-1h.csv";

/// Load the reference OHLC bars.
pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(OHLC_PATH, "invalid OHLC record")
}

/// Load the reference bars as a validated series.
pub fn load_reference_series() -> PriceSeries<RefBar> {
    PriceSeries::new(load_reference_bars()).expect("reference bars are ordered")
}

/// Load single-value reference data (SMA, EMA, RSI).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load MACD reference data (macd, signal, histogram).
pub fn load_macd_ref(path: &str) -> Vec<RefMacdValue> {
    load_records(path, "invalid MACD reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert `actual` is `None` before the first reference timestamp and
/// matches every reference value after it.
pub fn assert_series_matches(
    actual: &IndicatorSeries,
    reference: &[RefValue],
    tolerance: f64,
    name: &str,
) {
    let first = reference.first().expect("reference is not empty").timestamp;
    let warm_up = actual.iter().take_while(|p| p.timestamp < first);

    for point in warm_up {
        assert_eq!(
            point.value, None,
            "{name} defined during warm-up at t={}",
            point.timestamp
        );
    }

    let defined: Vec<_> = actual.iter().filter(|p| p.timestamp >= first).collect();
    assert_eq!(
        defined.len(),
        reference.len(),
        "{name}: reference covers {} bars, output {}",
        reference.len(),
        defined.len()
    );

    for (i, (point, expected)) in defined.iter().zip(reference).enumerate() {
        assert_eq!(point.timestamp, expected.timestamp, "{name}: misaligned at {i}");
        let value = point
            .value
            .unwrap_or_else(|| panic!("{name} returned None at t={}", point.timestamp));
        assert_near(
            value,
            expected.expected,
            tolerance,
            &format!("{name} at bar {i} (t={})", point.timestamp),
        );
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
