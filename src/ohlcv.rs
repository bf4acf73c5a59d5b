/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar open timestamp or sequence number.
///
/// Epoch milliseconds for bars produced by a market-data provider, but any
/// strictly increasing sequence works.
pub type Timestamp = u64;

/// OHLC bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. Indicators accept `&impl Ohlcv` and extract the
/// configured [`PriceSource`](crate::PriceSource) internally.
///
/// # Example
///
/// ```
/// use overlay_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar open timestamp or sequence number.
    ///
    /// Must be strictly increasing across the bars of a
    /// [`PriceSeries`](crate::PriceSeries).
    fn open_time(&self) -> Timestamp;
}

/// A single candlestick as delivered by the data-fetch layer.
///
/// # Example
///
/// ```
/// use overlay_ta::{Ohlcv, PriceBar};
///
/// let bar = PriceBar::new(1_700_000_000_000, 10.0, 12.0, 9.5, 11.0);
/// assert_eq!(bar.close(), 11.0);
/// assert_eq!(bar.open_time(), 1_700_000_000_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBar {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl PriceBar {
    #[must_use]
    pub fn new(timestamp: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Bar whose open, high, low and close are all `price`.
    #[must_use]
    pub fn flat(timestamp: Timestamp, price: Price) -> Self {
        Self::new(timestamp, price, price, price, price)
    }
}

impl Ohlcv for PriceBar {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn open_time(&self) -> Timestamp {
        self.timestamp
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn flat_bar_repeats_price() {
        let bar = PriceBar::flat(7, 3.5);
        assert_eq!(bar, PriceBar::new(7, 3.5, 3.5, 3.5, 3.5));
    }
}
