//! Indicator engine for candlestick chart overlays.
//!
//! Computes simple and exponential moving averages, RSI and MACD over an
//! ordered series of OHLC bars. Output series are aligned index-for-index
//! with the input; warm-up points are `None`.
//!
//! Two ways in:
//!
//! - Batch: [`compute_sma`], [`compute_ema`], [`compute_rsi`],
//!   [`compute_macd`] (or [`compute_overlays`] for a whole chart) over a
//!   validated [`PriceSeries`].
//! - Streaming: [`Sma`], [`Ema`], [`Rsi`], [`Macd`] fed one bar at a time.
//!   Each exposes [`new`](Sma::new), [`compute`](Sma::compute), and
//!   [`value`](Sma::value) as inherent methods, no trait import
//!   needed. Import [`Indicator`] only for generic code.
//!
//! ```
//! use overlay_ta::{PriceBar, PriceSeries, compute_rsi};
//!
//! let series = PriceSeries::new(
//!     [1.0, 2.0, 3.0, 4.0, 5.0]
//!         .iter()
//!         .zip(1..)
//!         .map(|(&close, t)| PriceBar::flat(t, close))
//!         .collect(),
//! )
//! .unwrap();
//!
//! let rsi = compute_rsi(&series, 2).unwrap();
//! assert_eq!(
//!     rsi.values().collect::<Vec<_>>(),
//!     vec![None, None, Some(100.0), Some(100.0), Some(100.0)],
//! );
//! ```

mod cache;
mod ema;
mod engine;
mod error;
mod indicator;
mod macd;
mod ohlcv;
mod overlay;
mod price_source;
mod request;
mod rolling_window;
mod rsi;
mod series;
mod sma;

pub use crate::error::{Error, Result};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder, MIN_LENGTH};
pub use crate::ohlcv::{Ohlcv, Price, PriceBar, Timestamp};
pub use crate::price_source::PriceSource;
pub use crate::series::{IndicatorPoint, IndicatorSeries, PriceSeries};

pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::macd::{
    DEFAULT_MACD_FAST, DEFAULT_MACD_SIGNAL, DEFAULT_MACD_SLOW, Macd, MacdConfig,
    MacdConfigBuilder, MacdValue,
};
pub use crate::rsi::{DEFAULT_RSI_LENGTH, Rsi, RsiConfig, RsiConfigBuilder};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};

pub use crate::engine::{
    MacdSeries, compute_ema, compute_macd, compute_macd_with, compute_rsi, compute_sma,
    compute_with,
};
pub use crate::overlay::{
    DEFAULT_EMA_LENGTH, DEFAULT_SMA_LENGTH, MAX_OVERLAY_LENGTH, MacdOverlay, MacdPeriods, Overlay,
    OverlaySettings, Overlays, compute_overlays,
};

pub use crate::cache::{DEFAULT_TTL, SeriesCache};
pub use crate::request::{ChartRequest, Interval};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Rsi, RsiConfig, Price);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);

#[cfg(test)]
mod test_util;
