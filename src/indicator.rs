use crate::{Ohlcv, PriceSource, Result};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Smallest window accepted by [`Sma`](crate::Sma), [`Ema`](crate::Ema) and
/// [`Rsi`](crate::Rsi).
pub const MIN_LENGTH: usize = 2;

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (length, price source, etc). Configs are value types: cheap to clone,
/// compare, and hash.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Price source to extract from each bar.
    fn source(&self) -> &PriceSource;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the price source.
    #[must_use]
    fn source(self, source: PriceSource) -> Self;

    /// Validates the parameters and builds the config.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) when a
    /// required field is missing or out of range.
    fn build(self) -> Result<Config>;
}

/// A streaming technical indicator.
///
/// Indicators maintain internal state and update incrementally on each call
/// to [`compute`](Indicator::compute), one call per bar. Output is `None`
/// until enough bars have been seen.
///
/// # Example
///
/// ```
/// use overlay_ta::{Indicator, PriceBar, Sma, SmaConfig};
///
/// let mut sma = Sma::new(SmaConfig::close(3).unwrap());
///
/// assert_eq!(sma.compute(&PriceBar::flat(1, 10.0)), None);
/// assert_eq!(sma.compute(&PriceBar::flat(2, 20.0)), None);
/// assert_eq!(sma.compute(&PriceBar::flat(3, 30.0)), Some(20.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for single-line indicators,
    /// a struct for composite ones (e.g. MACD).
    type Output: Send + Sync + Copy + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds the next bar and returns the updated indicator value,
    /// or `None` if not enough history has been seen.
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed indicator value without advancing state.
    fn value(&self) -> Option<Self::Output>;
}
