use std::fmt::{Debug, Display};

use crate::{
    Error, Indicator, IndicatorConfig, IndicatorConfigBuilder, MIN_LENGTH, Ohlcv, Price,
    PriceSource, Result, rolling_window::RollingWindow,
};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use overlay_ta::SmaConfig;
///
/// let config = SmaConfig::close(20).unwrap();
/// assert_eq!(config.length(), 20);
///
/// assert!(SmaConfig::close(1).is_err());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl SmaConfig {
    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// SMA on closing price.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `length` is below [`MIN_LENGTH`].
    pub fn close(length: usize) -> Result<Self> {
        Self::builder().length(length).build()
    }

    /// SMA on median price: `(high + low) / 2`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `length` is below [`MIN_LENGTH`].
    pub fn hl2(length: usize) -> Result<Self> {
        Self::builder()
            .length(length)
            .source(PriceSource::HL2)
            .build()
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`SmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct SmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the window length.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length.replace(length);
        self
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn build(self) -> Result<SmaConfig> {
        let length = self
            .length
            .ok_or_else(|| Error::invalid("length", "length is required"))?;

        Ok(SmaConfig {
            length: Error::check_min("length", length, MIN_LENGTH)?,
            source: self.source,
        })
    }
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the last *n* values, where *n* is the
/// configured window length. Returns `None` until the window is full, so the
/// first value appears on bar *n*.
///
/// Uses a running sum for O(1) updates per bar.
///
/// # Example
///
/// ```rust
/// use overlay_ta::{PriceBar, Sma, SmaConfig};
///
/// let mut sma = Sma::new(SmaConfig::close(3).unwrap());
///
/// assert_eq!(sma.compute(&PriceBar::flat(1, 10.0)), None);
/// assert_eq!(sma.compute(&PriceBar::flat(2, 20.0)), None);
/// assert_eq!(sma.compute(&PriceBar::flat(3, 30.0)), Some(20.0));
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    window: RollingWindow,
    current: Option<Price>,
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: RollingWindow::new(config.length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Price> {
        self.window.push(self.config.source.extract(kline));
        self.current = self.window.mean();

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.length, self.config.source)
    }
}
