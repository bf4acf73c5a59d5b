use std::fmt::{Debug, Display};

use crate::{
    Error, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Result,
    ema::Smoothing,
};

/// Default fast EMA span.
pub const DEFAULT_MACD_FAST: usize = 12;
/// Default slow EMA span.
pub const DEFAULT_MACD_SLOW: usize = 26;
/// Default signal line span.
pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// Configuration for the Moving Average Convergence Divergence ([`Macd`])
/// indicator.
///
/// Each span must be at least 1. A span of 1 makes that average equal its
/// input. The fast span is not required to be shorter than the slow one.
///
/// # Example
///
/// ```
/// use overlay_ta::MacdConfig;
///
/// let config = MacdConfig::default_close();
/// assert_eq!(config.fast_length(), 12);
/// assert_eq!(config.slow_length(), 26);
/// assert_eq!(config.signal_length(), 9);
///
/// assert!(MacdConfig::close(0, 26, 9).is_err());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast_length: usize,
    slow_length: usize,
    signal_length: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl MacdConfig {
    /// Span of the fast EMA.
    #[inline]
    #[must_use]
    pub fn fast_length(&self) -> usize {
        self.fast_length
    }

    /// Span of the slow EMA.
    #[inline]
    #[must_use]
    pub fn slow_length(&self) -> usize {
        self.slow_length
    }

    /// Span of the signal line EMA.
    #[inline]
    #[must_use]
    pub fn signal_length(&self) -> usize {
        self.signal_length
    }

    /// MACD on closing price.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if any span is zero.
    pub fn close(fast: usize, slow: usize, signal: usize) -> Result<Self> {
        Self::builder()
            .fast_length(fast)
            .slow_length(slow)
            .signal_length(signal)
            .build()
    }

    /// MACD(12, 26, 9) on closing price.
    #[must_use]
    pub fn default_close() -> Self {
        Self {
            fast_length: DEFAULT_MACD_FAST,
            slow_length: DEFAULT_MACD_SLOW,
            signal_length: DEFAULT_MACD_SIGNAL,
            source: PriceSource::Close,
        }
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self::default_close()
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast_length, self.slow_length, self.signal_length, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: 12 / 26 / 9 on [`PriceSource::Close`].
pub struct MacdConfigBuilder {
    fast_length: usize,
    slow_length: usize,
    signal_length: usize,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast_length: DEFAULT_MACD_FAST,
            slow_length: DEFAULT_MACD_SLOW,
            signal_length: DEFAULT_MACD_SIGNAL,
            source: PriceSource::Close,
        }
    }

    /// Sets the fast EMA span.
    #[inline]
    #[must_use]
    pub fn fast_length(mut self, length: usize) -> Self {
        self.fast_length = length;
        self
    }

    /// Sets the slow EMA span.
    #[inline]
    #[must_use]
    pub fn slow_length(mut self, length: usize) -> Self {
        self.slow_length = length;
        self
    }

    /// Sets the signal line span.
    #[inline]
    #[must_use]
    pub fn signal_length(mut self, length: usize) -> Self {
        self.signal_length = length;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn build(self) -> Result<MacdConfig> {
        Ok(MacdConfig {
            fast_length: Error::check_min("fast_length", self.fast_length, 1)?,
            slow_length: Error::check_min("slow_length", self.slow_length, 1)?,
            signal_length: Error::check_min("signal_length", self.signal_length, 1)?,
            source: self.source,
        })
    }
}

/// MACD output: the MACD line, its signal line, and their difference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacdValue {
    macd: Price,
    signal: Price,
    histogram: Price,
}

impl MacdValue {
    /// Fast EMA minus slow EMA.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// MACD minus signal.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.histogram
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(macd: {}, signal: {}, histogram: {})",
            self.macd, self.signal, self.histogram
        )
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// ```text
/// MACD      = EMA(fast) − EMA(slow)
/// signal    = EMA(MACD, signal_length)
/// histogram = MACD − signal
/// ```
///
/// All three averages are seeded with their first input (see
/// [`Ema`](crate::Ema)), so a value is produced from the first bar: the
/// MACD line starts at 0, and so do the signal and histogram.
///
/// # Example
///
/// ```
/// use overlay_ta::{Macd, MacdConfig, PriceBar};
///
/// let mut macd = Macd::new(MacdConfig::close(1, 3, 1).unwrap());
///
/// let first = macd.compute(&PriceBar::flat(1, 10.0)).unwrap();
/// assert_eq!(first.macd(), 0.0);
///
/// // fast = 14, slow = 10 + 0.5 × 4 = 12
/// let second = macd.compute(&PriceBar::flat(2, 14.0)).unwrap();
/// assert_eq!(second.macd(), 2.0);
/// assert_eq!(second.histogram(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Smoothing,
    slow: Smoothing,
    signal: Smoothing,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            fast: Smoothing::new(config.fast_length),
            slow: Smoothing::new(config.slow_length),
            signal: Smoothing::new(config.signal_length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<MacdValue> {
        let price = self.config.source.extract(ohlcv);

        let macd = self.fast.push(price) - self.slow.push(price);
        let signal = self.signal.push(macd);

        self.current = Some(MacdValue {
            macd,
            signal,
            histogram: macd - signal,
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<MacdValue> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast_length,
            self.config.slow_length,
            self.config.signal_length,
            self.config.source
        )
    }
}
