use std::fmt::{Debug, Display};

use crate::{
    Error, Indicator, IndicatorConfig, IndicatorConfigBuilder, MIN_LENGTH, Ohlcv, Price,
    PriceSource, Result,
};

/// Configuration for the Exponential Moving Average ([`Ema`])
/// indicator.
///
/// # Example
///
/// ```
/// use overlay_ta::EmaConfig;
///
/// let config = EmaConfig::close(21).unwrap();
///
/// assert_eq!(config.length(), 21);
/// assert!((config.alpha() - 2.0 / 22.0).abs() < f64::EPSILON);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl EmaConfig {
    /// Span of the average (number of bars).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Smoothing factor `2 / (length + 1)`.
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f64 {
        Smoothing::alpha_for(self.length)
    }

    /// EMA on closing price.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `length` is below [`MIN_LENGTH`].
    pub fn close(length: usize) -> Result<Self> {
        Self::builder().length(length).build()
    }

    /// EMA on median price: `(high + low) / 2`.
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

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`EmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct EmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl EmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the span of the average.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length.replace(length);
        self
    }
}

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn build(self) -> Result<EmaConfig> {
        let length = self
            .length
            .ok_or_else(|| Error::invalid("length", "length is required"))?;

        Ok(EmaConfig {
            length: Error::check_min("length", length, MIN_LENGTH)?,
            source: self.source,
        })
    }
}

/// Recursive exponential smoothing seeded with the first input.
///
/// Shared by [`Ema`] and the MACD signal line, which smooths derived values
/// rather than bar prices.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Smoothing {
    alpha: f64,
    current: Option<f64>,
}

impl Smoothing {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn alpha_for(length: usize) -> f64 {
        2.0 / (length + 1) as f64
    }

    pub(crate) fn new(length: usize) -> Self {
        Self {
            alpha: Self::alpha_for(length),
            current: None,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: f64) -> f64 {
        let next = match self.current {
            None => value,
            // α·value + (1 − α)·previous, fused so a constant input stays exact
            Some(previous) => self.alpha.mul_add(value - previous, previous),
        };
        self.current = Some(next);

        next
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<f64> {
        self.current
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (length + 1)`. Each value is computed as:
///
/// ```text
/// EMA = α × price + (1 − α) × prev_EMA
/// ```
///
/// The first bar seeds the average with its own price, so a value is
/// available from the very first bar. There is no warm-up masking: the
/// recursion needs only a seed, not a full window. The seed's influence
/// decays geometrically with `(1 − α)` per bar.
///
/// # Example
///
/// ```
/// use overlay_ta::{Ema, EmaConfig, PriceBar};
///
/// let mut ema = Ema::new(EmaConfig::close(3).unwrap());
///
/// // Seeded with the first close
/// assert_eq!(ema.compute(&PriceBar::flat(1, 2.0)), Some(2.0));
///
/// // EMA(3) α = 0.5: 4 × 0.5 + 2 × 0.5 = 3.0
/// assert_eq!(ema.compute(&PriceBar::flat(2, 4.0)), Some(3.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    smoothing: Smoothing,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            smoothing: Smoothing::new(config.length),
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        Some(self.smoothing.push(self.config.source.extract(ohlcv)))
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.smoothing.value()
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length, self.config.source)
    }
}
