use std::fmt::Display;

use crate::{
    Error, Indicator, IndicatorConfig, IndicatorConfigBuilder, MIN_LENGTH, Ohlcv, Price,
    PriceSource, Result, rolling_window::RollingWindow,
};

/// Default RSI window.
pub const DEFAULT_RSI_LENGTH: usize = 14;

/// Configuration for the Relative Strength Index ([`Rsi`])
/// indicator.
///
/// Average gain and loss are simple means over the last `length` price
/// changes. Output begins at bar `length + 1`.
///
/// # Example
///
/// ```
/// use overlay_ta::RsiConfig;
///
/// let config = RsiConfig::close(14).unwrap();
/// assert_eq!(config.length(), 14);
/// assert_eq!(RsiConfig::default(), config);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl RsiConfig {
    /// Number of price changes averaged.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// RSI on closing price.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `length` is below [`MIN_LENGTH`].
    pub fn close(length: usize) -> Result<Self> {
        Self::builder().length(length).build()
    }
}

impl Default for RsiConfig {
    /// RSI(14) on closing price.
    fn default() -> Self {
        Self {
            length: DEFAULT_RSI_LENGTH,
            source: PriceSource::Close,
        }
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct RsiConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl RsiConfigBuilder {
    #[must_use]
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the number of price changes to average.
    #[inline]
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn build(self) -> Result<RsiConfig> {
        let length = self
            .length
            .ok_or_else(|| Error::invalid("length", "length is required"))?;

        Ok(RsiConfig {
            length: Error::check_min("length", length, MIN_LENGTH)?,
            source: self.source,
        })
    }
}

/// Relative Strength Index (RSI) over simple rolling averages.
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// Each bar after the first contributes one price change, split into a
/// gain and a loss. Once `length` changes are collected:
///
/// ```text
/// avg_gain = mean(gains over last length changes)
/// avg_loss = mean(losses over last length changes)
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
///          = 100 × avg_gain / (avg_gain + avg_loss)
/// ```
///
/// The second form is the one evaluated. With no losses in the window RSI
/// is 100, with no gains it is 0, and a window with neither (flat price)
/// reads as a neutral 50. The result never carries NaN or infinity.
///
/// # Example
///
/// ```
/// use overlay_ta::{PriceBar, Rsi, RsiConfig};
///
/// let mut rsi = Rsi::new(RsiConfig::close(3).unwrap());
///
/// // Need 3 price changes (4 bars)
/// assert_eq!(rsi.compute(&PriceBar::flat(1, 10.0)), None);
/// assert_eq!(rsi.compute(&PriceBar::flat(2, 12.0)), None);
/// assert_eq!(rsi.compute(&PriceBar::flat(3, 11.0)), None);
///
/// // Bar 4: changes = +2, −1, +2 → avg_gain=4/3, avg_loss=1/3 → RSI=80
/// assert_eq!(rsi.compute(&PriceBar::flat(4, 13.0)), Some(80.0));
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    prev_price: Option<Price>,
    gains: RollingWindow,
    losses: RollingWindow,
    current: Option<Price>,
}

impl Rsi {
    /// Neutral reading for a window without any price movement.
    pub const NEUTRAL: Price = 50.0;

    #[inline]
    fn gain_and_loss(prev: Price, price: Price) -> (Price, Price) {
        let change = price - prev;
        (change.max(0.0), (-change).max(0.0))
    }

    /// Averages share the window length, so the ratio is taken on sums.
    #[inline]
    #[allow(clippy::float_cmp)]
    fn rsi_from_sums(sum_gain: Price, sum_loss: Price) -> Price {
        let total = sum_gain + sum_loss;

        if total == 0.0 {
            Self::NEUTRAL
        } else if sum_loss == 0.0 {
            100.0
        } else {
            (100.0 * sum_gain / total).clamp(0.0, 100.0)
        }
    }
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            prev_price: None,
            gains: RollingWindow::new(config.length),
            losses: RollingWindow::new(config.length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let price = self.config.source.extract(ohlcv);

        // First bar: no previous price, no change
        if let Some(prev) = self.prev_price.replace(price) {
            let (gain, loss) = Self::gain_and_loss(prev, price);
            self.gains.push(gain);
            self.losses.push(loss);

            self.current = self
                .gains
                .sum()
                .zip(self.losses.sum())
                .map(|(sum_gain, sum_loss)| Self::rsi_from_sums(sum_gain, sum_loss));
        }

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.length, self.config.source)
    }
}
