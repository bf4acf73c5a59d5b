//! Batch indicator computation over a whole [`PriceSeries`].
//!
//! Every function feeds the series bar by bar through the corresponding
//! streaming indicator and records each output, so the result is aligned
//! index-for-index with the input. Series shorter than two bars produce an
//! all-`None` result of the same length.

use tracing::debug;

use crate::{
    Ema, EmaConfig, Indicator, IndicatorSeries, Macd, MacdConfig, Ohlcv, Price, PriceSeries,
    Result, Rsi, RsiConfig, Sma, SmaConfig,
};

/// The three aligned series of a MACD computation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MacdSeries {
    /// Fast EMA minus slow EMA.
    pub macd: IndicatorSeries,
    /// EMA of the MACD line.
    pub signal: IndicatorSeries,
    /// MACD minus signal.
    pub histogram: IndicatorSeries,
}

impl MacdSeries {
    /// Number of points in each line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Simple moving average of closes over `period` bars.
///
/// Index `i` is `None` for `i < period - 1`. A `period` longer than the
/// series yields an all-`None` result.
///
/// # Errors
///
/// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if `period`
/// is below 2.
///
/// # Example
///
/// ```
/// use overlay_ta::{PriceBar, PriceSeries, compute_sma};
///
/// let series = PriceSeries::new(
///     (1..=5).map(|t| PriceBar::flat(t, 10.0)).collect(),
/// )
/// .unwrap();
///
/// let sma = compute_sma(&series, 3).unwrap();
/// assert_eq!(
///     sma.values().collect::<Vec<_>>(),
///     vec![None, None, Some(10.0), Some(10.0), Some(10.0)],
/// );
/// ```
pub fn compute_sma<B: Ohlcv>(series: &PriceSeries<B>, period: usize) -> Result<IndicatorSeries> {
    let config = SmaConfig::close(period)?;
    debug!(%config, bars = series.len(), "computing SMA");

    Ok(compute_with(series, Sma::new(config)))
}

/// Exponential moving average of closes, seeded with the first close.
///
/// Defined from index 0 whenever the series has at least two bars.
///
/// # Errors
///
/// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if `period`
/// is below 2.
pub fn compute_ema<B: Ohlcv>(series: &PriceSeries<B>, period: usize) -> Result<IndicatorSeries> {
    let config = EmaConfig::close(period)?;
    debug!(%config, bars = series.len(), "computing EMA");

    Ok(compute_with(series, Ema::new(config)))
}

/// Relative strength index of closes over `period` price changes.
///
/// Index `i` is `None` for `i < period`. See [`Rsi`] for the policy on
/// windows without gains or losses.
///
/// # Errors
///
/// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if `period`
/// is below 2.
pub fn compute_rsi<B: Ohlcv>(series: &PriceSeries<B>, period: usize) -> Result<IndicatorSeries> {
    let config = RsiConfig::close(period)?;
    debug!(%config, bars = series.len(), "computing RSI");

    Ok(compute_with(series, Rsi::new(config)))
}

/// MACD line, signal line and histogram of closes.
///
/// All three are defined from index 0 whenever the series has at least two
/// bars.
///
/// # Errors
///
/// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if any
/// period is zero.
///
/// # Example
///
/// ```
/// use overlay_ta::{PriceBar, PriceSeries, compute_macd};
///
/// let series = PriceSeries::new(
///     [10.0, 11.0, 12.5, 12.0].iter().zip(1..).map(|(&c, t)| PriceBar::flat(t, c)).collect(),
/// )
/// .unwrap();
///
/// let macd = compute_macd(&series, 12, 26, 9).unwrap();
/// assert_eq!(macd.len(), 4);
/// assert_eq!(macd.macd[0].value, Some(0.0));
/// ```
pub fn compute_macd<B: Ohlcv>(
    series: &PriceSeries<B>,
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdSeries> {
    let config = MacdConfig::close(fast_period, slow_period, signal_period)?;
    debug!(%config, bars = series.len(), "computing MACD");

    Ok(compute_macd_with(series, config))
}

/// Feeds every bar through `indicator`, recording each output.
///
/// Works with any single-value indicator and config, including non-close
/// price sources.
///
/// # Example
///
/// ```
/// use overlay_ta::{
///     IndicatorConfig, IndicatorConfigBuilder, PriceBar, PriceSeries, PriceSource, Sma,
///     SmaConfig, compute_with,
/// };
///
/// let series = PriceSeries::new(vec![
///     PriceBar::new(1, 0.0, 20.0, 10.0, 0.0),
///     PriceBar::new(2, 0.0, 30.0, 20.0, 0.0),
///     PriceBar::new(3, 0.0, 40.0, 30.0, 0.0),
/// ])
/// .unwrap();
///
/// let config = SmaConfig::builder().length(2).source(PriceSource::HL2).build().unwrap();
/// let sma = compute_with(&series, Sma::new(config));
/// assert_eq!(sma.last_value(), Some(30.0));
/// ```
pub fn compute_with<B, I>(series: &PriceSeries<B>, mut indicator: I) -> IndicatorSeries
where
    B: Ohlcv,
    I: Indicator<Output = Price>,
{
    if series.len() < 2 {
        return IndicatorSeries::undefined(series.timestamps());
    }

    let mut out = IndicatorSeries::with_capacity(series.len());
    for bar in series {
        out.push(bar.open_time(), indicator.compute(bar));
    }

    out
}

/// [`compute_macd`] with an already validated config.
pub fn compute_macd_with<B: Ohlcv>(series: &PriceSeries<B>, config: MacdConfig) -> MacdSeries {
    if series.len() < 2 {
        return MacdSeries {
            macd: IndicatorSeries::undefined(series.timestamps()),
            signal: IndicatorSeries::undefined(series.timestamps()),
            histogram: IndicatorSeries::undefined(series.timestamps()),
        };
    }

    let mut indicator = Macd::new(config);
    let mut out = MacdSeries {
        macd: IndicatorSeries::with_capacity(series.len()),
        signal: IndicatorSeries::with_capacity(series.len()),
        histogram: IndicatorSeries::with_capacity(series.len()),
    };

    for bar in series {
        let value = indicator.compute(bar);
        let time = bar.open_time();
        out.macd.push(time, value.map(|v| v.macd()));
        out.signal.push(time, value.map(|v| v.signal()));
        out.histogram.push(time, value.map(|v| v.histogram()));
    }

    out
}
