//! Selection of chart overlays and their one-shot computation.
//!
//! A chart starts with no overlays; the user enables each indicator and
//! picks its period. [`compute_overlays`] turns the current selection into
//! labelled series ready for a renderer.

use std::fmt::Display;

use tracing::debug;

use crate::{
    DEFAULT_MACD_FAST, DEFAULT_MACD_SIGNAL, DEFAULT_MACD_SLOW, DEFAULT_RSI_LENGTH, Error,
    IndicatorSeries, MIN_LENGTH, MacdConfig, MacdSeries, Ohlcv, PriceSeries, Result,
    compute_ema, compute_macd_with, compute_rsi, compute_sma,
};

/// Default SMA overlay period.
pub const DEFAULT_SMA_LENGTH: usize = 9;
/// Default EMA overlay period.
pub const DEFAULT_EMA_LENGTH: usize = 21;
/// Largest period accepted for SMA, EMA and RSI overlays.
pub const MAX_OVERLAY_LENGTH: usize = 100;

/// Fast, slow and signal spans of a MACD overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdPeriods {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdPeriods {
    fn default() -> Self {
        Self {
            fast: DEFAULT_MACD_FAST,
            slow: DEFAULT_MACD_SLOW,
            signal: DEFAULT_MACD_SIGNAL,
        }
    }
}

impl Display for MacdPeriods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.fast, self.slow, self.signal)
    }
}

/// Which overlays are enabled, and with what periods.
///
/// `None` means the overlay is switched off.
///
/// # Example
///
/// ```
/// use overlay_ta::OverlaySettings;
///
/// let settings = OverlaySettings::default()
///     .with_default_sma()
///     .with_ema(50);
///
/// assert_eq!(settings.sma, Some(9));
/// assert_eq!(settings.ema, Some(50));
/// assert!(settings.rsi.is_none());
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlaySettings {
    pub sma: Option<usize>,
    pub ema: Option<usize>,
    pub rsi: Option<usize>,
    pub macd: Option<MacdPeriods>,
}

impl OverlaySettings {
    #[must_use]
    pub fn with_sma(mut self, length: usize) -> Self {
        self.sma = Some(length);
        self
    }

    #[must_use]
    pub fn with_default_sma(self) -> Self {
        self.with_sma(DEFAULT_SMA_LENGTH)
    }

    #[must_use]
    pub fn with_ema(mut self, length: usize) -> Self {
        self.ema = Some(length);
        self
    }

    #[must_use]
    pub fn with_default_ema(self) -> Self {
        self.with_ema(DEFAULT_EMA_LENGTH)
    }

    #[must_use]
    pub fn with_rsi(mut self, length: usize) -> Self {
        self.rsi = Some(length);
        self
    }

    #[must_use]
    pub fn with_default_rsi(self) -> Self {
        self.with_rsi(DEFAULT_RSI_LENGTH)
    }

    #[must_use]
    pub fn with_macd(mut self, periods: MacdPeriods) -> Self {
        self.macd = Some(periods);
        self
    }

    #[must_use]
    pub fn with_default_macd(self) -> Self {
        self.with_macd(MacdPeriods::default())
    }

    /// `true` when no overlay is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sma.is_none() && self.ema.is_none() && self.rsi.is_none() && self.macd.is_none()
    }

    /// Checks every enabled period against the accepted input range.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] naming the first offending overlay.
    pub fn validate(&self) -> Result<()> {
        for (name, length) in [
            ("sma", self.sma),
            ("ema", self.ema),
            ("rsi", self.rsi),
        ] {
            if let Some(length) = length {
                check_overlay_length(name, length)?;
            }
        }

        if let Some(periods) = self.macd {
            macd_config(periods)?;
        }

        Ok(())
    }
}

fn check_overlay_length(name: &'static str, length: usize) -> Result<()> {
    if !(MIN_LENGTH..=MAX_OVERLAY_LENGTH).contains(&length) {
        return Err(Error::invalid(
            name,
            format!("{length} is outside {MIN_LENGTH}..={MAX_OVERLAY_LENGTH}"),
        ));
    }

    Ok(())
}

fn macd_config(periods: MacdPeriods) -> Result<MacdConfig> {
    MacdConfig::close(periods.fast, periods.slow, periods.signal)
}

/// A single-line overlay with its legend label.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub label: String,
    pub series: IndicatorSeries,
}

/// MACD overlay with its legend label.
#[derive(Clone, Debug, PartialEq)]
pub struct MacdOverlay {
    pub label: String,
    pub series: MacdSeries,
}

/// Every enabled overlay, computed over the same price series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlays {
    pub sma: Option<Overlay>,
    pub ema: Option<Overlay>,
    pub rsi: Option<Overlay>,
    pub macd: Option<MacdOverlay>,
}

impl Overlays {
    /// Single-line overlays in legend order.
    pub fn lines(&self) -> impl Iterator<Item = &Overlay> {
        [&self.sma, &self.ema, &self.rsi]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().next().is_none() && self.macd.is_none()
    }
}

/// Computes every overlay enabled in `settings`.
///
/// An empty series is not an error: each enabled overlay comes back with an
/// empty series so the caller can still render the chart frame.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `settings` fails
/// [`validate`](OverlaySettings::validate).
///
/// # Example
///
/// ```
/// use overlay_ta::{OverlaySettings, PriceBar, PriceSeries, compute_overlays};
///
/// let series = PriceSeries::new(
///     (1..=30).map(|t| PriceBar::flat(t, 100.0 + t as f64)).collect(),
/// )
/// .unwrap();
///
/// let settings = OverlaySettings::default().with_default_sma().with_default_rsi();
/// let overlays = compute_overlays(&series, &settings).unwrap();
///
/// let labels: Vec<_> = overlays.lines().map(|o| o.label.as_str()).collect();
/// assert_eq!(labels, ["SMA 9", "RSI 14"]);
/// assert!(overlays.ema.is_none());
/// ```
pub fn compute_overlays<B: Ohlcv>(
    series: &PriceSeries<B>,
    settings: &OverlaySettings,
) -> Result<Overlays> {
    settings.validate()?;
    debug!(?settings, bars = series.len(), "computing overlays");

    let line = |name: &str, length: usize, values: IndicatorSeries| Overlay {
        label: format!("{name} {length}"),
        series: values,
    };

    let mut overlays = Overlays::default();

    if let Some(length) = settings.sma {
        overlays.sma = Some(line("SMA", length, compute_sma(series, length)?));
    }
    if let Some(length) = settings.ema {
        overlays.ema = Some(line("EMA", length, compute_ema(series, length)?));
    }
    if let Some(length) = settings.rsi {
        overlays.rsi = Some(line("RSI", length, compute_rsi(series, length)?));
    }
    if let Some(periods) = settings.macd {
        overlays.macd = Some(MacdOverlay {
            label: format!("MACD {periods}"),
            series: compute_macd_with(series, macd_config(periods)?),
        });
    }

    Ok(overlays)
}
