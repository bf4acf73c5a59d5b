use std::{fmt::Display, str::FromStr, time::Duration};

use crate::{Error, Result, Timestamp};

/// Bar size offered by the chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Interval {
    #[default]
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    OneDay,
}

impl Interval {
    /// Every supported interval, shortest first.
    pub const ALL: [Interval; 6] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::OneDay,
    ];

    /// Code understood by market-data providers, e.g. `"15m"` or `"1d"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "60m",
            Self::OneDay => "1d",
        }
    }

    /// Human readable name for a selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OneMinute => "1 minute",
            Self::FiveMinutes => "5 minutes",
            Self::FifteenMinutes => "15 minutes",
            Self::ThirtyMinutes => "30 minutes",
            Self::OneHour => "1 hour",
            Self::OneDay => "1 day",
        }
    }

    /// Length of one bar.
    #[must_use]
    pub fn duration(self) -> Duration {
        let minutes = match self {
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::FifteenMinutes => 15,
            Self::ThirtyMinutes => 30,
            Self::OneHour => 60,
            Self::OneDay => 24 * 60,
        };

        Duration::from_secs(minutes * 60)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1m" => Ok(Self::OneMinute),
            "5m" => Ok(Self::FiveMinutes),
            "15m" => Ok(Self::FifteenMinutes),
            "30m" => Ok(Self::ThirtyMinutes),
            "60m" | "1h" => Ok(Self::OneHour),
            "1d" => Ok(Self::OneDay),
            other => Err(Error::UnknownInterval(other.to_string())),
        }
    }
}

impl TryFrom<String> for Interval {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.code().to_string()
    }
}

/// What to fetch: a ticker, its bar size, and how many days back.
///
/// Also the key of [`SeriesCache`](crate::SeriesCache).
///
/// # Example
///
/// ```
/// use overlay_ta::{ChartRequest, Interval};
///
/// let request = ChartRequest::new(" msft ", Interval::OneDay, 30).unwrap();
/// assert_eq!(request.ticker(), "MSFT");
///
/// assert!(ChartRequest::new("MSFT", Interval::OneDay, 61).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChartRequest {
    ticker: String,
    interval: Interval,
    period_days: u32,
}

impl ChartRequest {
    pub const DEFAULT_TICKER: &'static str = "AAPL";
    pub const DEFAULT_PERIOD_DAYS: u32 = 7;
    pub const MAX_PERIOD_DAYS: u32 = 60;

    const DAY_MS: u64 = 24 * 60 * 60 * 1000;

    /// Normalizes the ticker (trimmed, upper-case) and validates the window.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] for an empty ticker or a `period_days`
    /// outside `1..=60`.
    pub fn new(ticker: &str, interval: Interval, period_days: u32) -> Result<Self> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(Error::invalid("ticker", "ticker is required"));
        }

        if !(1..=Self::MAX_PERIOD_DAYS).contains(&period_days) {
            return Err(Error::invalid(
                "period_days",
                format!("{period_days} is outside 1..={}", Self::MAX_PERIOD_DAYS),
            ));
        }

        Ok(Self {
            ticker,
            interval,
            period_days,
        })
    }

    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    #[must_use]
    pub fn period_days(&self) -> u32 {
        self.period_days
    }

    /// `[start, end)` window in epoch milliseconds ending at `end`.
    #[must_use]
    pub fn time_range(&self, end: Timestamp) -> (Timestamp, Timestamp) {
        let span = u64::from(self.period_days) * Self::DAY_MS;
        (end.saturating_sub(span), end)
    }
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            ticker: Self::DEFAULT_TICKER.to_string(),
            interval: Interval::default(),
            period_days: Self::DEFAULT_PERIOD_DAYS,
        }
    }
}

impl Display for ChartRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}d", self.ticker, self.interval, self.period_days)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ChartRequest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            ticker: String,
            interval: Interval,
            period_days: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(&raw.ticker, raw.interval, raw.period_days).map_err(serde::de::Error::custom)
    }
}
