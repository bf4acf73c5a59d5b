use crate::{Error, Ohlcv, Price, PriceBar, Result, Timestamp};

use std::ops::Index;

/// An ordered sequence of bars with strictly increasing open times.
///
/// The ordering is checked once, at construction, so the engine can assume
/// it afterwards. Empty and single-bar series are valid: indicators computed
/// on them are all `None`.
///
/// # Example
///
/// ```
/// use overlay_ta::{PriceBar, PriceSeries};
///
/// let series = PriceSeries::new(vec![
///     PriceBar::flat(1, 10.0),
///     PriceBar::flat(2, 11.0),
/// ])
/// .unwrap();
/// assert_eq!(series.len(), 2);
///
/// let unordered = PriceSeries::new(vec![
///     PriceBar::flat(2, 10.0),
///     PriceBar::flat(1, 11.0),
/// ]);
/// assert!(unordered.is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries<B = PriceBar> {
    bars: Vec<B>,
}

impl<B: Ohlcv> PriceSeries<B> {
    /// Wraps `bars`, rejecting any bar whose open time does not strictly
    /// follow its predecessor's.
    ///
    /// # Errors
    ///
    /// [`Error::UnorderedSeries`] naming the first out-of-order bar.
    pub fn new(bars: Vec<B>) -> Result<Self> {
        if let Some(index) = bars
            .windows(2)
            .position(|pair| pair[0].open_time() >= pair[1].open_time())
        {
            return Err(Error::UnorderedSeries {
                index: index + 1,
                previous: bars[index].open_time(),
                current: bars[index + 1].open_time(),
            });
        }

        Ok(Self { bars })
    }

    /// Series with no bars.
    #[must_use]
    pub fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        self.bars.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[B] {
        &self.bars
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> impl Iterator<Item = Price> + '_ {
        self.bars.iter().map(Ohlcv::close)
    }

    /// Open times in bar order.
    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.bars.iter().map(Ohlcv::open_time)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<B> {
        self.bars
    }
}

impl<B: Ohlcv> Default for PriceSeries<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B: Ohlcv> TryFrom<Vec<B>> for PriceSeries<B> {
    type Error = Error;

    fn try_from(bars: Vec<B>) -> Result<Self> {
        Self::new(bars)
    }
}

impl<'a, B> IntoIterator for &'a PriceSeries<B> {
    type Item = &'a B;
    type IntoIter = std::slice::Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

/// One point of an [`IndicatorSeries`]: the bar's open time and the
/// indicator value at that bar, `None` while warming up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorPoint {
    pub timestamp: Timestamp,
    pub value: Option<Price>,
}

/// Indicator output aligned index-for-index with the input series.
///
/// Same length and same timestamps as the [`PriceSeries`] it was computed
/// from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndicatorSeries {
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// All-`None` series over the given open times.
    pub(crate) fn undefined(timestamps: impl Iterator<Item = Timestamp>) -> Self {
        Self {
            points: timestamps
                .map(|timestamp| IndicatorPoint {
                    timestamp,
                    value: None,
                })
                .collect(),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, timestamp: Timestamp, value: Option<Price>) {
        self.points.push(IndicatorPoint { timestamp, value });
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndicatorPoint> {
        self.points.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&IndicatorPoint> {
        self.points.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[IndicatorPoint] {
        &self.points
    }

    /// Values in order, `None` for warm-up points.
    pub fn values(&self) -> impl Iterator<Item = Option<Price>> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Index of the first defined value.
    #[must_use]
    pub fn first_defined(&self) -> Option<usize> {
        self.points.iter().position(|p| p.value.is_some())
    }

    /// Value at the last point, if defined.
    #[must_use]
    pub fn last_value(&self) -> Option<Price> {
        self.points.last().and_then(|p| p.value)
    }
}

impl Index<usize> for IndicatorSeries {
    type Output = IndicatorPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a IndicatorSeries {
    type Item = &'a IndicatorPoint;
    type IntoIter = std::slice::Iter<'a, IndicatorPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
