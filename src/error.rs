use crate::Timestamp;

use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for indicator configuration and input validation.
///
/// Computation itself never fails: once a config is built and a
/// [`PriceSeries`](crate::PriceSeries) is constructed, every compute call
/// returns a fully formed result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter is outside its accepted range. Never clamped.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name, e.g. `"length"` or `"period_days"`.
        name: &'static str,
        /// Human readable explanation.
        reason: String,
    },

    /// Bars are not strictly increasing by timestamp.
    #[error("bar {index} has open time {current}, which does not follow {previous}")]
    UnorderedSeries {
        /// Index of the offending bar.
        index: usize,
        /// Open time of the bar before it.
        previous: Timestamp,
        /// Open time of the offending bar.
        current: Timestamp,
    },

    /// Interval code that is not one of the supported bar sizes.
    #[error("unknown interval `{0}`")]
    UnknownInterval(String),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(parameter = name, %reason, "rejected parameter");

        Self::InvalidParameter { name, reason }
    }

    /// Checks that `value` is at least `min`, reporting `name` otherwise.
    pub(crate) fn check_min(name: &'static str, value: usize, min: usize) -> Result<usize> {
        if value < min {
            return Err(Self::invalid(name, format!("{value} is below the minimum of {min}")));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_min_accepts_boundary() {
        assert_eq!(Error::check_min("length", 2, 2), Ok(2));
    }

    #[test]
    fn check_min_rejects_below() {
        let err = Error::check_min("length", 1, 2).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidParameter {
                name: "length",
                reason: "1 is below the minimum of 2".to_string(),
            }
        );
    }

    #[test]
    fn display_invalid_parameter() {
        let err = Error::invalid("period_days", "0 is outside 1..=60");
        assert_eq!(
            err.to_string(),
            "invalid parameter `period_days`: 0 is outside 1..=60"
        );
    }

    #[test]
    fn display_unordered_series() {
        let err = Error::UnorderedSeries {
            index: 3,
            previous: 20,
            current: 20,
        };
        assert_eq!(
            err.to_string(),
            "bar 3 has open time 20, which does not follow 20"
        );
    }
}
