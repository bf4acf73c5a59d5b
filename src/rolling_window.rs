use crate::Price;

/// Fixed-length trailing window with a running sum.
///
/// Tracks how many non-zero values the window holds so an all-zero window
/// reports a mean of exactly `0.0` instead of whatever rounding residue the
/// running sum has accumulated.
///
/// The sum is rebuilt from the stored values whenever it is non-finite or
/// the evicted value dominates it, so a NaN, infinite or huge price only
/// affects the output while it is inside the window.
#[derive(Clone, Debug)]
pub(crate) struct RollingWindow {
    values: Vec<Price>,
    /// Slot holding the oldest value once the window is full.
    oldest: usize,
    length: usize,
    sum: f64,
    non_zero: usize,
}

impl RollingWindow {
    pub(crate) fn new(length: usize) -> Self {
        debug_assert!(length > 0, "window length must be positive");

        Self {
            values: Vec::with_capacity(length),
            oldest: 0,
            length,
            sum: 0.0,
            non_zero: 0,
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.values.len() == self.length
    }

    /// Stores `value`, returning the value it displaced once full.
    #[inline]
    fn store(&mut self, value: Price) -> Option<Price> {
        if !self.is_full() {
            self.values.push(value);
            return None;
        }

        let old = std::mem::replace(&mut self.values[self.oldest], value);
        self.oldest += 1;
        if self.oldest == self.length {
            self.oldest = 0;
        }

        Some(old)
    }

    #[allow(clippy::float_cmp)]
    #[inline]
    pub(crate) fn push(&mut self, value: Price) {
        if value != 0.0 {
            self.non_zero += 1;
        }

        match self.store(value) {
            None => self.sum += value,
            Some(old) => {
                if old != 0.0 {
                    self.non_zero -= 1;
                }

                if !self.sum.is_finite() || (old != 0.0 && old.abs() >= self.sum.abs()) {
                    self.sum = self.values.iter().sum();
                } else {
                    self.sum = self.sum - old + value;
                }
            }
        }
    }

    /// Sum of the window, `None` until it is full.
    #[inline]
    pub(crate) fn sum(&self) -> Option<Price> {
        if !self.is_full() {
            return None;
        }

        if self.non_zero == 0 {
            Some(0.0)
        } else {
            Some(self.sum)
        }
    }

    /// Mean of the window, `None` until it is full.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn mean(&self) -> Option<Price> {
        self.sum().map(|sum| sum / self.length as f64)
    }
}
