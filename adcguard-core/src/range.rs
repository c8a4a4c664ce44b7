//! Range and Safety Monitor
//!
//! A consecutive-violation counter, not a sliding window: one good average
//! clears the history. The monitor only decides; the driver carries out the
//! shutdown and halts.
//!
//! ```text
//! value in [min, max]  -> error_count = 0          -> Ok
//! value outside        -> error_count += 1
//!     error_count <  threshold                      -> Err(OutOfRange)
//!     error_count >= threshold                      -> Fatal
//! ```

use crate::errors::{AcquisitionError, AcquisitionResult};

/// Outcome of checking one finished average
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeVerdict {
    /// Within bounds
    InRange,
    /// Outside bounds, below the escalation threshold
    Violation {
        /// Consecutive violations including this one
        count: u32,
    },
    /// Outside bounds and the threshold was reached
    Fatal {
        /// Consecutive violations including this one
        count: u32,
    },
}

/// Consecutive out-of-range counter
#[derive(Debug, Clone)]
pub struct RangeMonitor {
    min: f64,
    max: f64,
    threshold: u32,
    error_count: u32,
}

impl RangeMonitor {
    /// Create a monitor for the inclusive range `[min, max]`
    ///
    /// A `threshold` of 0 behaves like 1: the first violation is fatal.
    pub fn new(min: f64, max: f64, threshold: u32) -> Self {
        Self {
            min,
            max,
            threshold,
            error_count: 0,
        }
    }

    /// Plain range test, shared by `check` and callers that only need the error
    pub fn check_range(&self, value: f64) -> AcquisitionResult<()> {
        // Written so that NaN lands on the error side
        if value >= self.min && value <= self.max {
            Ok(())
        } else {
            Err(AcquisitionError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Record one finished average
    pub fn check(&mut self, value: f64) -> RangeVerdict {
        if self.check_range(value).is_ok() {
            self.error_count = 0;
            return RangeVerdict::InRange;
        }

        self.error_count = self.error_count.saturating_add(1);
        if self.error_count >= self.threshold {
            RangeVerdict::Fatal { count: self.error_count }
        } else {
            RangeVerdict::Violation { count: self.error_count }
        }
    }

    /// Current consecutive violation count
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Escalation threshold
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f64 {
        self.max
    }
}
