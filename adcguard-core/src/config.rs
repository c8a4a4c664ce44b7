//! Acquisition configuration
//!
//! Filled in by the owner through `setup_minmax` before the scheduler starts
//! and frozen afterwards. `setup_minmax` validates on entry and `start()`
//! validates again once the report interval is merged in, so a bad value
//! stops the system before the first transfer instead of mid-run.

use core::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{AcquisitionError, AcquisitionResult};

/// Oversampling, range and throttle settings for one chip instance
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcquisitionConfig {
    /// Desired duration of one raw conversion (seconds)
    pub sample_time: f64,

    /// Raw conversions averaged into one reported value
    pub sample_count: u32,

    /// Lowest valid reported value (inclusive)
    pub minval: f64,

    /// Highest valid reported value (inclusive)
    pub maxval: f64,

    /// Consecutive out-of-range averages tolerated before shutdown
    pub range_check_count: u32,

    /// Minimum time between consumer callbacks (seconds)
    pub report_time: f64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sample_time: 0.1,
            sample_count: 1,
            minval: -1.0,
            maxval: 1.0,
            range_check_count: 0,
            report_time: 0.0,
        }
    }
}

impl AcquisitionConfig {
    /// Build from the `setup_minmax` arguments, leaving the report interval
    /// at zero
    pub fn new(
        sample_time: f64,
        sample_count: u32,
        minval: f64,
        maxval: f64,
        range_check_count: u32,
    ) -> Self {
        Self {
            sample_time,
            sample_count,
            minval,
            maxval,
            range_check_count,
            ..Self::default()
        }
    }

    /// Set the minimum interval between consumer callbacks
    pub fn with_report_time(mut self, report_time: f64) -> Self {
        self.report_time = report_time;
        self
    }

    /// Reject values that would make acquisition meaningless
    pub fn validate(&self) -> AcquisitionResult<()> {
        if self.sample_count == 0 {
            return Err(AcquisitionError::ZeroSampleCount);
        }

        if !self.sample_time.is_finite() || self.sample_time <= 0.0 {
            return Err(AcquisitionError::InvalidSampleTime {
                sample_time: self.sample_time,
            });
        }

        // NaN bounds would silently pass every comparison
        if self.minval.is_nan() || self.maxval.is_nan() || self.minval > self.maxval {
            return Err(AcquisitionError::InvalidRange {
                min: self.minval,
                max: self.maxval,
            });
        }

        if !self.report_time.is_finite() || self.report_time < 0.0 {
            return Err(AcquisitionError::InvalidReportTime {
                report_time: self.report_time,
            });
        }

        Ok(())
    }

    /// Oversampling factor as a non-zero count
    pub fn oversampling(&self) -> AcquisitionResult<NonZeroU32> {
        NonZeroU32::new(self.sample_count).ok_or(AcquisitionError::ZeroSampleCount)
    }

    /// Range check threshold raised to the strategy's floor
    pub fn effective_range_check_count(&self, floor: u32) -> u32 {
        self.range_check_count.max(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_load_cell_setup() {
        let config = AcquisitionConfig::new(0.1, 4, -0.5, 0.5, 3).with_report_time(0.3);
        assert!(config.validate().is_ok());
        assert_eq!(config.oversampling().unwrap().get(), 4);
    }

    #[test]
    fn rejects_zero_sample_count() {
        let config = AcquisitionConfig::new(0.1, 0, -1.0, 1.0, 2);
        assert_eq!(config.validate(), Err(AcquisitionError::ZeroSampleCount));
        assert_eq!(config.oversampling(), Err(AcquisitionError::ZeroSampleCount));
    }

    #[test]
    fn rejects_bad_sample_time() {
        for sample_time in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = AcquisitionConfig::new(sample_time, 1, -1.0, 1.0, 2);
            assert!(matches!(
                config.validate(),
                Err(AcquisitionError::InvalidSampleTime { .. })
            ));
        }
    }

    #[test]
    fn rejects_inverted_or_nan_range() {
        let inverted = AcquisitionConfig::new(0.1, 1, 2.0, 1.0, 2);
        assert!(matches!(inverted.validate(), Err(AcquisitionError::InvalidRange { .. })));

        let nan = AcquisitionConfig::new(0.1, 1, f64::NAN, 1.0, 2);
        assert!(matches!(nan.validate(), Err(AcquisitionError::InvalidRange { .. })));

        // Degenerate single-point range is allowed
        let point = AcquisitionConfig::new(0.1, 1, 1.0, 1.0, 2);
        assert!(point.validate().is_ok());
    }

    #[test]
    fn rejects_negative_report_time() {
        let config = AcquisitionConfig::new(0.1, 1, -1.0, 1.0, 2).with_report_time(-1.0);
        assert!(matches!(
            config.validate(),
            Err(AcquisitionError::InvalidReportTime { .. })
        ));
    }

    #[test]
    fn range_check_floor() {
        let config = AcquisitionConfig::new(0.1, 1, -1.0, 1.0, 0);
        assert_eq!(config.effective_range_check_count(2), 2);

        let config = AcquisitionConfig::new(0.1, 1, -1.0, 1.0, 5);
        assert_eq!(config.effective_range_check_count(2), 5);
    }
}
