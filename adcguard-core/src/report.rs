//! Published readings and report throttling
//!
//! Two read paths share one snapshot. The pull path ([`Reading`] returned by
//! the driver's `last_value`) sees every finished average. The push path
//! toward the consumer callback goes through a [`ReportThrottle`] that admits
//! at most one reading per `report_time`.

use core::convert::Infallible;

use crate::time::EventTime;

/// A finished, validated average and the time it belongs to
///
/// Always replaced as a whole, so a reader never pairs a new value with an
/// old timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reading {
    /// Normalized averaged value
    pub value: f64,
    /// Event time the average is attributed to
    pub time: EventTime,
}

/// Minimum-interval gate for consumer callbacks
///
/// Unlike a token bucket there is no burst credit: a reading is admitted when
/// at least `report_time` has passed since the last admitted one. The first
/// reading is always admitted.
///
/// ```rust
/// use adcguard_core::report::ReportThrottle;
///
/// let mut throttle = ReportThrottle::new(1.0);
/// assert!(throttle.admit(0.0).is_ok());
/// assert!(throttle.admit(0.3).is_err());
/// assert!(throttle.admit(1.1).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ReportThrottle {
    report_time: EventTime,
    last_callback_time: Option<EventTime>,
}

impl ReportThrottle {
    /// Create a throttle with the given minimum interval (seconds)
    pub fn new(report_time: EventTime) -> Self {
        Self {
            report_time,
            last_callback_time: None,
        }
    }

    /// Admit a report at `now`, or `WouldBlock` if it falls inside the window
    pub fn admit(&mut self, now: EventTime) -> nb::Result<(), Infallible> {
        if let Some(last) = self.last_callback_time {
            if now < last + self.report_time {
                return Err(nb::Error::WouldBlock);
            }
        }

        self.last_callback_time = Some(now);
        Ok(())
    }

    /// Time of the last admitted report
    pub fn last_callback_time(&self) -> Option<EventTime> {
        self.last_callback_time
    }

    /// Configured minimum interval
    pub fn report_time(&self) -> EventTime {
        self.report_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_once_per_window() {
        let mut throttle = ReportThrottle::new(1.0);
        let admitted: Vec<f64> = [0.0, 0.3, 0.6, 1.1]
            .into_iter()
            .filter(|&t| throttle.admit(t).is_ok())
            .collect();

        assert_eq!(admitted, vec![0.0, 1.1]);
        assert_eq!(throttle.last_callback_time(), Some(1.1));
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let mut throttle = ReportThrottle::new(0.5);
        assert!(throttle.admit(2.0).is_ok());
        assert!(matches!(throttle.admit(2.4), Err(nb::Error::WouldBlock)));
        assert!(throttle.admit(2.5).is_ok());
    }

    #[test]
    fn zero_interval_admits_everything() {
        let mut throttle = ReportThrottle::new(0.0);
        for t in [0.0, 0.0, 0.01, 0.02] {
            assert!(throttle.admit(t).is_ok());
        }
    }

    #[test]
    fn default_reading_is_zero() {
        let reading = Reading::default();
        assert_eq!(reading.value, 0.0);
        assert_eq!(reading.time, 0.0);
    }
}
