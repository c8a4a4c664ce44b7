//! Fixed-rate polling

use crate::constants::timing::FIXED_MIN_RANGE_CHECK_COUNT;
use crate::time::EventTime;

use super::TimingRecovery;

/// Poll once per sample time, stamp with the bus receive time
#[derive(Debug, Clone, Default)]
pub struct FixedRate {
    sample_time: EventTime,
}

impl FixedRate {
    /// Poll every `sample_time` seconds
    pub fn new(sample_time: EventTime) -> Self {
        Self { sample_time }
    }

    /// Polling interval in seconds
    pub fn sample_time(&self) -> EventTime {
        self.sample_time
    }
}

impl TimingRecovery for FixedRate {
    fn min_range_check_count(&self) -> u32 {
        FIXED_MIN_RANGE_CHECK_COUNT
    }

    fn configure(&mut self, sample_time: EventTime) {
        self.sample_time = sample_time;
    }

    fn on_not_ready(&mut self, now: EventTime) -> EventTime {
        now + self.sample_time
    }

    fn on_ready(&mut self, now: EventTime) -> EventTime {
        now + self.sample_time
    }

    fn reading_time(&self, receive_time: EventTime) -> EventTime {
        receive_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reschedules_one_period_ahead() {
        let mut timing = FixedRate::default();
        timing.configure(0.125);

        assert!(!timing.needs_warm_up());
        assert_eq!(timing.on_ready(2.0), 2.125);
        assert_eq!(timing.on_not_ready(3.0), 3.125);
        assert_eq!(timing.reading_time(2.01), 2.01);
    }
}
