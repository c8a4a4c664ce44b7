//! Adaptive clock recovery for free-running converters
//!
//! ## Period Estimate
//!
//! Each valid read measures `interval = now - anchor`. The estimate follows it
//! with an EMA whose weight starts high for fast lock-in and drops once the
//! estimate has seen [`FAST_EMA_UPDATES`] samples:
//!
//! ```text
//! avg += alpha * (interval - avg)      alpha = 0.1 -> 0.01
//! ```
//!
//! ## Anchor
//!
//! The anchor is the last conversion time on the estimated grid, not the raw
//! poll time, so host scheduling jitter does not accumulate. After each update
//! it is stepped forward by whole periods until it lies within half a period
//! of `now`.
//!
//! ## Lookahead
//!
//! The next wake is `anchor + avg - scan_factor * scan_time`. A cycle that hit
//! the conversion with fewer than two not-ready polls was late, so the
//! lookahead grows; more than three means it was too early and it shrinks.
//! Not-ready polls never touch the estimate or the anchor.

use crate::constants::timing::{
    ADAPTIVE_MIN_RANGE_CHECK_COUNT, BASE_SCAN_TIME_S, FAST_EMA_ALPHA, FAST_EMA_UPDATES,
    INITIAL_AVG_SAMPLE_TIME_S, INITIAL_SCAN_FACTOR, MAX_SCAN_FACTOR, MIN_SCAN_FACTOR,
    SCAN_RETRIES_HIGH, SCAN_RETRIES_LOW, SLOW_EMA_ALPHA,
};
use crate::time::EventTime;

use super::TimingRecovery;

/// EMA-based conversion clock tracker
#[derive(Debug, Clone)]
pub struct AdaptiveRate {
    scan_time: EventTime,
    avg_sample_time: EventTime,
    avg_sample_time_cnt: u32,
    scan_factor: u32,
    scan_iterations: u32,
    last_callback: Option<EventTime>,
}

impl Default for AdaptiveRate {
    fn default() -> Self {
        Self::new(INITIAL_AVG_SAMPLE_TIME_S, BASE_SCAN_TIME_S)
    }
}

impl AdaptiveRate {
    /// Start from a nominal conversion period and a not-ready retry interval
    pub fn new(initial_period: EventTime, scan_time: EventTime) -> Self {
        Self {
            scan_time,
            avg_sample_time: initial_period,
            avg_sample_time_cnt: 0,
            scan_factor: INITIAL_SCAN_FACTOR,
            scan_iterations: 0,
            last_callback: None,
        }
    }

    /// Current conversion period estimate (seconds)
    pub fn avg_sample_time(&self) -> EventTime {
        self.avg_sample_time
    }

    /// EMA updates applied so far, saturating at the fast-phase length
    pub fn avg_sample_time_cnt(&self) -> u32 {
        self.avg_sample_time_cnt
    }

    /// Lookahead in units of the scan time
    pub fn scan_factor(&self) -> u32 {
        self.scan_factor
    }

    /// Not-ready replies since the last valid read
    pub fn scan_iterations(&self) -> u32 {
        self.scan_iterations
    }

    /// De-jittered time of the last conversion, once warmed up
    pub fn anchor(&self) -> Option<EventTime> {
        self.last_callback
    }

    fn adjust_scan_factor(&mut self) {
        if self.scan_iterations == 0 {
            log_debug!("adaptive timing: conversion ready on first poll");
        }

        if self.scan_iterations < SCAN_RETRIES_LOW {
            self.scan_factor += 1;
        } else if self.scan_iterations > SCAN_RETRIES_HIGH {
            self.scan_factor = self.scan_factor.saturating_sub(1);
        }
        self.scan_factor = self.scan_factor.clamp(MIN_SCAN_FACTOR, MAX_SCAN_FACTOR);
        self.scan_iterations = 0;
    }

    fn update_period(&mut self, interval: EventTime) {
        let alpha = if self.avg_sample_time_cnt < FAST_EMA_UPDATES {
            self.avg_sample_time_cnt += 1;
            FAST_EMA_ALPHA
        } else {
            SLOW_EMA_ALPHA
        };
        self.avg_sample_time += alpha * (interval - self.avg_sample_time);
    }

    fn reanchor(anchor: EventTime, now: EventTime, period: EventTime) -> EventTime {
        if period <= 0.0 {
            return now;
        }

        let threshold = now - period / 2.0;
        if anchor >= threshold {
            return anchor;
        }

        let steps = libm::ceil((threshold - anchor) / period);
        let mut anchor = anchor + steps * period;
        // Rounding can leave us a hair short of the threshold
        if anchor < threshold {
            anchor += period;
        }
        anchor
    }

    fn next_wake(&self, anchor: EventTime) -> EventTime {
        anchor + self.avg_sample_time - f64::from(self.scan_factor) * self.scan_time
    }
}

impl TimingRecovery for AdaptiveRate {
    fn needs_warm_up(&self) -> bool {
        true
    }

    fn min_range_check_count(&self) -> u32 {
        ADAPTIVE_MIN_RANGE_CHECK_COUNT
    }

    fn configure(&mut self, _sample_time: EventTime) {
        // The conversion clock is measured, not configured
    }

    fn warm_up(&mut self, now: EventTime) -> EventTime {
        self.last_callback = Some(now);
        now + self.scan_time
    }

    fn on_not_ready(&mut self, now: EventTime) -> EventTime {
        self.scan_iterations = self.scan_iterations.saturating_add(1);
        now + self.scan_time
    }

    fn on_ready(&mut self, now: EventTime) -> EventTime {
        self.adjust_scan_factor();

        let anchor = match self.last_callback {
            Some(anchor) => {
                self.update_period(now - anchor);
                Self::reanchor(anchor, now, self.avg_sample_time)
            }
            // No warm-up happened; anchor here without polluting the estimate
            None => now,
        };
        self.last_callback = Some(anchor);

        self.next_wake(anchor)
    }

    fn reading_time(&self, receive_time: EventTime) -> EventTime {
        self.last_callback.unwrap_or(receive_time)
    }
}
