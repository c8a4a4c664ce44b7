//! Timing Recovery Strategies
//!
//! Decides when the driver wakes up next and which timestamp a reading gets.
//!
//! ## Two Strategies
//!
//! ### Fixed Rate
//! The chip converts continuously and keeps its last result readable, so
//! polling once per `sample_time` is enough. Readings are stamped with the bus
//! receive time.
//!
//! ### Adaptive Rate
//! The chip free-runs on its own oscillator and reading too early returns a
//! not-ready sentinel, while reading late adds latency and risks losing a
//! conversion. The strategy estimates the true conversion period with an EMA,
//! keeps a de-jittered anchor on the conversion grid, and wakes a few scan
//! intervals before the predicted conversion. How many is learned from the
//! number of not-ready replies per cycle.
//!
//! ```text
//!          anchor            anchor + avg
//!   ---------|--------------------|-----------> time
//!                        ^ wake = anchor + avg - scan_factor * scan_time
//!                        | poll, poll, poll (not ready) ... ready
//! ```
//!
//! The strategy is an associated type of each chip profile, so the driver is
//! monomorphized per chip and carries no dynamic dispatch in the timer path.

mod adaptive;
mod fixed;

pub use adaptive::AdaptiveRate;
pub use fixed::FixedRate;

use crate::time::EventTime;

/// Scheduling policy of the acquisition loop
pub trait TimingRecovery {
    /// Whether the first transfer only establishes a timing anchor
    fn needs_warm_up(&self) -> bool {
        false
    }

    /// Floor applied to the configured range check count
    fn min_range_check_count(&self) -> u32;

    /// Receive the effective sample time chosen for the chip
    fn configure(&mut self, sample_time: EventTime);

    /// Handle the warm-up transfer and return the next wake time
    fn warm_up(&mut self, now: EventTime) -> EventTime {
        now
    }

    /// A conversion was not ready yet; return the retry time
    fn on_not_ready(&mut self, now: EventTime) -> EventTime;

    /// A valid conversion was read; return the next wake time
    fn on_ready(&mut self, now: EventTime) -> EventTime;

    /// Timestamp to attach to the conversion just read
    fn reading_time(&self, receive_time: EventTime) -> EventTime;
}
