//! Constants for AdcGuard Core
//!
//! Numeric values used by the timing strategies and chip profiles, grouped by
//! domain and documented with their source.
//!
//! ## Organization
//!
//! - **Timing**: Clock recovery tuning for free-running converters
//! - **Chips**: Reply widths, sentinels, scale factors and register tables

/// Clock recovery parameters for the adaptive timing strategy.
pub mod timing;

/// Chip reply formats, full-scale divisors and configuration tables.
pub mod chips;

// Re-export commonly used constants for convenience
pub use timing::{
    BASE_SCAN_TIME_S, FAST_EMA_ALPHA, FAST_EMA_UPDATES, INITIAL_AVG_SAMPLE_TIME_S,
    INITIAL_SCAN_FACTOR, MAX_SCAN_FACTOR, MIN_SCAN_FACTOR, SLOW_EMA_ALPHA,
};

pub use chips::{ADS1100_REPLY_LEN, HX711_FULL_SCALE, HX711_REPLY_LEN, MAX_REPLY_LEN};
