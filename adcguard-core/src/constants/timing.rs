//! Clock Recovery Constants
//!
//! Tuning for the adaptive strategy that tracks a converter's free-running
//! conversion clock from the host side.

// ===== POLLING =====

/// Retry interval after a not-ready reply (seconds).
///
/// Also the unit of the scan factor lookahead: the driver wakes
/// `scan_factor * BASE_SCAN_TIME_S` ahead of the predicted conversion.
pub const BASE_SCAN_TIME_S: f64 = 0.01;

/// Scan factor at power-up.
pub const INITIAL_SCAN_FACTOR: u32 = 2;

/// Lower clamp of the scan factor.
pub const MIN_SCAN_FACTOR: u32 = 1;

/// Upper clamp of the scan factor.
pub const MAX_SCAN_FACTOR: u32 = 10;

/// Below this many not-ready replies per cycle the poll is cutting it close,
/// so the lookahead grows.
pub const SCAN_RETRIES_LOW: u32 = 2;

/// Above this many not-ready replies per cycle the poll is far too early,
/// so the lookahead shrinks.
pub const SCAN_RETRIES_HIGH: u32 = 3;

// ===== PERIOD ESTIMATION =====

/// Period estimate before the first measurement (seconds).
///
/// Matches the 10 SPS output rate bridge ADCs run at with RATE tied low.
///
/// Source: HX711 datasheet, output data rate table
pub const INITIAL_AVG_SAMPLE_TIME_S: f64 = 0.1;

/// Number of EMA updates using the fast smoothing weight.
pub const FAST_EMA_UPDATES: u32 = 100;

/// Smoothing weight while converging.
pub const FAST_EMA_ALPHA: f64 = 0.1;

/// Smoothing weight once converged.
pub const SLOW_EMA_ALPHA: f64 = 0.01;

// ===== SAFETY =====

/// Minimum consecutive out-of-range averages before shutdown when clock
/// recovery is active. A single glitched transfer must not halt the system.
pub const ADAPTIVE_MIN_RANGE_CHECK_COUNT: u32 = 2;

/// Minimum consecutive out-of-range averages before shutdown at fixed rate.
pub const FIXED_MIN_RANGE_CHECK_COUNT: u32 = 1;
