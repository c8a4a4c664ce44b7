//! Error Types for Acquisition and Configuration Failures
//!
//! ## Design Philosophy
//!
//! Errors here are returned from setup calls and from the decode step of every
//! timer cycle, so they stay small and `Copy`:
//!
//! 1. **No Heap Allocation**: All error data is inline. Messages are built by
//!    the caller only when a fatal shutdown needs a reason string.
//!
//! 2. **Actionable Information**: Each variant carries the offending numbers so
//!    the log line alone explains what was rejected.
//!
//! ## Error Categories
//!
//! ### Transport Faults
//! - `ShortRead`: the bus returned fewer bytes than the chip's reply width.
//!   Recovered by retrying the transfer, never surfaced to the consumer.
//! - `InvalidReply`: a full-length reply the chip profile cannot interpret.
//!   Not retried; the driver shuts down.
//!
//! ### Sensor Faults
//! - `OutOfRange`: a finished average fell outside the configured bounds.
//!   Counted, logged, and escalated to shutdown once it persists.
//!
//! ### Configuration Faults
//! - `ZeroSampleCount`, `InvalidSampleTime`, `InvalidRange`,
//!   `InvalidReportTime`, `UnsupportedGain`: rejected before acquisition starts.
//! - `NotConfigured`, `AlreadyStarted`: lifecycle misuse of the setup calls.
//!
//! ```rust
//! use adcguard_core::{AcquisitionConfig, AcquisitionError};
//!
//! let config = AcquisitionConfig::new(0.1, 0, -1.0, 1.0, 2);
//! assert_eq!(config.validate(), Err(AcquisitionError::ZeroSampleCount));
//! ```

use thiserror_no_std::Error;

/// Result type for acquisition operations
pub type AcquisitionResult<T> = Result<T, AcquisitionError>;

/// Acquisition errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AcquisitionError {
    /// Bus reply shorter than the chip's conversion word
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Reply width of the chip in bytes
        expected: usize,
        /// Bytes actually returned by the transport
        actual: usize,
    },

    /// Full-length reply the chip profile rejected
    #[error("Invalid reply from {chip}")]
    InvalidReply {
        /// Chip profile name
        chip: &'static str,
    },

    /// Finished average outside the configured bounds
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The averaged, normalized reading
        value: f64,
        /// Configured lower bound (inclusive)
        min: f64,
        /// Configured upper bound (inclusive)
        max: f64,
    },

    /// Oversampling factor of zero
    #[error("Sample count must be at least 1")]
    ZeroSampleCount,

    /// Sample time not a positive, finite number of seconds
    #[error("Invalid sample time: {sample_time}s")]
    InvalidSampleTime {
        /// The rejected sample time
        sample_time: f64,
    },

    /// Range bounds inverted or not finite
    #[error("Invalid range: [{min}, {max}]")]
    InvalidRange {
        /// Rejected lower bound
        min: f64,
        /// Rejected upper bound
        max: f64,
    },

    /// Report interval negative or not finite
    #[error("Invalid report time: {report_time}s")]
    InvalidReportTime {
        /// The rejected report interval
        report_time: f64,
    },

    /// Programmable gain the chip cannot be set to
    #[error("Unsupported gain: {gain}")]
    UnsupportedGain {
        /// Requested gain
        gain: u8,
    },

    /// `start()` called before `setup_minmax()`
    #[error("Acquisition not configured")]
    NotConfigured,

    /// Setup call after the scheduler started
    #[error("Acquisition already started")]
    AlreadyStarted,
}

#[cfg(feature = "defmt")]
impl defmt::Format for AcquisitionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ShortRead { expected, actual } =>
                defmt::write!(fmt, "Short read: {} of {} bytes", actual, expected),
            Self::InvalidReply { chip } =>
                defmt::write!(fmt, "Invalid reply from {}", chip),
            Self::OutOfRange { value, min, max } =>
                defmt::write!(fmt, "Value {} outside [{}, {}]", value, min, max),
            Self::ZeroSampleCount =>
                defmt::write!(fmt, "Sample count is zero"),
            Self::InvalidSampleTime { sample_time } =>
                defmt::write!(fmt, "Invalid sample time {}", sample_time),
            Self::InvalidRange { min, max } =>
                defmt::write!(fmt, "Invalid range [{}, {}]", min, max),
            Self::InvalidReportTime { report_time } =>
                defmt::write!(fmt, "Invalid report time {}", report_time),
            Self::UnsupportedGain { gain } =>
                defmt::write!(fmt, "Unsupported gain {}", gain),
            Self::NotConfigured =>
                defmt::write!(fmt, "Not configured"),
            Self::AlreadyStarted =>
                defmt::write!(fmt, "Already started"),
        }
    }
}
