//! Acquisition engine for slow delta-sigma and bridge ADCs
//!
//! Turns single-conversion bus transfers into a calibrated, range-checked,
//! rate-limited stream of readings for a control loop.
//!
//! Key constraints:
//! - Runs inside an external timer callback, single-threaded, never blocks
//!   beyond one bus transfer
//! - No heap allocation in the timer path
//! - Sustained out-of-range readings shut the whole system down
//!
//! ```no_run
//! use adcguard_core::chips::Hx711;
//! use adcguard_core::traits::{BusTransport, Transfer};
//! use adcguard_core::{AcquisitionDriver, Wake};
//!
//! # struct SpiBus;
//! # impl BusTransport for SpiBus {
//! #     fn transfer(&mut self, _: &[u8], r: &mut [u8]) -> Transfer { Transfer { len: r.len(), receive_time: 0.0 } }
//! #     fn write(&mut self, _: &[u8]) {}
//! # }
//! # fn now() -> f64 { 0.0 }
//! let mut driver = AcquisitionDriver::new(Hx711, SpiBus, |reason: &str| {
//!     // Bring heaters and motors to a safe state
//! });
//! driver.setup_minmax(0.1, 4, -0.9, 0.9, 2)?;
//! driver.setup_callback(0.3, |time: f64, value: f64| {
//!     // Feed the control loop
//! })?;
//!
//! let mut wake = driver.start()?;
//! while wake != Wake::Never {
//!     // The event loop sleeps until the deadline, then:
//!     wake = driver.on_timer(now());
//! }
//! # Ok::<(), adcguard_core::AcquisitionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod macros;

pub mod accumulator;
pub mod chips;
pub mod config;
pub mod constants;
pub mod driver;
pub mod errors;
pub mod range;
pub mod report;
pub mod time;
pub mod timing;
pub mod traits;

// Public API
pub use config::AcquisitionConfig;
pub use driver::{AcquisitionDriver, AcquisitionStats, Phase};
pub use errors::{AcquisitionError, AcquisitionResult};
pub use report::Reading;
pub use time::{EventTime, Wake};
pub use timing::{AdaptiveRate, FixedRate, TimingRecovery};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
