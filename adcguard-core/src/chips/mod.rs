//! Chip Profiles
//!
//! A chip profile knows how to talk to one converter family: what to clock
//! out, how wide the reply is, how to turn reply bytes into a signed sample,
//! and what full-scale code normalizes an average. It also picks the timing
//! strategy that suits the part.
//!
//! ## Supported Chips
//!
//! | Chip    | Bus | Reply   | Rate            | Timing     |
//! | ---     | --- | ---     | ---             | ---        |
//! | HX711   | SPI | 4 bytes | 10 SPS, free    | adaptive   |
//! | ADS1100 | I2C | 2 bytes | 8/16/32/128 SPS | fixed rate |
//!
//! ## Adding a Chip
//!
//! ```rust
//! use adcguard_core::chips::{Chip, ChipSettings, Sample};
//! use adcguard_core::timing::FixedRate;
//! use adcguard_core::{AcquisitionError, AcquisitionResult};
//!
//! struct Mcp3201;
//!
//! impl Chip for Mcp3201 {
//!     type Timing = FixedRate;
//!     const NAME: &'static str = "MCP3201";
//!     const REPLY_LEN: usize = 2;
//!
//!     fn read_request(&self) -> &[u8] {
//!         &[0, 0]
//!     }
//!
//!     fn prepare(&mut self, sample_time: f64) -> AcquisitionResult<ChipSettings> {
//!         Ok(ChipSettings { sample_time, full_scale: 4096.0 })
//!     }
//!
//!     fn decode(&self, raw: &[u8]) -> AcquisitionResult<Sample> {
//!         let word = adcguard_core::chips::reply_word::<2>(raw)?;
//!         Ok(Sample::Ready(i32::from((u16::from_be_bytes(word) >> 1) & 0x0FFF)))
//!     }
//! }
//! ```

mod ads1100;
mod hx711;

pub use ads1100::{Ads1100, Ads1100Gain, Ads1100Rate};
pub use hx711::Hx711;

use heapless::Vec;

use crate::errors::{AcquisitionError, AcquisitionResult};
use crate::time::EventTime;
use crate::timing::TimingRecovery;

/// Longest setup sequence a chip may write at start
pub const MAX_INIT_SEQUENCE: usize = 4;

/// Setup bytes written once before acquisition starts
pub type InitSequence = Vec<u8, MAX_INIT_SEQUENCE>;

/// One decoded conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// A fresh conversion result in raw counts
    Ready(i32),
    /// The chip answered with its not-ready sentinel
    NotReady,
}

/// Values derived from the configuration at start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipSettings {
    /// Effective time per conversion after rounding to what the chip supports
    pub sample_time: EventTime,
    /// Divisor mapping an averaged raw code to a full-scale ratio
    pub full_scale: f64,
}

/// Converter family profile
pub trait Chip {
    /// Scheduling strategy suited to this converter
    type Timing: TimingRecovery + Default;

    /// Name used in logs and shutdown messages
    const NAME: &'static str;

    /// Reply width in bytes; at most [`MAX_REPLY_LEN`](crate::constants::MAX_REPLY_LEN)
    const REPLY_LEN: usize;

    /// Bytes clocked out for one read
    fn read_request(&self) -> &[u8];

    /// Resolve the configured sample time into chip settings
    fn prepare(&mut self, sample_time: EventTime) -> AcquisitionResult<ChipSettings>;

    /// Setup sequence written over the bus at start
    fn init_sequence(&self) -> InitSequence {
        InitSequence::new()
    }

    /// Interpret one reply
    fn decode(&self, raw: &[u8]) -> AcquisitionResult<Sample>;
}

/// Take the first `N` reply bytes, or report a short read
pub fn reply_word<const N: usize>(raw: &[u8]) -> AcquisitionResult<[u8; N]> {
    raw.get(..N)
        .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
        .ok_or(AcquisitionError::ShortRead {
            expected: N,
            actual: raw.len(),
        })
}
