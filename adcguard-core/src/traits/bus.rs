//! Bus Transport Abstraction
//!
//! One synchronous transaction over a chip-select (SPI-like) or addressed (I2C)
//! bus. The transport is expected to be bounded by its own timeouts; the
//! acquisition core adds none.
//!
//! ## Implementation Requirements
//!
//! - A reply shorter than requested is reported through [`Transfer::len`],
//!   never as an error. The caller treats it as a transient fault and repeats
//!   the transfer.
//! - `receive_time` is the event-clock time at which the reply arrived. The
//!   fixed-rate timing strategy stamps readings with it.

use crate::time::EventTime;

/// Outcome of one bus transaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    /// Number of valid bytes written into the response buffer
    pub len: usize,
    /// Event time at which the reply was received
    pub receive_time: EventTime,
}

/// Synchronous byte-level bus
pub trait BusTransport {
    /// Clock out `request` and read up to `response.len()` bytes back
    ///
    /// For pure reads (I2C) `request` is empty. For full-duplex buses the
    /// request is usually as long as the response.
    fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> Transfer;

    /// Write a setup sequence with no reply
    fn write(&mut self, bytes: &[u8]);
}

impl<B: BusTransport + ?Sized> BusTransport for &mut B {
    fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> Transfer {
        (**self).transfer(request, response)
    }

    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes)
    }
}
