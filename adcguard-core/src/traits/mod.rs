//! Boundary Traits for AdcGuard
//!
//! The acquisition core owns no hardware and no event loop. Everything it talks
//! to is reached through the traits in this module, passed into the driver
//! explicitly at construction time.
//!
//! ## Module Organization
//!
//! - [`bus`] - Synchronous byte transfers to the chip
//! - [`sinks`] - Where finished readings and fatal faults go
//!
//! Chip profiles and timing strategies are traits too, but live next to their
//! implementations in [`crate::chips`] and [`crate::timing`].
//!
//! ## Usage Example
//!
//! ```rust
//! use adcguard_core::traits::{BusTransport, Transfer};
//!
//! struct LoopbackBus;
//!
//! impl BusTransport for LoopbackBus {
//!     fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> Transfer {
//!         let len = request.len().min(response.len());
//!         response[..len].copy_from_slice(&request[..len]);
//!         Transfer { len, receive_time: 0.0 }
//!     }
//!
//!     fn write(&mut self, _bytes: &[u8]) {}
//! }
//! ```

pub mod bus;
pub mod sinks;

pub use bus::{BusTransport, Transfer};
pub use sinks::{ReadingConsumer, ShutdownHandler};
