//! Reading Consumers and Shutdown Handlers
//!
//! Two outbound edges of the driver:
//!
//! - A [`ReadingConsumer`] receives throttled, validated averages. Any
//!   `FnMut(EventTime, f64)` closure is a consumer.
//! - A [`ShutdownHandler`] receives the fatal reason when readings stay out of
//!   range. The handler is expected to bring the whole process to a safe
//!   state; the driver halts itself after calling it.

use crate::time::EventTime;

/// Receives finished readings
pub trait ReadingConsumer {
    /// Called with the reading time (consumer time domain) and the value
    fn on_reading(&mut self, time: EventTime, value: f64);
}

impl<F> ReadingConsumer for F
where
    F: FnMut(EventTime, f64),
{
    fn on_reading(&mut self, time: EventTime, value: f64) {
        self(time, value)
    }
}

/// Process-wide fatal shutdown
pub trait ShutdownHandler {
    /// Unconditionally shut the system down with a human-readable reason
    fn invoke_fatal(&mut self, reason: &str);
}

impl<F> ShutdownHandler for F
where
    F: FnMut(&str),
{
    fn invoke_fatal(&mut self, reason: &str) {
        self(reason)
    }
}
