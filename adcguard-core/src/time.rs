//! Time handling for the acquisition loop
//!
//! All times are seconds on the host's monotonic event clock, the same clock
//! the timer facility uses to invoke the driver. Consumers may live in a
//! different time domain (for example a controller's estimated print time);
//! a [`ClockTranslator`] maps event time into that domain when a reading is
//! delivered.

/// Event-loop time in seconds
pub type EventTime = f64;

/// Next deadline requested from the timer facility
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wake {
    /// Run again as soon as possible
    Now,
    /// Run again at the given absolute event time
    At(EventTime),
    /// Stop rescheduling
    Never,
}

impl Wake {
    /// Absolute deadline, if any
    pub fn deadline(&self) -> Option<EventTime> {
        match self {
            Wake::At(t) => Some(*t),
            _ => None,
        }
    }
}

/// Maps event time into the consumer's time domain
pub trait ClockTranslator {
    /// Translate an event-clock timestamp
    fn translate(&self, time: EventTime) -> EventTime;
}

impl<F> ClockTranslator for F
where
    F: Fn(EventTime) -> EventTime,
{
    fn translate(&self, time: EventTime) -> EventTime {
        self(time)
    }
}

/// Consumer shares the event clock
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityClock;

impl ClockTranslator for IdentityClock {
    fn translate(&self, time: EventTime) -> EventTime {
        time
    }
}

/// Consumer clock runs at a fixed offset from the event clock
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock {
    offset: EventTime,
}

impl OffsetClock {
    /// Consumer time = event time + `offset`
    pub fn new(offset: EventTime) -> Self {
        Self { offset }
    }
}

impl ClockTranslator for OffsetClock {
    fn translate(&self, time: EventTime) -> EventTime {
        time + self.offset
    }
}
