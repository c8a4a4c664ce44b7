//! Reactor loop and recording sinks

use std::cell::RefCell;
use std::rc::Rc;

use adcguard_core::chips::Chip;
use adcguard_core::traits::BusTransport;
use adcguard_core::{AcquisitionDriver, EventTime, Wake};

use super::generators::SimClock;

/// Readings seen by the consumer, in its time domain
pub type Readings = Rc<RefCell<Vec<(EventTime, f64)>>>;

/// Reasons passed to the shutdown handler
pub type Reasons = Rc<RefCell<Vec<String>>>;

pub fn recording_consumer() -> (Readings, impl FnMut(EventTime, f64) + 'static) {
    let readings: Readings = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&readings);
    (readings, move |time: EventTime, value: f64| {
        sink.borrow_mut().push((time, value))
    })
}

pub fn recording_shutdown() -> (Reasons, impl FnMut(&str) + 'static) {
    let reasons: Reasons = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reasons);
    (reasons, move |reason: &str| sink.borrow_mut().push(reason.to_string()))
}

/// Start the driver and serve its timer until `until` or until it halts
///
/// `jitter` returns the lateness added to each deadline, modelling a busy
/// event loop. Returns the number of timer invocations.
pub fn run_reactor<C, B>(
    driver: &mut AcquisitionDriver<C, B>,
    clock: &SimClock,
    until: EventTime,
    mut jitter: impl FnMut() -> EventTime,
) -> usize
where
    C: Chip,
    B: BusTransport,
{
    let mut wake = driver.start().expect("driver should start");
    let mut invocations = 0;

    loop {
        let deadline = match wake {
            Wake::Now => clock.get(),
            Wake::At(at) => at.max(clock.get()),
            Wake::Never => break,
        };
        let now = deadline + jitter();
        if now > until {
            break;
        }

        clock.set(now);
        wake = driver.on_timer(now);
        invocations += 1;
    }

    invocations
}

/// Deterministic pseudo-random source
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        // Xorshift algorithm
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32() >> 8) / 16_777_216.0
    }

    pub fn gen_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}
