//! Simulated converters and buses
//!
//! All simulations read the same [`SimClock`] the reactor advances, so reply
//! times line up with the driver's event times.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use adcguard_core::chips::{reply_word, Chip, ChipSettings, Sample};
use adcguard_core::constants::chips::HX711_NOT_READY_WORD;
use adcguard_core::timing::FixedRate;
use adcguard_core::traits::{BusTransport, Transfer};
use adcguard_core::{AcquisitionResult, EventTime};

/// Event clock shared between the reactor and the simulated bus
pub type SimClock = Rc<Cell<EventTime>>;

pub fn sim_clock(start: EventTime) -> SimClock {
    Rc::new(Cell::new(start))
}

/// Fixed-rate chip with a 16-bit big-endian reply and adjustable full scale
#[derive(Debug, Clone, Copy)]
pub struct TestChip {
    pub full_scale: f64,
}

impl TestChip {
    pub fn new(full_scale: f64) -> Self {
        Self { full_scale }
    }
}

impl Chip for TestChip {
    type Timing = FixedRate;

    const NAME: &'static str = "TEST";
    const REPLY_LEN: usize = 2;

    fn read_request(&self) -> &[u8] {
        &[]
    }

    fn prepare(&mut self, sample_time: EventTime) -> AcquisitionResult<ChipSettings> {
        Ok(ChipSettings {
            sample_time,
            full_scale: self.full_scale,
        })
    }

    fn decode(&self, raw: &[u8]) -> AcquisitionResult<Sample> {
        let word = reply_word::<2>(raw)?;
        Ok(Sample::Ready(i32::from(i16::from_be_bytes(word))))
    }
}

/// Replays a script of raw replies; the last reply repeats once exhausted
pub struct ReplyBus {
    clock: SimClock,
    replies: VecDeque<Vec<u8>>,
    last: Vec<u8>,
    pub writes: Vec<Vec<u8>>,
    pub transfers: usize,
}

impl ReplyBus {
    pub fn new(clock: &SimClock, replies: Vec<Vec<u8>>) -> Self {
        Self {
            clock: Rc::clone(clock),
            replies: replies.into(),
            last: Vec::new(),
            writes: Vec::new(),
            transfers: 0,
        }
    }

    /// Two-byte signed words, as an ADS1100 or [`TestChip`] answers
    pub fn words(clock: &SimClock, words: &[i16]) -> Self {
        Self::new(clock, words.iter().map(|w| w.to_be_bytes().to_vec()).collect())
    }

    /// HX711 replies; `None` is the not-ready sentinel
    pub fn hx711(clock: &SimClock, samples: &[Option<i32>]) -> Self {
        let replies = samples
            .iter()
            .map(|sample| {
                let word = sample.map_or(HX711_NOT_READY_WORD, |raw| raw << 8);
                word.to_be_bytes().to_vec()
            })
            .collect();
        Self::new(clock, replies)
    }
}

impl BusTransport for ReplyBus {
    fn transfer(&mut self, _request: &[u8], response: &mut [u8]) -> Transfer {
        self.transfers += 1;
        if let Some(reply) = self.replies.pop_front() {
            self.last = reply;
        }
        let len = self.last.len().min(response.len());
        response[..len].copy_from_slice(&self.last[..len]);
        Transfer {
            len,
            receive_time: self.clock.get(),
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        self.writes.push(bytes.to_vec());
    }
}

/// Free-running HX711: a conversion completes every `period` seconds
/// starting at `phase`, and each result can be read exactly once
pub struct Hx711Sim {
    clock: SimClock,
    period: EventTime,
    phase: EventTime,
    raw: i32,
    last_index: Option<i64>,
    pub transfers: usize,
    pub sentinels: usize,
}

impl Hx711Sim {
    pub fn new(clock: &SimClock, period: EventTime, phase: EventTime, raw: i32) -> Self {
        Self {
            clock: Rc::clone(clock),
            period,
            phase,
            raw,
            last_index: None,
            transfers: 0,
            sentinels: 0,
        }
    }

    fn latest_conversion(&self) -> Option<i64> {
        let now = self.clock.get();
        if now < self.phase {
            return None;
        }
        Some(((now - self.phase) / self.period).floor() as i64)
    }
}

impl BusTransport for Hx711Sim {
    fn transfer(&mut self, _request: &[u8], response: &mut [u8]) -> Transfer {
        self.transfers += 1;

        let fresh = match (self.latest_conversion(), self.last_index) {
            (Some(latest), Some(read)) => latest > read,
            (Some(_), None) => true,
            (None, _) => false,
        };
        let word = if fresh {
            self.last_index = self.latest_conversion();
            self.raw << 8
        } else {
            self.sentinels += 1;
            HX711_NOT_READY_WORD
        };

        let bytes = word.to_be_bytes();
        let len = bytes.len().min(response.len());
        response[..len].copy_from_slice(&bytes[..len]);
        Transfer {
            len,
            receive_time: self.clock.get(),
        }
    }

    fn write(&mut self, _bytes: &[u8]) {}
}
