//! HX711 24-bit bridge ADC
//!
//! The HX711 has no registers. Data is shifted out on every clock burst and
//! DOUT stays high until a conversion is ready. Reading it as a 4-byte SPI
//! transfer therefore yields either the 24-bit result in the upper three bytes
//! or an all-ones word while the chip is busy.
//!
//! Only the 10 SPS setting is supported, and the exact rate depends on the
//! chip's internal oscillator, so the profile uses adaptive clock recovery.

use crate::constants::chips::{
    HX711_FULL_SCALE, HX711_NOT_READY_WORD, HX711_READ_REQUEST, HX711_REPLY_LEN,
};
use crate::errors::AcquisitionResult;
use crate::time::EventTime;
use crate::timing::AdaptiveRate;

use super::{reply_word, Chip, ChipSettings, Sample};

/// HX711 profile
#[derive(Debug, Clone, Copy, Default)]
pub struct Hx711;

impl Hx711 {
    /// Create the profile
    pub fn new() -> Self {
        Self
    }
}

impl Chip for Hx711 {
    type Timing = AdaptiveRate;

    const NAME: &'static str = "HX711";
    const REPLY_LEN: usize = HX711_REPLY_LEN;

    fn read_request(&self) -> &[u8] {
        &HX711_READ_REQUEST
    }

    fn prepare(&mut self, sample_time: EventTime) -> AcquisitionResult<ChipSettings> {
        Ok(ChipSettings {
            sample_time,
            full_scale: HX711_FULL_SCALE,
        })
    }

    fn decode(&self, raw: &[u8]) -> AcquisitionResult<Sample> {
        let word = i32::from_be_bytes(reply_word::<HX711_REPLY_LEN>(raw)?);
        if word == HX711_NOT_READY_WORD {
            return Ok(Sample::NotReady);
        }

        // Arithmetic shift keeps the 24-bit two's complement sign
        Ok(Sample::Ready(word >> 8))
    }
}
