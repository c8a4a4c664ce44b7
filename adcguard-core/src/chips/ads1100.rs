//! ADS1100 16-bit delta-sigma ADC
//!
//! Runs in continuous conversion mode; the output register always holds the
//! latest result, so a fixed polling interval matching the data rate is all
//! the timing this part needs.
//!
//! ## Data Rate and Resolution
//!
//! | Rate    | DR bits | Full-scale code |
//! | ---:    | :--:    | ---:            |
//! | 8 SPS   | 11      | 32768           |
//! | 16 SPS  | 10      | 16384           |
//! | 32 SPS  | 01      | 8192            |
//! | 128 SPS | 00      | 2048            |
//!
//! The configured sample time is rounded to the nearest supported rate using
//! the midpoints between neighbours (12, 24 and 80 SPS).

use heapless::Vec;

use crate::constants::chips::{
    ADS1100_CHIP_ADDR, ADS1100_FULL_SCALE_BY_RATE, ADS1100_RATES_SPS, ADS1100_RATE_CODES,
    ADS1100_REPLY_LEN,
};
use crate::errors::{AcquisitionError, AcquisitionResult};
use crate::time::EventTime;
use crate::timing::FixedRate;

use super::{reply_word, Chip, ChipSettings, InitSequence, Sample};

/// Programmable gain amplifier setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ads1100Gain {
    /// Gain 1
    #[default]
    X1,
    /// Gain 2
    X2,
    /// Gain 4
    X4,
    /// Gain 8
    X8,
}

impl Ads1100Gain {
    /// PGA bits of the configuration register
    pub fn code(self) -> u8 {
        match self {
            Self::X1 => 0,
            Self::X2 => 1,
            Self::X4 => 2,
            Self::X8 => 3,
        }
    }
}

impl TryFrom<u8> for Ads1100Gain {
    type Error = AcquisitionError;

    fn try_from(gain: u8) -> Result<Self, Self::Error> {
        match gain {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            4 => Ok(Self::X4),
            8 => Ok(Self::X8),
            _ => Err(AcquisitionError::UnsupportedGain { gain }),
        }
    }
}

/// Output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ads1100Rate {
    /// 8 samples per second, 16-bit resolution
    #[default]
    Sps8,
    /// 16 samples per second, 15-bit resolution
    Sps16,
    /// 32 samples per second, 14-bit resolution
    Sps32,
    /// 128 samples per second, 12-bit resolution
    Sps128,
}

impl Ads1100Rate {
    const ALL: [Self; 4] = [Self::Sps8, Self::Sps16, Self::Sps32, Self::Sps128];

    /// Closest supported rate to one conversion per `sample_time`
    pub fn nearest(sample_time: EventTime) -> Self {
        let requested = 1.0 / sample_time;
        for (pair, rate) in ADS1100_RATES_SPS.windows(2).zip(Self::ALL) {
            let midpoint = f64::from(pair[0] + pair[1]) / 2.0;
            if requested < midpoint {
                return rate;
            }
        }
        Self::Sps128
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Samples per second
    pub fn sps(self) -> u32 {
        ADS1100_RATES_SPS[self.index()]
    }

    /// DR bits of the configuration register
    pub fn code(self) -> u8 {
        ADS1100_RATE_CODES[self.index()]
    }

    /// Output code at full scale
    pub fn full_scale(self) -> f64 {
        ADS1100_FULL_SCALE_BY_RATE[self.index()]
    }

    /// Time per conversion (seconds)
    pub fn sample_time(self) -> EventTime {
        1.0 / f64::from(self.sps())
    }
}

/// ADS1100 profile
#[derive(Debug, Clone, Copy, Default)]
pub struct Ads1100 {
    gain: Ads1100Gain,
    rate: Ads1100Rate,
}

impl Ads1100 {
    /// Factory bus address; the bus transport is expected to be opened on it
    pub const ADDRESS: u8 = ADS1100_CHIP_ADDR;

    /// Create a profile for the given PGA gain (1, 2, 4 or 8)
    pub fn new(gain: u8) -> AcquisitionResult<Self> {
        Ok(Self {
            gain: Ads1100Gain::try_from(gain)?,
            rate: Ads1100Rate::default(),
        })
    }

    /// Selected gain
    pub fn gain(&self) -> Ads1100Gain {
        self.gain
    }

    /// Data rate picked at `prepare`
    pub fn rate(&self) -> Ads1100Rate {
        self.rate
    }

    /// Configuration register value: continuous conversion, rate and gain
    pub fn config_byte(&self) -> u8 {
        (self.rate.code() << 2) | self.gain.code()
    }
}

impl Chip for Ads1100 {
    type Timing = FixedRate;

    const NAME: &'static str = "ADS1100";
    const REPLY_LEN: usize = ADS1100_REPLY_LEN;

    fn read_request(&self) -> &[u8] {
        &[]
    }

    fn prepare(&mut self, sample_time: EventTime) -> AcquisitionResult<ChipSettings> {
        if !sample_time.is_finite() || sample_time <= 0.0 {
            return Err(AcquisitionError::InvalidSampleTime { sample_time });
        }

        self.rate = Ads1100Rate::nearest(sample_time);
        Ok(ChipSettings {
            sample_time: self.rate.sample_time(),
            full_scale: self.rate.full_scale(),
        })
    }

    fn init_sequence(&self) -> InitSequence {
        let mut sequence = Vec::new();
        // Capacity is at least one byte
        let _ = sequence.push(self.config_byte());
        sequence
    }

    fn decode(&self, raw: &[u8]) -> AcquisitionResult<Sample> {
        let word = reply_word::<ADS1100_REPLY_LEN>(raw)?;
        Ok(Sample::Ready(i32::from(i16::from_be_bytes(word))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::chips::ADS1100_GAINS;

    #[test]
    fn rejects_unsupported_gain() {
        assert_eq!(
            Ads1100::new(3).unwrap_err(),
            AcquisitionError::UnsupportedGain { gain: 3 }
        );
        assert!(Ads1100::new(0).is_err());
        for gain in ADS1100_GAINS {
            assert!(Ads1100::new(gain).is_ok());
        }
    }

    #[test]
    fn picks_nearest_rate() {
        assert_eq!(Ads1100Rate::nearest(1.0), Ads1100Rate::Sps8);
        assert_eq!(Ads1100Rate::nearest(1.0 / 11.9), Ads1100Rate::Sps8);
        assert_eq!(Ads1100Rate::nearest(1.0 / 12.1), Ads1100Rate::Sps16);
        assert_eq!(Ads1100Rate::nearest(1.0 / 30.0), Ads1100Rate::Sps32);
        assert_eq!(Ads1100Rate::nearest(1.0 / 79.0), Ads1100Rate::Sps32);
        assert_eq!(Ads1100Rate::nearest(1.0 / 81.0), Ads1100Rate::Sps128);
        assert_eq!(Ads1100Rate::nearest(0.001), Ads1100Rate::Sps128);
    }

    #[test]
    fn prepare_corrects_sample_time_and_scale() {
        let mut chip = Ads1100::new(2).unwrap();
        let settings = chip.prepare(0.05).unwrap();

        assert_eq!(chip.rate(), Ads1100Rate::Sps16);
        assert_eq!(settings.sample_time, 1.0 / 16.0);
        assert_eq!(settings.full_scale, 16384.0);
    }

    #[test]
    fn config_byte_layout() {
        let mut chip = Ads1100::new(8).unwrap();
        chip.prepare(1.0 / 128.0).unwrap();
        // DR = 00, PGA = 11
        assert_eq!(chip.config_byte(), 0b0000_0011);

        let mut chip = Ads1100::new(1).unwrap();
        chip.prepare(1.0 / 8.0).unwrap();
        // DR = 11, PGA = 00
        assert_eq!(chip.config_byte(), 0b0000_1100);
        assert_eq!(chip.init_sequence().as_slice(), &[0b0000_1100]);
        assert_eq!(Ads1100::ADDRESS, 0x49);
    }

    #[test]
    fn decodes_big_endian_i16() {
        let chip = Ads1100::new(1).unwrap();
        assert_eq!(chip.decode(&[0x7F, 0xFF]), Ok(Sample::Ready(32767)));
        assert_eq!(chip.decode(&[0x80, 0x00]), Ok(Sample::Ready(-32768)));
        assert_eq!(chip.decode(&[0xFF, 0xFF]), Ok(Sample::Ready(-1)));
        assert!(matches!(chip.decode(&[0x12]), Err(AcquisitionError::ShortRead { .. })));
    }
}
