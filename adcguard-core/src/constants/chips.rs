//! Chip Reply Formats and Configuration Tables

// ===== TRANSFER BUFFER =====

/// Capacity of the transfer buffer (bytes); bounds `Chip::REPLY_LEN`.
pub const MAX_REPLY_LEN: usize = 8;

// ===== HX711 =====

/// Bytes clocked per conversion: 24 data bits plus one padding byte.
pub const HX711_REPLY_LEN: usize = 4;

/// Request pattern clocked out while reading.
pub const HX711_READ_REQUEST: [u8; HX711_REPLY_LEN] = [0, 0, 0, 0];

/// Raw big-endian word returned while DOUT is still high (not ready).
pub const HX711_NOT_READY_WORD: i32 = -256;

/// Full-scale divisor of the 24-bit two's complement output (2^23).
pub const HX711_FULL_SCALE: f64 = 8_388_608.0;

// ===== ADS1100 =====

/// Output register width (bytes).
pub const ADS1100_REPLY_LEN: usize = 2;

/// Default 7-bit bus address (AD1 variant).
pub const ADS1100_CHIP_ADDR: u8 = 0x49;

/// Supported data rates (samples per second).
///
/// Source: ADS1100 datasheet, table 5
pub const ADS1100_RATES_SPS: [u32; 4] = [8, 16, 32, 128];

/// DR bits for each entry of [`ADS1100_RATES_SPS`].
pub const ADS1100_RATE_CODES: [u8; 4] = [3, 2, 1, 0];

/// Output code magnitude at full scale for each entry of
/// [`ADS1100_RATES_SPS`]; resolution drops as the rate rises.
pub const ADS1100_FULL_SCALE_BY_RATE: [f64; 4] = [32768.0, 16384.0, 8192.0, 2048.0];

/// Supported PGA gains.
pub const ADS1100_GAINS: [u8; 4] = [1, 2, 4, 8];
