//! Oversampling Accumulator
//!
//! Slow delta-sigma converters still carry a few counts of noise per
//! conversion. Averaging N conversions trades report latency for resolution;
//! this type does the bookkeeping.
//!
//! ## Normalization
//!
//! The finished value is divided by the chip's full-scale code so consumers see
//! a ratio in `[-1, 1]` regardless of converter width:
//!
//! ```text
//! value = (s_1 + s_2 + ... + s_N) / N / full_scale
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use core::num::NonZeroU32;
//! use adcguard_core::accumulator::Oversampler;
//!
//! let mut acc = Oversampler::new(NonZeroU32::new(4).unwrap(), 100.0);
//! for raw in [100, 104, 96, 100] {
//!     acc.add(raw);
//! }
//! assert!(acc.is_complete());
//! assert_eq!(acc.finish(), 1.0);
//! assert_eq!(acc.count(), 0);
//! ```

use core::num::NonZeroU32;

/// Running sum of raw conversions
///
/// Invariant between cycles: `count < sample_count`. The owner calls
/// [`finish`](Self::finish) as soon as [`is_complete`](Self::is_complete)
/// turns true.
#[derive(Debug, Clone)]
pub struct Oversampler {
    sum: f64,
    count: u32,
    sample_count: NonZeroU32,
    full_scale: f64,
}

impl Oversampler {
    /// Create an empty accumulator averaging `sample_count` conversions
    pub fn new(sample_count: NonZeroU32, full_scale: f64) -> Self {
        Self {
            sum: 0.0,
            count: 0,
            sample_count,
            full_scale,
        }
    }

    /// Add one decoded conversion
    pub fn add(&mut self, sample: i32) {
        self.sum += f64::from(sample);
        self.count += 1;
    }

    /// True once `sample_count` conversions have been added
    pub fn is_complete(&self) -> bool {
        self.count >= self.sample_count.get()
    }

    /// Produce the normalized average and start over
    pub fn finish(&mut self) -> f64 {
        let value = self.sum / f64::from(self.sample_count.get()) / self.full_scale;
        self.reset();
        value
    }

    /// Drop any partial accumulation
    pub fn reset(&mut self) {
        self.sum = 0.0;
        self.count = 0;
    }

    /// Conversions accumulated so far
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Raw sum accumulated so far
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Configured oversampling factor
    pub fn sample_count(&self) -> NonZeroU32 {
        self.sample_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oversampler(n: u32, full_scale: f64) -> Oversampler {
        Oversampler::new(NonZeroU32::new(n).unwrap(), full_scale)
    }

    #[test]
    fn averages_and_normalizes() {
        let mut acc = oversampler(4, 100.0);
        for raw in [100, 104, 96, 100] {
            assert!(!acc.is_complete());
            acc.add(raw);
        }

        assert!(acc.is_complete());
        assert_eq!(acc.finish(), 1.0);
    }

    #[test]
    fn finish_resets() {
        let mut acc = oversampler(2, 1.0);
        acc.add(10);
        acc.add(20);
        assert_eq!(acc.finish(), 15.0);

        assert_eq!(acc.count(), 0);
        assert_eq!(acc.sum(), 0.0);
        assert!(!acc.is_complete());
    }

    #[test]
    fn single_sample_passthrough() {
        let mut acc = oversampler(1, 8_388_608.0);
        acc.add(-8_388_608);
        assert!(acc.is_complete());
        assert_eq!(acc.finish(), -1.0);
    }

    #[test]
    fn reset_discards_partial_sum() {
        let mut acc = oversampler(3, 1.0);
        acc.add(7);
        acc.add(9);
        acc.reset();

        acc.add(1);
        acc.add(2);
        acc.add(3);
        assert_eq!(acc.finish(), 2.0);
    }
}
