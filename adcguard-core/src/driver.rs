//! Acquisition Scheduler
//!
//! [`AcquisitionDriver`] is the timer callback that ties the pieces together.
//! The owner's event loop calls [`on_timer`](AcquisitionDriver::on_timer) at
//! each deadline and reschedules to whatever it returns.
//!
//! ## State Machine
//!
//! ```text
//!  Configuring --start()--> AwaitingFirstRead --first timer--> Sampling
//!                                                               |    ^
//!                      transfer -> decode -> accumulate --------+    |
//!                                      | complete                   |
//!                                      v                            |
//!                          publish -> range check -> throttle ------+
//!                                          | sustained violation
//!                                          v
//!                                       Halted  (also reached by stop())
//! ```
//!
//! With adaptive timing the first transfer after start only anchors the
//! conversion clock and contributes no sample. With fixed-rate timing it is
//! already accumulated.
//!
//! ## Blocking
//!
//! A timer invocation blocks for one bus transfer, plus any repeats caused by
//! short replies. Short replies are retried until the bus delivers a full
//! word; an unreliable bus can stall the loop here. A full-length reply the
//! chip rejects is not retried: the driver shuts down instead.
//!
//! ## Usage Example
//!
//! ```rust
//! use adcguard_core::chips::Ads1100;
//! use adcguard_core::traits::{BusTransport, Transfer};
//! use adcguard_core::{AcquisitionDriver, Wake};
//!
//! struct Bus;
//! impl BusTransport for Bus {
//!     fn transfer(&mut self, _request: &[u8], response: &mut [u8]) -> Transfer {
//!         response.copy_from_slice(&[0x10, 0x00]);
//!         Transfer { len: 2, receive_time: 0.0 }
//!     }
//!     fn write(&mut self, _bytes: &[u8]) {}
//! }
//!
//! let chip = Ads1100::new(1)?;
//! let mut driver = AcquisitionDriver::new(chip, Bus, |reason: &str| eprintln!("{reason}"));
//! driver.setup_minmax(0.125, 2, -1.0, 1.0, 3)?;
//! driver.setup_callback(0.5, |time: f64, value: f64| println!("{time}: {value}"))?;
//!
//! assert_eq!(driver.start()?, Wake::Now);
//! let next = driver.on_timer(10.0);
//! assert_eq!(next, Wake::At(10.125));
//! # Ok::<(), adcguard_core::AcquisitionError>(())
//! ```

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use core::fmt::{self, Display, Write};

use crate::accumulator::Oversampler;
use crate::chips::{Chip, Sample};
use crate::config::AcquisitionConfig;
use crate::constants::chips::MAX_REPLY_LEN;
use crate::errors::{AcquisitionError, AcquisitionResult};
use crate::range::{RangeMonitor, RangeVerdict};
use crate::report::{Reading, ReportThrottle};
use crate::time::{ClockTranslator, EventTime, IdentityClock, Wake};
use crate::timing::TimingRecovery;
use crate::traits::{BusTransport, ReadingConsumer, ShutdownHandler};

/// Capacity of the fatal shutdown message
const REASON_CAPACITY: usize = 128;

/// Magnitude above which reason numbers switch to exponent notation
const FIXED_NOTATION_LIMIT: f64 = 1e9;

/// Number in a shutdown reason, bounded in width
struct ReasonNumber(f64);

impl Display for ReasonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.abs() < FIXED_NOTATION_LIMIT {
            write!(f, "{:.6}", self.0)
        } else {
            write!(f, "{:e}", self.0)
        }
    }
}

/// Lifecycle phase of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting setup calls
    Configuring,
    /// Started, first timer invocation pending
    AwaitingFirstRead,
    /// Reading and accumulating conversions
    Sampling,
    /// Stopped or shut down; no further transfers
    Halted,
}

/// Counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquisitionStats {
    /// Timer invocations that performed a read
    pub cycles: u64,
    /// Transfers repeated because the reply was short
    pub short_reads: u64,
    /// Not-ready sentinel replies
    pub not_ready: u64,
    /// Completed averages
    pub averages: u64,
    /// Averages outside the configured range
    pub range_violations: u64,
    /// Readings delivered to the consumer
    pub reports_delivered: u64,
    /// Readings held back by the report throttle
    pub reports_throttled: u64,
}

/// State that only exists once the configuration is frozen
struct Run {
    accumulator: Oversampler,
    monitor: RangeMonitor,
    throttle: ReportThrottle,
}

/// Timer-driven acquisition loop for one chip instance
pub struct AcquisitionDriver<C: Chip, B: BusTransport> {
    chip: C,
    bus: B,
    timing: C::Timing,
    shutdown: Box<dyn ShutdownHandler>,
    clock: Box<dyn ClockTranslator>,
    consumer: Option<Box<dyn ReadingConsumer>>,
    config: Option<AcquisitionConfig>,
    report_time: EventTime,
    run: Option<Run>,
    phase: Phase,
    last: Reading,
    stats: AcquisitionStats,
}

impl<C: Chip, B: BusTransport> AcquisitionDriver<C, B> {
    /// Bind a chip profile to its bus and the process shutdown hook
    pub fn new<S>(chip: C, bus: B, shutdown: S) -> Self
    where
        S: ShutdownHandler + 'static,
    {
        debug_assert!(C::REPLY_LEN <= MAX_REPLY_LEN, "reply wider than transfer buffer");

        Self {
            chip,
            bus,
            timing: C::Timing::default(),
            shutdown: Box::new(shutdown),
            clock: Box::new(IdentityClock),
            consumer: None,
            config: None,
            report_time: 0.0,
            run: None,
            phase: Phase::Configuring,
            last: Reading::default(),
            stats: AcquisitionStats::default(),
        }
    }

    /// Translate reading times into the consumer's clock
    pub fn with_clock<K>(mut self, clock: K) -> Self
    where
        K: ClockTranslator + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Configure oversampling and the range check
    pub fn setup_minmax(
        &mut self,
        sample_time: EventTime,
        sample_count: u32,
        minval: f64,
        maxval: f64,
        range_check_count: u32,
    ) -> AcquisitionResult<()> {
        self.ensure_configuring()?;

        let config = AcquisitionConfig::new(
            sample_time,
            sample_count,
            minval,
            maxval,
            range_check_count,
        );
        config.validate()?;
        self.config = Some(config);
        Ok(())
    }

    /// Register the consumer and its minimum report interval
    pub fn setup_callback<F>(&mut self, report_time: EventTime, consumer: F) -> AcquisitionResult<()>
    where
        F: ReadingConsumer + 'static,
    {
        self.ensure_configuring()?;

        if !report_time.is_finite() || report_time < 0.0 {
            return Err(AcquisitionError::InvalidReportTime { report_time });
        }
        self.report_time = report_time;
        self.consumer = Some(Box::new(consumer));
        Ok(())
    }

    /// Freeze the configuration, program the chip and request the first wake
    pub fn start(&mut self) -> AcquisitionResult<Wake> {
        self.ensure_configuring()?;

        let config = self
            .config
            .ok_or(AcquisitionError::NotConfigured)?
            .with_report_time(self.report_time);
        config.validate()?;

        let settings = self.chip.prepare(config.sample_time)?;
        self.timing.configure(settings.sample_time);

        let threshold = config.effective_range_check_count(self.timing.min_range_check_count());
        self.run = Some(Run {
            accumulator: Oversampler::new(config.oversampling()?, settings.full_scale),
            monitor: RangeMonitor::new(config.minval, config.maxval, threshold),
            throttle: ReportThrottle::new(config.report_time),
        });

        let init = self.chip.init_sequence();
        if !init.is_empty() {
            self.bus.write(&init);
        }

        log_info!(
            "{}: sampling every {:.4}s, averaging {} conversions, range [{}, {}] x{}",
            C::NAME,
            settings.sample_time,
            config.sample_count,
            config.minval,
            config.maxval,
            threshold
        );

        self.config = Some(config);
        self.phase = Phase::AwaitingFirstRead;
        Ok(Wake::Now)
    }

    /// Timer callback: read one conversion and return the next deadline
    pub fn on_timer(&mut self, eventtime: EventTime) -> Wake {
        if matches!(self.phase, Phase::Configuring | Phase::Halted) {
            return Wake::Never;
        }

        self.stats.cycles += 1;
        let (sample, receive_time) = match self.read_sample() {
            Ok(read) => read,
            Err(err) => {
                self.halt_on_fault(err);
                return Wake::Never;
            }
        };

        if self.phase == Phase::AwaitingFirstRead {
            self.phase = Phase::Sampling;
            if self.timing.needs_warm_up() {
                return Wake::At(self.timing.warm_up(eventtime));
            }
        }

        match sample {
            Sample::NotReady => {
                self.stats.not_ready += 1;
                Wake::At(self.timing.on_not_ready(eventtime))
            }
            Sample::Ready(raw) => self.accumulate(eventtime, raw, receive_time),
        }
    }

    /// Stop acquiring; any partial average is discarded
    pub fn stop(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.accumulator.reset();
        }
        if self.phase != Phase::Halted {
            log_info!("{}: acquisition stopped", C::NAME);
        }
        self.phase = Phase::Halted;
    }

    /// Most recent finished average, regardless of report throttling
    pub fn last_value(&self) -> Reading {
        self.last
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Diagnostic counters
    pub fn stats(&self) -> AcquisitionStats {
        self.stats
    }

    /// Timing strategy state
    pub fn timing(&self) -> &C::Timing {
        &self.timing
    }

    /// Chip profile
    pub fn chip(&self) -> &C {
        &self.chip
    }

    /// Underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Underlying bus, mutably
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Configuration, frozen once started
    pub fn config(&self) -> Option<&AcquisitionConfig> {
        self.config.as_ref()
    }

    /// Conversions in the current partial average
    pub fn pending_samples(&self) -> u32 {
        self.run.as_ref().map_or(0, |run| run.accumulator.count())
    }

    /// Consecutive out-of-range averages so far
    pub fn range_error_count(&self) -> u32 {
        self.run.as_ref().map_or(0, |run| run.monitor.error_count())
    }

    fn ensure_configuring(&self) -> AcquisitionResult<()> {
        if self.phase == Phase::Configuring {
            Ok(())
        } else {
            Err(AcquisitionError::AlreadyStarted)
        }
    }

    fn read_sample(&mut self) -> AcquisitionResult<(Sample, EventTime)> {
        let mut buf = [0u8; MAX_REPLY_LEN];
        let response = &mut buf[..C::REPLY_LEN.min(MAX_REPLY_LEN)];

        loop {
            let transfer = self.bus.transfer(self.chip.read_request(), response);
            let len = transfer.len.min(response.len());

            match self.chip.decode(&response[..len]) {
                Ok(sample) => return Ok((sample, transfer.receive_time)),
                Err(err @ AcquisitionError::ShortRead { .. }) => {
                    self.stats.short_reads += 1;
                    log_info!("{}: conversion failed ({}), trying again...", C::NAME, err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn accumulate(&mut self, eventtime: EventTime, raw: i32, receive_time: EventTime) -> Wake {
        let next = self.timing.on_ready(eventtime);

        let Some(run) = self.run.as_mut() else {
            return Wake::Never;
        };

        run.accumulator.add(raw);
        if !run.accumulator.is_complete() {
            return Wake::At(next);
        }

        let reading = Reading {
            value: run.accumulator.finish(),
            time: self.timing.reading_time(receive_time),
        };
        self.last = reading;
        self.stats.averages += 1;

        match run.monitor.check(reading.value) {
            RangeVerdict::InRange => {}
            RangeVerdict::Violation { count } => {
                self.stats.range_violations += 1;
                log_warn!(
                    "{}: reading {} outside [{}, {}] ({} of {})",
                    C::NAME,
                    reading.value,
                    run.monitor.min(),
                    run.monitor.max(),
                    count,
                    run.monitor.threshold()
                );
            }
            RangeVerdict::Fatal { .. } => {
                self.stats.range_violations += 1;
                let (min, max) = (run.monitor.min(), run.monitor.max());
                self.halt_out_of_range(min, reading.value, max);
                return Wake::Never;
            }
        }

        self.report(eventtime, reading);
        Wake::At(next)
    }

    fn report(&mut self, eventtime: EventTime, reading: Reading) {
        let (Some(run), Some(consumer)) = (self.run.as_mut(), self.consumer.as_mut()) else {
            return;
        };

        match run.throttle.admit(eventtime) {
            Ok(()) => {
                consumer.on_reading(self.clock.translate(reading.time), reading.value);
                self.stats.reports_delivered += 1;
            }
            Err(nb::Error::WouldBlock) => self.stats.reports_throttled += 1,
            Err(nb::Error::Other(never)) => match never {},
        }
    }

    fn halt_out_of_range(&mut self, min: f64, value: f64, max: f64) {
        let mut reason: heapless::String<REASON_CAPACITY> = heapless::String::new();
        // Overflow only truncates the message
        let _ = write!(
            reason,
            "{} out of range: {} < {} < {}",
            C::NAME,
            ReasonNumber(min),
            ReasonNumber(value),
            ReasonNumber(max)
        );
        self.halt(&reason);
    }

    fn halt_on_fault(&mut self, err: AcquisitionError) {
        let mut reason: heapless::String<REASON_CAPACITY> = heapless::String::new();
        let _ = write!(reason, "{} read failed: {}", C::NAME, err);
        self.halt(&reason);
    }

    fn halt(&mut self, reason: &str) {
        log_error!("{}", reason);
        self.shutdown.invoke_fatal(reason);
        self.stop();
    }
}
