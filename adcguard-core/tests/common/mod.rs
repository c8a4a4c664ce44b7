//! Common test utilities for integration tests
//!
//! This module provides:
//! - Simulated buses answering like real converters on a shared event clock
//! - A fixed-rate test chip with a configurable full scale
//! - Recording consumers and shutdown handlers
//! - A reactor loop that drives the acquisition timer

#![allow(dead_code)]

pub mod generators;
pub mod harness;

pub use generators::{sim_clock, Hx711Sim, ReplyBus, SimClock, TestChip};
pub use harness::{recording_consumer, recording_shutdown, run_reactor, Readings, Reasons, TestRng};
