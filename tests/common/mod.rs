//! Shared test infrastructure for talking-led integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use embedded_hal::delay::DelayNs;
use talking_led::{OutputPort, TimeSource};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock millisecond clock with controllable time advancement
pub struct MockTimeSource {
    now: Cell<u32>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            now: Cell::new(millis),
        }
    }

    /// Advance time by the given number of milliseconds, wrapping like a hardware counter
    pub fn advance(&self, millis: u32) {
        self.now.set(self.now.get().wrapping_add(millis));
    }

    pub fn set_time(&self, millis: u32) {
        self.now.set(millis);
    }
}

impl TimeSource for MockTimeSource {
    fn now_millis(&self) -> u32 {
        self.now.get()
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that advances the mock clock instead of sleeping
pub struct MockDelay<'a> {
    timer: &'a MockTimeSource,
    pub sleeps: heapless::Vec<u32, 1024>,
}

impl<'a> MockDelay<'a> {
    pub fn new(timer: &'a MockTimeSource) -> Self {
        Self {
            timer,
            sleeps: heapless::Vec::new(),
        }
    }

    pub fn total_slept(&self) -> u32 {
        self.sleeps.iter().sum()
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        let _ = self.sleeps.push(ms);
        self.timer.advance(ms);
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records all level changes for testing
pub struct MockLed {
    level: bool,
    configured: bool,
    history: heapless::Vec<bool, 256>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            level: false,
            configured: false,
            history: heapless::Vec::new(),
        }
    }

    pub fn level(&self) -> bool {
        self.level
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }
}

impl OutputPort for MockLed {
    fn configure_as_output(&mut self) {
        self.configured = true;
    }

    fn set_level(&mut self, on: bool) {
        self.level = on;
        let _ = self.history.push(on);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Splits the encoded part of a message (after the lead-in) into on/off pairs
pub fn message_pairs(intervals: &[u16]) -> heapless::Vec<(u16, u16), 16> {
    intervals[talking_led::message::LEAD_IN.len()..]
        .chunks(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}
