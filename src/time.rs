//! Time abstraction for platform-agnostic timing.
//!
//! Timestamps are plain `u32` millisecond counts from a free-running counter.
//! The counter is allowed to wrap, so timing is expressed as a span measured
//! from a start timestamp, and elapsed time is the wrapping difference
//! `now - start`. This stays correct for any span up to `u32::MAX` ms.

/// Trait for abstracting the monotonic millisecond clock.
pub trait TimeSource {
    /// Returns the current counter value in milliseconds.
    fn now_millis(&self) -> u32;
}

/// Milliseconds since `start`, across counter wraps.
#[inline]
pub fn elapsed_since(now: u32, start: u32) -> u32 {
    now.wrapping_sub(start)
}

/// Returns true once `span` milliseconds have passed since `start`.
#[inline]
pub fn has_expired(now: u32, start: u32, span: u32) -> bool {
    elapsed_since(now, start) >= span
}

/// Milliseconds left of `span` started at `start`, zero once it has expired.
#[inline]
pub fn remaining(now: u32, start: u32, span: u32) -> u32 {
    span.saturating_sub(elapsed_since(now, start))
}
