//! Non-blocking blink sequencer.
//!
//! Provides [`BlinkSequencer`], which plays [`BlinkSequence`]s on a single LED
//! by toggling it each time an interval expires. The sequencer never blocks:
//! call [`BlinkSequencer::advance`] often from the main loop and it performs
//! at most one transition per call.

use crate::led::OutputPort;
use crate::message::build_message;
use crate::sequence::BlinkSequence;
use crate::time::{TimeSource, has_expired, remaining};
use crate::types::{END_OF_SEQUENCE, Encoding, SequenceError};
use embedded_hal::delay::DelayNs;

/// Sleep step of the blocking helpers, in milliseconds.
///
/// Bounds how late the end of a sequence is noticed by
/// [`BlinkSequencer::wait_for_end`].
pub const POLL_STEP_MS: u32 = 10;

/// The current state of a blink sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    /// Nothing has played since construction or the last forced output.
    Idle,
    /// A sequence is being played.
    Playing,
    /// The last sequence played to its end and nothing new was staged.
    Finished,
}

/// Drives a single LED through timed on/off sequences.
///
/// A newly requested sequence is staged and only replaces the active one once
/// that reaches its end; staging again before then overwrites the staged one.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `L` - LED output type
/// * `T` - Time source type
pub struct BlinkSequencer<'t, L: OutputPort, T: TimeSource> {
    led: L,
    time_source: &'t T,
    state: SequencerState,
    active: Option<BlinkSequence>,
    cursor: usize,
    completed_passes: u32,
    staged: Option<BlinkSequence>,
    level: bool,
    interval_start: u32,
    interval_span: u32,
    finished: bool,
}

impl<'t, L: OutputPort, T: TimeSource> BlinkSequencer<'t, L, T> {
    /// Creates an idle sequencer, configures the output and turns the LED off.
    pub fn new(mut led: L, time_source: &'t T) -> Self {
        led.configure_as_output();
        led.set_level(false);

        Self {
            led,
            time_source,
            state: SequencerState::Idle,
            active: None,
            cursor: 0,
            completed_passes: 0,
            staged: None,
            level: false,
            interval_start: time_source.now_millis(),
            interval_span: 0,
            finished: false,
        }
    }

    /// Builds the sequence for a message code and stages it.
    ///
    /// # Errors
    /// * `OutOfRange` - Code not representable in `encoding`; nothing is staged
    pub fn set_message(&mut self, code: u8, encoding: Encoding) -> Result<(), SequenceError> {
        let sequence = build_message(code, encoding)?;
        self.stage(sequence);
        Ok(())
    }

    /// Like [`set_message`](Self::set_message), with the encoding given as a raw kind number.
    ///
    /// # Errors
    /// * `OutOfRange` - Unknown kind, or code not representable
    pub fn set_message_kind(&mut self, code: u8, kind: u8) -> Result<(), SequenceError> {
        self.set_message(code, Encoding::try_from(kind)?)
    }

    /// Stages a caller-built sequence.
    ///
    /// Sequences built with [`BlinkSequence::from_intervals`] end at the first
    /// zero interval; a zero pushed through [`SequenceBuilder::push`] is stored
    /// as 1 ms instead.
    ///
    /// [`SequenceBuilder::push`]: crate::sequence::SequenceBuilder::push
    pub fn set_raw_sequence(&mut self, sequence: BlinkSequence) {
        self.stage(sequence);
    }

    /// Records `sequence` to start once the active one ends.
    ///
    /// Replaces any sequence staged earlier that has not started yet.
    pub fn stage(&mut self, sequence: BlinkSequence) {
        if self.staged.is_some() {
            debug!("replacing staged sequence");
        }
        debug!("staged sequence of {} intervals", sequence.len());
        self.staged = Some(sequence);
    }

    /// Services the sequencer. Never blocks.
    ///
    /// # Returns
    /// * `true` - The LED was toggled during this call
    /// * `false` - Nothing visible changed (waiting, arming a sequence, or idle)
    pub fn advance(&mut self) -> bool {
        let now = self.time_source.now_millis();
        let mut pass_ended = false;

        if self.state == SequencerState::Playing {
            if !has_expired(now, self.interval_start, self.interval_span) {
                return false;
            }

            let interval = self
                .active
                .as_ref()
                .map_or(END_OF_SEQUENCE, |sequence| sequence.interval_at(self.cursor));

            if interval != END_OF_SEQUENCE {
                self.level = !self.level;
                self.led.set_level(self.level);
                self.interval_start = now;
                self.interval_span = u32::from(interval);
                self.cursor += 1;
                self.finished = false;
                return true;
            }

            self.finished = true;
            self.completed_passes = self.completed_passes.saturating_add(1);
            self.state = SequencerState::Finished;
            pass_ended = true;
            trace!("sequence pass {} ended at {}", self.completed_passes, now);
        }

        if let Some(sequence) = self.staged.take() {
            debug!("starting staged sequence at {}", now);
            self.active = Some(sequence);
            self.completed_passes = 0;
            self.arm(now);
        } else if pass_ended && !self.replays(now) {
            debug!("sequence finished");
        }

        false
    }

    /// Blocks until the active sequence reaches its end, servicing the LED meanwhile.
    ///
    /// Returns immediately if nothing is playing or staged. The end is noticed
    /// at most [`POLL_STEP_MS`] late. Clears the finished flag before returning.
    pub fn wait_for_end<D: DelayNs>(&mut self, delay: &mut D) {
        while !self.finished {
            if self.state != SequencerState::Playing && self.staged.is_none() {
                break;
            }
            self.advance();
            delay.delay_ms(POLL_STEP_MS);
        }
        self.finished = false;
    }

    /// Blocks for `millis` milliseconds while keeping the LED animated.
    ///
    /// Services the sequencer every [`POLL_STEP_MS`]; the last step sleeps only
    /// the remainder.
    pub fn delay_for<D: DelayNs>(&mut self, millis: u32, delay: &mut D) {
        let start = self.time_source.now_millis();

        while remaining(self.time_source.now_millis(), start, millis) > POLL_STEP_MS {
            self.advance();
            delay.delay_ms(POLL_STEP_MS);
        }

        self.advance();
        let rest = remaining(self.time_source.now_millis(), start, millis);
        if rest > 0 {
            delay.delay_ms(rest);
        }
    }

    /// Sets the LED to a steady level, dropping the active and staged sequences.
    pub fn force_output(&mut self, on: bool) {
        debug!("forcing output {}", on);
        self.level = on;
        self.led.set_level(on);
        self.active = None;
        self.staged = None;
        self.cursor = 0;
        self.completed_passes = 0;
        self.finished = false;
        self.state = SequencerState::Idle;
    }

    /// Returns the current state of the sequencer.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Returns the level last written to the LED.
    pub fn level(&self) -> bool {
        self.level
    }

    /// Returns true once the active sequence has played to its end.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns true if a sequence is waiting to start.
    pub fn has_staged(&self) -> bool {
        self.staged.is_some()
    }

    /// Returns the sequence currently being played, if any.
    pub fn current_sequence(&self) -> Option<&BlinkSequence> {
        self.active.as_ref()
    }

    /// Returns a reference to the LED output.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Consumes the sequencer and returns the LED output.
    pub fn release(self) -> L {
        self.led
    }

    /// Restarts the active sequence if its loop count allows another pass.
    fn replays(&mut self, now: u32) -> bool {
        let again = self
            .active
            .as_ref()
            .is_some_and(|sequence| sequence.loop_count().allows_another(self.completed_passes));
        if again {
            self.arm(now);
        }
        again
    }

    /// Rewinds to the first interval, evaluated on the next call.
    fn arm(&mut self, now: u32) {
        self.cursor = 0;
        self.interval_start = now;
        self.interval_span = 0;
        self.state = SequencerState::Playing;
    }
}
