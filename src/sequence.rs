use crate::types::{END_OF_SEQUENCE, Interval, LoopCount, SequenceError};
use heapless::Vec;

/// Maximum number of intervals a sequence can hold, terminator excluded.
pub const SEQUENCE_CAPACITY: usize = 32;

/// A timed on/off sequence for a single LED.
///
/// Each interval is how long the output holds after the toggle that starts it.
/// Starting from an off LED, even indices are ON spans and odd indices are
/// OFF spans. The terminating [`END_OF_SEQUENCE`] sentinel is implicit: any
/// lookup past the stored intervals returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkSequence {
    intervals: Vec<Interval, SEQUENCE_CAPACITY>,
    loop_count: LoopCount,
}

impl BlinkSequence {
    /// Creates a new sequence builder.
    pub fn builder() -> SequenceBuilder {
        SequenceBuilder::new()
    }

    /// Creates a sequence from raw intervals.
    ///
    /// The list ends at the first [`END_OF_SEQUENCE`] value if it contains
    /// one; anything after it is ignored. Use [`SequenceBuilder::push`] to
    /// append intervals one at a time; it never ends a sequence early.
    ///
    /// # Errors
    /// * `CapacityExceeded` - More than [`SEQUENCE_CAPACITY`] intervals before the terminator
    pub fn from_intervals(intervals: &[Interval]) -> Result<Self, SequenceError> {
        let mut builder = SequenceBuilder::new();
        for &interval in intervals {
            if interval == END_OF_SEQUENCE {
                break;
            }
            builder.push(interval)?;
        }
        Ok(builder.build())
    }

    /// Returns the interval at `index`, or the sentinel past the end.
    #[inline]
    pub fn interval_at(&self, index: usize) -> Interval {
        self.intervals
            .get(index)
            .copied()
            .unwrap_or(END_OF_SEQUENCE)
    }

    /// Returns the stored intervals, terminator excluded.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Returns the number of intervals, terminator excluded.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true if the sequence ends immediately.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns the loop count configuration.
    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    /// Returns the sequence with a different loop count.
    pub fn with_loop_count(mut self, count: LoopCount) -> Self {
        self.loop_count = count;
        self
    }

    /// Total time of one pass in milliseconds.
    pub fn total_duration(&self) -> u32 {
        self.intervals.iter().map(|&i| u32::from(i)).sum()
    }
}

/// Builder for blink sequences.
///
/// Intervals are appended in playback order. [`SequenceBuilder::pair`] appends
/// an on/off pair, and [`SequenceBuilder::set_last_off`] rewrites the OFF
/// span of the most recent pair.
#[derive(Debug)]
pub struct SequenceBuilder {
    intervals: Vec<Interval, SEQUENCE_CAPACITY>,
    loop_count: LoopCount,
}

impl SequenceBuilder {
    /// Creates a new empty sequence builder.
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
            loop_count: LoopCount::default(),
        }
    }

    /// Appends a single interval.
    ///
    /// A zero interval is stored as 1 ms so it cannot end the sequence early.
    /// To end a raw list at a zero, build it with [`BlinkSequence::from_intervals`].
    ///
    /// # Errors
    /// * `CapacityExceeded` - The buffer is full
    pub fn push(&mut self, interval: Interval) -> Result<&mut Self, SequenceError> {
        self.intervals
            .push(interval.max(1))
            .map_err(|_| SequenceError::CapacityExceeded)?;
        Ok(self)
    }

    /// Appends an on/off pair.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The pair does not fit
    pub fn pair(&mut self, on: Interval, off: Interval) -> Result<&mut Self, SequenceError> {
        if self.intervals.capacity() - self.intervals.len() < 2 {
            return Err(SequenceError::CapacityExceeded);
        }
        self.push(on)?.push(off)
    }

    /// Overrides the OFF span of the last pair.
    ///
    /// Does nothing on an empty builder.
    pub fn set_last_off(&mut self, off: Interval) -> &mut Self {
        if let Some(last) = self.intervals.last_mut() {
            *last = off.max(1);
        }
        self
    }

    /// Sets how many times the sequence should play.
    pub fn loop_count(&mut self, count: LoopCount) -> &mut Self {
        self.loop_count = count;
        self
    }

    /// Number of intervals appended so far.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Finishes the sequence.
    pub fn build(self) -> BlinkSequence {
        BlinkSequence {
            intervals: self.intervals,
            loop_count: self.loop_count,
        }
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_past_end_returns_sentinel() {
        let sequence = BlinkSequence::from_intervals(&[100, 200]).unwrap();
        assert_eq!(sequence.interval_at(0), 100);
        assert_eq!(sequence.interval_at(1), 200);
        assert_eq!(sequence.interval_at(2), END_OF_SEQUENCE);
        assert_eq!(sequence.interval_at(99), END_OF_SEQUENCE);
    }

    #[test]
    fn raw_intervals_stop_at_terminator() {
        let sequence = BlinkSequence::from_intervals(&[100, 200, 0, 300]).unwrap();
        assert_eq!(sequence.intervals(), &[100, 200]);
    }

    #[test]
    fn raw_intervals_over_capacity_are_rejected() {
        let intervals = [50; SEQUENCE_CAPACITY + 1];
        assert_eq!(
            BlinkSequence::from_intervals(&intervals),
            Err(SequenceError::CapacityExceeded)
        );

        let intervals = [50; SEQUENCE_CAPACITY];
        assert_eq!(
            BlinkSequence::from_intervals(&intervals).unwrap().len(),
            SEQUENCE_CAPACITY
        );
    }

    #[test]
    fn set_last_off_rewrites_only_final_interval() {
        let mut builder = SequenceBuilder::new();
        builder.pair(10, 20).unwrap().pair(30, 40).unwrap();
        builder.set_last_off(99);
        let sequence = builder.build();
        assert_eq!(sequence.intervals(), &[10, 20, 30, 99]);
    }

    #[test]
    fn pushed_zero_is_stored_as_one_millisecond() {
        let mut builder = SequenceBuilder::new();
        builder.push(100).unwrap().push(0).unwrap().push(200).unwrap();
        let sequence = builder.build();

        assert_eq!(sequence.intervals(), &[100, 1, 200]);
        assert_eq!(sequence.interval_at(1), 1);
        assert_eq!(sequence.interval_at(3), END_OF_SEQUENCE);
    }

    #[test]
    fn set_last_off_on_empty_builder_is_noop() {
        let mut builder = SequenceBuilder::new();
        builder.set_last_off(99);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn pair_that_does_not_fit_leaves_builder_unchanged() {
        let mut builder = SequenceBuilder::new();
        for _ in 0..SEQUENCE_CAPACITY - 1 {
            builder.push(10).unwrap();
        }
        assert_eq!(builder.pair(1, 2).err(), Some(SequenceError::CapacityExceeded));
        assert_eq!(builder.len(), SEQUENCE_CAPACITY - 1);
    }

    #[test]
    fn total_duration_sums_one_pass() {
        let sequence = BlinkSequence::from_intervals(&[100, 200, 300])
            .unwrap()
            .with_loop_count(LoopCount::Infinite);
        assert_eq!(sequence.total_duration(), 600);
        assert_eq!(sequence.loop_count(), LoopCount::Infinite);
    }
}
