//! Core types shared by the builder and the sequencer.

/// One timed span in milliseconds.
pub type Interval = u16;

/// Reserved interval value marking the end of a sequence.
///
/// Never toggles the output.
pub const END_OF_SEQUENCE: Interval = 0;

/// How many times a sequence should be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopCount {
    /// Play a specific number of times.
    Finite(u32),

    /// Replay until another sequence is staged or the output is forced.
    Infinite,
}

impl LoopCount {
    /// Returns true if another pass should start after `completed` passes.
    pub fn allows_another(&self, completed: u32) -> bool {
        match self {
            LoopCount::Finite(count) => completed < *count,
            LoopCount::Infinite => true,
        }
    }
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(1)
    }
}

/// How a message code is rendered into blink pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Encoding {
    /// Morse-like: one long pair per group of units, then one short pair per remaining unit.
    UnaryDigit,

    /// Low 4 bits, most significant first, long pair for 1 and short pair for 0.
    FixedBinary4,

    /// All 8 bits as two nibbles, with a separator pause after each nibble.
    FixedBinary8,
}

impl TryFrom<u8> for Encoding {
    type Error = SequenceError;

    fn try_from(kind: u8) -> Result<Self, Self::Error> {
        match kind {
            0 => Ok(Encoding::UnaryDigit),
            1 => Ok(Encoding::FixedBinary4),
            2 => Ok(Encoding::FixedBinary8),
            _ => Err(SequenceError::OutOfRange),
        }
    }
}

impl From<Encoding> for u8 {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::UnaryDigit => 0,
            Encoding::FixedBinary4 => 1,
            Encoding::FixedBinary8 => 2,
        }
    }
}

/// Sequence construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Message code too large for the encoding, or unknown encoding kind.
    OutOfRange,

    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::OutOfRange => {
                write!(f, "message code or encoding kind out of range")
            }
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
