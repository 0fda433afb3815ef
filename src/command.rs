//! Command-based control for sequencers.

use crate::led::OutputPort;
use crate::sequence::BlinkSequence;
use crate::sequencer::BlinkSequencer;
use crate::time::TimeSource;
use crate::types::{Encoding, SequenceError};

/// Actions for controlling a sequencer, e.g. sent over a channel to an LED task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedAction {
    /// Show a message code.
    Message { code: u8, encoding: Encoding },
    /// Play a caller-built sequence.
    Sequence(BlinkSequence),
    /// Hold a steady level.
    Force(bool),
}

impl<L: OutputPort, T: TimeSource> BlinkSequencer<'_, L, T> {
    /// Handles an action by dispatching to the matching method.
    ///
    /// # Errors
    /// * `OutOfRange` - A message code was rejected; the sequencer is unchanged
    pub fn handle_action(&mut self, action: LedAction) -> Result<(), SequenceError> {
        match action {
            LedAction::Message { code, encoding } => self.set_message(code, encoding),
            LedAction::Sequence(sequence) => {
                self.set_raw_sequence(sequence);
                Ok(())
            }
            LedAction::Force(on) => {
                self.force_output(on);
                Ok(())
            }
        }
    }
}
