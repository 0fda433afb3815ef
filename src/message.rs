//! Rendering of numeric message codes into blink sequences.
//!
//! Every message starts with [`LEAD_IN`], a burst of fast flashes that marks
//! the start of a message, followed by one long or short pair per encoded
//! digit. The OFF span after the last pair is stretched to
//! [`MESSAGE_END_OFF_MS`] so consecutive repetitions stay readable.
//!
//! Pause lengths are strictly ordered:
//! `SHORT_BLINK_OFF_MS < LONG_BLINK_OFF_MS < NIBBLE_OFF_MS < MESSAGE_END_OFF_MS`.

use crate::sequence::{BlinkSequence, SequenceBuilder};
use crate::types::{Encoding, Interval, SequenceError};

/// ON time of a short blink.
pub const SHORT_BLINK_ON_MS: Interval = 150;
/// OFF time after a short blink.
pub const SHORT_BLINK_OFF_MS: Interval = 300;
/// ON time of a long blink.
pub const LONG_BLINK_ON_MS: Interval = 600;
/// OFF time after a long blink.
pub const LONG_BLINK_OFF_MS: Interval = 450;
/// OFF time closing each 4-bit group of a byte message.
pub const NIBBLE_OFF_MS: Interval = 1200;
/// OFF time closing a message.
pub const MESSAGE_END_OFF_MS: Interval = 2500;

/// Fast flashes played before the encoded digits.
pub const LEAD_IN: [Interval; 6] = [40, 60, 40, 60, 40, 800];

/// Number of short blinks one long blink stands for in [`Encoding::UnaryDigit`].
pub const UNARY_UNIT: u8 = 5;
/// Largest code accepted by [`Encoding::UnaryDigit`].
pub const UNARY_MAX: u8 = 15;

/// Builds the blink sequence for `code` in the given encoding.
///
/// [`Encoding::FixedBinary4`] only looks at the low 4 bits of `code`.
///
/// # Errors
/// * `OutOfRange` - `code` is above [`UNARY_MAX`] for [`Encoding::UnaryDigit`]
pub fn build_message(code: u8, encoding: Encoding) -> Result<BlinkSequence, SequenceError> {
    let mut builder = SequenceBuilder::new();
    for interval in LEAD_IN {
        builder.push(interval)?;
    }

    match encoding {
        Encoding::UnaryDigit => {
            if code > UNARY_MAX {
                warn!("unary code {} above maximum {}", code, UNARY_MAX);
                return Err(SequenceError::OutOfRange);
            }
            for _ in 0..code / UNARY_UNIT {
                builder.pair(LONG_BLINK_ON_MS, LONG_BLINK_OFF_MS)?;
            }
            for _ in 0..code % UNARY_UNIT {
                builder.pair(SHORT_BLINK_ON_MS, SHORT_BLINK_OFF_MS)?;
            }
        }
        Encoding::FixedBinary4 => {
            push_bits(&mut builder, code, 0x08)?;
        }
        Encoding::FixedBinary8 => {
            push_bits(&mut builder, code, 0x80)?;
            builder.set_last_off(NIBBLE_OFF_MS);
            push_bits(&mut builder, code, 0x08)?;
            builder.set_last_off(NIBBLE_OFF_MS);
        }
    }

    builder.set_last_off(MESSAGE_END_OFF_MS);
    trace!("built code {} as {} intervals", code, builder.len());
    Ok(builder.build())
}

/// Appends four bit pairs, starting at `mask` and moving toward bit 0.
fn push_bits(builder: &mut SequenceBuilder, code: u8, mut mask: u8) -> Result<(), SequenceError> {
    for _ in 0..4 {
        if code & mask != 0 {
            builder.pair(LONG_BLINK_ON_MS, LONG_BLINK_OFF_MS)?;
        } else {
            builder.pair(SHORT_BLINK_ON_MS, SHORT_BLINK_OFF_MS)?;
        }
        mask >>= 1;
    }
    Ok(())
}
