#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`BlinkSequence`**: Timed on/off intervals played on the LED, ended by a zero sentinel
//! - **`SequenceBuilder`**: Appends on/off pairs and rewrites the last pause
//! - **`build_message`**: Renders a numeric code as a sequence (`UnaryDigit`, `FixedBinary4`, `FixedBinary8`)
//! - **`BlinkSequencer`**: Plays sequences on a single LED without blocking
//! - **`OutputPort`**: Trait to implement for your LED hardware (or wrap a pin in `PinLed`)
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`LedAction`**: Commands that can be sent to control a sequencer
//!
//! The sequencer is polled: call `advance()` from your main loop, at least as
//! often as the shortest interval you play.

#[macro_use]
mod fmt;

pub mod time;
pub mod types;
pub mod sequence;
pub mod message;
pub mod led;
pub mod sequencer;
pub mod command;

pub use sequence::{BlinkSequence, SEQUENCE_CAPACITY, SequenceBuilder};
pub use types::{END_OF_SEQUENCE, Encoding, Interval, LoopCount, SequenceError};
pub use time::TimeSource;
pub use message::build_message;
pub use led::{OutputPort, PinLed, Polarity};
pub use sequencer::{BlinkSequencer, POLL_STEP_MS, SequencerState};
pub use command::LedAction;
