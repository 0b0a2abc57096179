//! Greeting sequencer for the typist animator.
//!
//! The [`Sequencer`] replays a [`Script`](typist_core::Script) once against
//! an [`OutputSurface`], revealing and removing glyphs one at a time. Time
//! is read through a [`Clock`] so the same state machine runs against the
//! wall clock in the terminal and against a [`ManualClock`] in tests.
//! Every wait is a suspension point where a [`CancelToken`] is honored.

mod cancel;
mod clock;
mod error;
mod pacing;
mod sequencer;
mod surface;

pub use cancel::CancelToken;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigurationError, SequencerError};
pub use pacing::Pacing;
pub use sequencer::{
    DEFAULT_DELETE_DELAY, DEFAULT_TYPE_DELAY, RunOutcome, Sequencer, SequencerBuilder, Status,
    StepOutcome, UnderflowPolicy,
};
pub use surface::{OutputSurface, RecordingSurface, SurfaceEvent};
