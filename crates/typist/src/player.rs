//! Runs a sequencer on a background thread.

use std::thread::{self, JoinHandle};

use color_eyre::eyre::eyre;
use tracing::debug;
use typist_engine::{
    CancelToken, OutputSurface, RunOutcome, Sequencer, SequencerError, SystemClock,
};

type Outcome = Result<RunOutcome, SequencerError>;

/// Owns the playback thread and its cancel token.
#[derive(Debug)]
pub struct Player {
    cancel: CancelToken,
    handle: Option<JoinHandle<Outcome>>,
}

impl Player {
    /// Start playing `sequencer` against the wall clock.
    pub fn spawn<S>(mut sequencer: Sequencer<S>) -> Self
    where
        S: OutputSurface + Send + 'static,
    {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let handle = thread::spawn(move || {
            let mut clock = SystemClock::new();
            sequencer.run(&mut clock, &token)
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Whether the playback thread has exited.
    #[allow(dead_code)]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Cancel playback and wait for the thread to exit.
    pub fn stop(mut self) -> color_eyre::Result<RunOutcome> {
        self.cancel.cancel();
        let Some(handle) = self.handle.take() else {
            return Ok(RunOutcome::Cancelled);
        };
        let outcome = handle
            .join()
            .map_err(|_| eyre!("sequencer thread panicked"))??;
        debug!(?outcome, "player stopped");
        Ok(outcome)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use typist_core::{Operation, Script};
    use typist_engine::{RecordingSurface, Status};

    use crate::surface::SharedSurface;

    #[test]
    fn test_player_runs_to_completion() {
        let surface = SharedSurface::new();
        let sequencer = Sequencer::builder(Script::new(vec![Operation::type_text("ok")]))
            .surface(surface.clone())
            .type_delay(Duration::from_millis(1))
            .build()
            .unwrap();
        let player = Player::spawn(sequencer);

        while !player.is_finished() {
            thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(player.stop().unwrap(), RunOutcome::Completed);
        let snapshot = surface.try_snapshot().unwrap();
        assert_eq!(snapshot.glyphs.len(), 2);
        assert_eq!(snapshot.status, Some(Status::Completed));
    }

    #[test]
    fn test_stop_cancels_a_long_pause() {
        let sequencer = Sequencer::new(
            Script::new(vec![Operation::pause(60_000), Operation::type_text("late")]),
            RecordingSurface::new(),
        )
        .unwrap();
        let player = Player::spawn(sequencer);

        assert_eq!(player.stop().unwrap(), RunOutcome::Cancelled);
    }
}
