//! The greeting sequencer state machine.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use typist_core::{Glyph, Operation, Script, UnderflowError, parse_markup};

use crate::cancel::CancelToken;
use crate::clock::Clock;
use crate::error::{ConfigurationError, SequencerError};
use crate::pacing::Pacing;
use crate::surface::OutputSurface;

/// Typing interval used until a script changes it.
pub const DEFAULT_TYPE_DELAY: Duration = Duration::from_millis(75);

/// Deleting interval used until a script changes it.
pub const DEFAULT_DELETE_DELAY: Duration = Duration::from_millis(50);

/// Lifecycle of a sequencer.
///
/// `Idle -> Running -> Completed`, with `Cancelled` and `Failed` as the
/// other terminal states. Terminal states never reopen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled | Status::Failed)
    }
}

/// What to do when a delete asks for more glyphs than are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderflowPolicy {
    /// Stop with an [`UnderflowError`] before removing anything.
    Fail,
    /// Remove what is there and keep going.
    Clamp,
}

impl Default for UnderflowPolicy {
    /// Fail in debug builds, clamp in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            UnderflowPolicy::Fail
        } else {
            UnderflowPolicy::Clamp
        }
    }
}

/// Result of a single [`Sequencer::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The operation at this index ran to completion.
    Executed(usize),
    /// Nothing ran; the sequencer is in this terminal state.
    Done(Status),
}

/// How a [`Sequencer::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
    /// An earlier run stopped on underflow; the error was returned then.
    Failed,
}

/// Configures and constructs a [`Sequencer`].
#[derive(Debug)]
pub struct SequencerBuilder<S> {
    script: Script,
    surface: Option<S>,
    type_delay: Duration,
    delete_delay: Duration,
    underflow: UnderflowPolicy,
    pacing: Pacing,
    seed: Option<u64>,
}

impl<S: OutputSurface> SequencerBuilder<S> {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            surface: None,
            type_delay: DEFAULT_TYPE_DELAY,
            delete_delay: DEFAULT_DELETE_DELAY,
            underflow: UnderflowPolicy::default(),
            pacing: Pacing::default(),
            seed: None,
        }
    }

    /// Surface the sequencer will own. Required.
    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Initial typing interval.
    pub fn type_delay(mut self, delay: Duration) -> Self {
        self.type_delay = delay;
        self
    }

    /// Initial deleting interval.
    pub fn delete_delay(mut self, delay: Duration) -> Self {
        self.delete_delay = delay;
        self
    }

    pub fn underflow_policy(mut self, policy: UnderflowPolicy) -> Self {
        self.underflow = policy;
        self
    }

    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Seed for natural pacing. Defaults to the current time.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the sequencer in the `Idle` state.
    pub fn build(self) -> Result<Sequencer<S>, SequencerError> {
        let surface = self.surface.ok_or(ConfigurationError::MissingSurface)?;
        if !surface.is_attached() {
            return Err(ConfigurationError::DetachedSurface.into());
        }

        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

        Ok(Sequencer {
            script: self.script,
            surface,
            status: Status::Idle,
            cursor: 0,
            executed: 0,
            buffer: Vec::new(),
            type_delay: self.type_delay,
            delete_delay: self.delete_delay,
            underflow: self.underflow,
            pacing: self.pacing,
            seed,
            glyph_steps: 0,
        })
    }
}

/// Replays a script once against an output surface.
///
/// Operations run strictly in order and never interleave. The sequencer
/// owns the visible buffer; the surface only hears about mutations.
#[derive(Debug)]
pub struct Sequencer<S> {
    script: Script,
    surface: S,
    status: Status,
    /// Index of the next operation to run.
    cursor: usize,
    /// Operations that ran to completion.
    executed: usize,
    buffer: Vec<Glyph>,
    type_delay: Duration,
    delete_delay: Duration,
    underflow: UnderflowPolicy,
    pacing: Pacing,
    seed: u64,
    /// Paced waits so far, feeds natural pacing.
    glyph_steps: u64,
}

impl<S: OutputSurface> Sequencer<S> {
    /// Sequencer with default delays and policy.
    pub fn new(script: Script, surface: S) -> Result<Self, SequencerError> {
        SequencerBuilder::new(script).surface(surface).build()
    }

    pub fn builder(script: Script) -> SequencerBuilder<S> {
        SequencerBuilder::new(script)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Index of the next operation to run.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of operations that ran to completion.
    pub fn executed(&self) -> usize {
        self.executed
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// The visible buffer.
    pub fn buffer(&self) -> &[Glyph] {
        &self.buffer
    }

    /// The visible buffer without emphasis.
    pub fn visible_text(&self) -> String {
        self.buffer.iter().map(|g| g.ch).collect()
    }

    pub fn type_delay(&self) -> Duration {
        self.type_delay
    }

    pub fn delete_delay(&self) -> Duration {
        self.delete_delay
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Move from `Idle` to `Running`.
    ///
    /// Returns `false` and changes nothing if the sequencer was already
    /// started, including after it finished.
    pub fn start(&mut self) -> bool {
        if self.status != Status::Idle {
            debug!(status = ?self.status, "start ignored");
            return false;
        }
        self.status = Status::Running;
        info!(operations = self.script.len(), "sequencer started");
        true
    }

    /// Run exactly one operation, starting the sequencer if needed.
    pub fn step<C: Clock + ?Sized>(
        &mut self,
        clock: &mut C,
        cancel: &CancelToken,
    ) -> Result<StepOutcome, SequencerError> {
        match self.status {
            Status::Idle => {
                self.start();
            }
            Status::Running => {}
            status => return Ok(StepOutcome::Done(status)),
        }

        if cancel.is_cancelled() {
            self.finish(Status::Cancelled);
            return Ok(StepOutcome::Done(Status::Cancelled));
        }

        let index = self.cursor;
        let Some(op) = self.script.get(index).cloned() else {
            self.finish(Status::Completed);
            return Ok(StepOutcome::Done(Status::Completed));
        };

        debug!(index, kind = op.kind(), detail = %op, "running operation");
        let finished = match op {
            Operation::TypeText { text } => self.type_text(&text, clock, cancel),
            Operation::DeleteChars { count } => self.delete_chars(index, count, clock, cancel)?,
            Operation::Pause { ms } => self.wait(clock, cancel, Duration::from_millis(ms)),
            Operation::SetTypeDelay { ms } => {
                self.type_delay = Duration::from_millis(ms);
                true
            }
            Operation::SetDeleteDelay { ms } => {
                self.delete_delay = Duration::from_millis(ms);
                true
            }
        };

        if !finished {
            self.finish(Status::Cancelled);
            return Ok(StepOutcome::Done(Status::Cancelled));
        }

        self.cursor += 1;
        self.executed += 1;
        if self.cursor == self.script.len() {
            self.finish(Status::Completed);
        }
        Ok(StepOutcome::Executed(index))
    }

    /// Start if needed and step until a terminal state.
    pub fn run<C: Clock + ?Sized>(
        &mut self,
        clock: &mut C,
        cancel: &CancelToken,
    ) -> Result<RunOutcome, SequencerError> {
        loop {
            match self.step(clock, cancel)? {
                StepOutcome::Executed(_) => {}
                StepOutcome::Done(Status::Cancelled) => return Ok(RunOutcome::Cancelled),
                StepOutcome::Done(Status::Failed) => return Ok(RunOutcome::Failed),
                StepOutcome::Done(_) => return Ok(RunOutcome::Completed),
            }
        }
    }

    fn type_text<C: Clock + ?Sized>(
        &mut self,
        text: &str,
        clock: &mut C,
        cancel: &CancelToken,
    ) -> bool {
        for glyph in parse_markup(text) {
            if !self.paced_wait(clock, cancel, self.type_delay) {
                return false;
            }
            self.buffer.push(glyph);
            self.surface.insert(glyph);
        }
        true
    }

    fn delete_chars<C: Clock + ?Sized>(
        &mut self,
        index: usize,
        count: usize,
        clock: &mut C,
        cancel: &CancelToken,
    ) -> Result<bool, SequencerError> {
        let available = self.buffer.len();
        let count = if count > available {
            let err = UnderflowError {
                index,
                requested: count,
                available,
            };
            match self.underflow {
                UnderflowPolicy::Fail => {
                    self.finish(Status::Failed);
                    return Err(err.into());
                }
                UnderflowPolicy::Clamp => {
                    warn!(%err, "clamping delete to visible text");
                    available
                }
            }
        } else {
            count
        };

        for _ in 0..count {
            if !self.paced_wait(clock, cancel, self.delete_delay) {
                return Ok(false);
            }
            if let Some(glyph) = self.buffer.pop() {
                self.surface.remove(glyph);
            }
        }
        Ok(true)
    }

    fn paced_wait<C: Clock + ?Sized>(
        &mut self,
        clock: &mut C,
        cancel: &CancelToken,
        base: Duration,
    ) -> bool {
        let interval = self.pacing.interval(base, self.seed, self.glyph_steps);
        self.glyph_steps += 1;
        self.wait(clock, cancel, interval)
    }

    /// Suspension point. Returns `false` if cancelled.
    fn wait<C: Clock + ?Sized>(
        &mut self,
        clock: &mut C,
        cancel: &CancelToken,
        duration: Duration,
    ) -> bool {
        if duration.is_zero() {
            return !cancel.is_cancelled();
        }
        clock.sleep(duration, cancel)
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        match status {
            Status::Completed => info!(executed = self.executed, "sequencer completed"),
            Status::Cancelled => info!(cursor = self.cursor, "sequencer cancelled"),
            Status::Failed => warn!(cursor = self.cursor, "sequencer failed"),
            Status::Idle | Status::Running => {}
        }
        self.surface.finish(status);
    }
}
