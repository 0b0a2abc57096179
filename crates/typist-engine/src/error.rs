//! Sequencer errors.

use typist_core::UnderflowError;

/// The sequencer could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no output surface was supplied")]
    MissingSurface,

    #[error("output surface is not attached")]
    DetachedSurface,
}

/// Errors raised while building or running a sequencer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequencerError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Underflow(#[from] UnderflowError),
}
