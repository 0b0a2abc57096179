//! Script authoring and replay errors.

/// A delete asked for more glyphs than the visible buffer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "operation #{index} deletes {requested} characters but only {available} are visible"
)]
pub struct UnderflowError {
    /// Position of the offending operation in its script.
    pub index: usize,
    /// Characters the operation asked to remove.
    pub requested: usize,
    /// Characters present when the operation ran.
    pub available: usize,
}

/// Errors detected while authoring a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Underflow(#[from] UnderflowError),

    /// A delete reaches past the text typed by the preceding `TypeText`.
    #[error(
        "operation #{index} deletes {requested} characters but the preceding text has only {typed} left"
    )]
    BeyondPrecedingText {
        index: usize,
        requested: usize,
        typed: usize,
    },
}
