//! Immutable scripts and their builder.

use std::slice;

use crate::error::{ScriptError, UnderflowError};
use crate::markup::glyph_count;
use crate::operation::Operation;

/// An ordered, immutable list of operations.
///
/// Insertion order is execution order. A script can be built unchecked
/// (e.g. when loaded from a file) and validated separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    operations: Vec<Operation>,
}

impl Script {
    /// Wrap a list of operations without validating it.
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn iter(&self) -> slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Check that no delete removes more glyphs than are visible, or more
    /// than the preceding `TypeText` still shows.
    ///
    /// The visible length is simulated from the operations alone, so this
    /// catches underflow before anything is replayed.
    pub fn validate(&self) -> Result<(), ScriptError> {
        self.simulate().map(|_| ())
    }

    /// Glyph count left visible once every operation has run.
    pub fn final_len(&self) -> Result<usize, ScriptError> {
        self.simulate()
    }

    fn simulate(&self) -> Result<usize, ScriptError> {
        let mut visible = 0usize;
        // Glyphs of the most recent `TypeText` not yet deleted.
        let mut typed = 0usize;
        for (index, op) in self.operations.iter().enumerate() {
            match op {
                Operation::TypeText { text } => {
                    typed = glyph_count(text);
                    visible += typed;
                }
                Operation::DeleteChars { count } => {
                    if *count > visible {
                        return Err(UnderflowError {
                            index,
                            requested: *count,
                            available: visible,
                        }
                        .into());
                    }
                    if *count > typed {
                        return Err(ScriptError::BeyondPrecedingText {
                            index,
                            requested: *count,
                            typed,
                        });
                    }
                    visible -= count;
                    typed -= count;
                }
                Operation::Pause { .. }
                | Operation::SetTypeDelay { .. }
                | Operation::SetDeleteDelay { .. } => {}
            }
        }
        Ok(visible)
    }
}

impl From<Vec<Operation>> for Script {
    fn from(operations: Vec<Operation>) -> Self {
        Self::new(operations)
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a Operation;
    type IntoIter = slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects operations in call order and produces a [`Script`].
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    operations: Vec<Operation>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation.
    pub fn push(&mut self, op: Operation) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Number of operations collected so far.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Finish the script, rejecting deletes that would underflow.
    pub fn build(&self) -> Result<Script, ScriptError> {
        let script = self.build_unchecked();
        script.validate()?;
        Ok(script)
    }

    /// Finish the script without validation.
    pub fn build_unchecked(&self) -> Script {
        Script::new(self.operations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Typewriter;

    #[test]
    fn test_builder_preserves_order() {
        let mut builder = ScriptBuilder::new();
        builder
            .type_text("Hi")
            .pause_for(10)
            .delete_chars(2)
            .type_text("Bye");
        let script = builder.build().unwrap();

        assert_eq!(
            script.operations(),
            &[
                Operation::type_text("Hi"),
                Operation::pause(10),
                Operation::delete_chars(2),
                Operation::type_text("Bye"),
            ]
        );
        assert_eq!(script.final_len(), Ok(3));
    }

    #[test]
    fn test_build_rejects_underflow() {
        let mut builder = ScriptBuilder::new();
        builder.type_text("Hi").delete_chars(2).delete_chars(1);

        assert_eq!(
            builder.build(),
            Err(ScriptError::Underflow(UnderflowError {
                index: 2,
                requested: 1,
                available: 0,
            }))
        );
        // Unchecked builds still succeed.
        assert_eq!(builder.build_unchecked().len(), 3);
    }

    #[test]
    fn test_markup_does_not_count() {
        let script = Script::new(vec![
            Operation::type_text("Hello, <strong>World!</strong>"),
            Operation::delete_chars(13),
        ]);
        assert_eq!(script.final_len(), Ok(0));

        let script = Script::new(vec![
            Operation::type_text("Hello, <strong>World!</strong>"),
            Operation::delete_chars(14),
        ]);
        assert!(script.validate().is_err());
    }

    #[test]
    fn test_delete_stays_within_preceding_text() {
        let mut builder = ScriptBuilder::new();
        builder
            .type_text("Hello")
            .type_text(" there")
            .delete_chars(8);

        assert_eq!(
            builder.start(),
            Err(ScriptError::BeyondPrecedingText {
                index: 2,
                requested: 8,
                typed: 6,
            })
        );
    }

    #[test]
    fn test_split_deletes_share_preceding_text() {
        let script = Script::new(vec![
            Operation::type_text("Hello"),
            Operation::type_text(" there"),
            Operation::delete_chars(2),
            Operation::pause(50),
            Operation::delete_chars(4),
        ]);
        assert_eq!(script.final_len(), Ok(5));

        let script = Script::new(vec![
            Operation::type_text("Hello"),
            Operation::delete_chars(5),
            Operation::delete_chars(1),
        ]);
        // The buffer is empty, so this is plain underflow.
        assert!(matches!(script.validate(), Err(ScriptError::Underflow(_))));
    }

    #[test]
    fn test_empty_script() {
        let script = ScriptBuilder::new().build().unwrap();
        assert!(script.is_empty());
        assert_eq!(script.final_len(), Ok(0));
    }
}
