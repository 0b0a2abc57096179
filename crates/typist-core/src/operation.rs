//! Script operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::markup::glyph_count;

/// A single timed text operation.
///
/// The serialized form is internally tagged by `op`, so a script file reads
/// like `{ op = "type", text = "Hello" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Operation {
    /// Append text one glyph at a time. May contain inline emphasis markup.
    #[serde(rename = "type")]
    TypeText { text: String },
    /// Remove glyphs from the end of the visible buffer.
    #[serde(rename = "delete")]
    DeleteChars { count: usize },
    /// Hold the buffer unchanged for `ms` milliseconds.
    #[serde(rename = "pause")]
    Pause { ms: u64 },
    /// Change the per-glyph typing interval for later `TypeText`s.
    #[serde(rename = "type_delay")]
    SetTypeDelay { ms: u64 },
    /// Change the per-glyph deleting interval for later `DeleteChars`.
    #[serde(rename = "delete_delay")]
    SetDeleteDelay { ms: u64 },
}

impl Operation {
    pub fn type_text(text: impl Into<String>) -> Self {
        Self::TypeText { text: text.into() }
    }

    pub fn delete_chars(count: usize) -> Self {
        Self::DeleteChars { count }
    }

    pub fn pause(ms: u64) -> Self {
        Self::Pause { ms }
    }

    pub fn set_type_delay(ms: u64) -> Self {
        Self::SetTypeDelay { ms }
    }

    pub fn set_delete_delay(ms: u64) -> Self {
        Self::SetDeleteDelay { ms }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypeText { .. } => "type",
            Self::DeleteChars { .. } => "delete",
            Self::Pause { .. } => "pause",
            Self::SetTypeDelay { .. } => "type_delay",
            Self::SetDeleteDelay { .. } => "delete_delay",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeText { text } => {
                write!(f, "type {:?} ({} chars)", text, glyph_count(text))
            }
            Self::DeleteChars { count } => write!(f, "delete {count}"),
            Self::Pause { ms } => write!(f, "pause {ms}ms"),
            Self::SetTypeDelay { ms } => write!(f, "type delay {ms}ms"),
            Self::SetDeleteDelay { ms } => write!(f, "delete delay {ms}ms"),
        }
    }
}
