//! Core types for the typist greeting animator.
//!
//! A greeting is described as a [`Script`]: an ordered, immutable list of
//! [`Operation`]s. Scripts are authored through the [`Typewriter`]
//! capability interface (implemented by [`ScriptBuilder`]) or loaded from
//! data files, and replayed by the sequencer in `typist-engine`.

mod error;
mod markup;
mod operation;
mod script;
mod theme;
mod typewriter;

pub use error::{ScriptError, UnderflowError};
pub use markup::{Emphasis, Glyph, glyph_count, parse_markup};
pub use operation::Operation;
pub use script::{Script, ScriptBuilder};
pub use theme::ColorTheme;
pub use typewriter::Typewriter;
