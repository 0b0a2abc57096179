//! The typewriter capability interface.

use crate::error::ScriptError;
use crate::operation::Operation;
use crate::script::{Script, ScriptBuilder};

/// Chainable calls understood by a typewriter engine.
///
/// Greeting scripts are written against this trait so the same call
/// sequence can drive any conforming engine. Calls are recorded in order
/// and take effect only once [`Typewriter::start`] is called.
pub trait Typewriter {
    /// What `start` hands back.
    type Started;

    fn type_text(&mut self, text: &str) -> &mut Self;

    fn delete_chars(&mut self, count: usize) -> &mut Self;

    fn pause_for(&mut self, ms: u64) -> &mut Self;

    /// Set the per-glyph typing interval.
    fn change_delay(&mut self, ms: u64) -> &mut Self;

    /// Set the per-glyph deleting interval.
    fn change_delete_speed(&mut self, ms: u64) -> &mut Self;

    fn start(&mut self) -> Self::Started;
}

impl Typewriter for ScriptBuilder {
    type Started = Result<Script, ScriptError>;

    fn type_text(&mut self, text: &str) -> &mut Self {
        self.push(Operation::type_text(text))
    }

    fn delete_chars(&mut self, count: usize) -> &mut Self {
        self.push(Operation::delete_chars(count))
    }

    fn pause_for(&mut self, ms: u64) -> &mut Self {
        self.push(Operation::pause(ms))
    }

    fn change_delay(&mut self, ms: u64) -> &mut Self {
        self.push(Operation::set_type_delay(ms))
    }

    fn change_delete_speed(&mut self, ms: u64) -> &mut Self {
        self.push(Operation::set_delete_delay(ms))
    }

    fn start(&mut self) -> Self::Started {
        self.build()
    }
}
