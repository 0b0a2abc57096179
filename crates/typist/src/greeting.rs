//! The built-in multilingual greeting.

use typist_core::{Script, ScriptBuilder, ScriptError, Typewriter};

/// Issue the greeting call sequence against any typewriter engine.
///
/// Every delete removes exactly the text typed just before it, so the
/// sequence ends showing the opening line again.
pub fn greet<T: Typewriter>(tw: &mut T) -> T::Started {
    tw.pause_for(1000)
        .type_text("Hello, <strong>World!</strong>")
        .pause_for(5000)
        .delete_chars(13)
        .type_text("¡Hola, <strong>Mundo!</strong>")
        .pause_for(3000)
        .change_delete_speed(40)
        .delete_chars(13)
        .type_text("Bonjour <strong>le monde!</strong>")
        .pause_for(1000)
        .change_delete_speed(25)
        .delete_chars(17)
        .change_delay(45)
        .type_text("Olá, <strong>mundo!</strong>")
        .pause_for(500)
        .change_delete_speed(20)
        .delete_chars(11)
        .change_delay(20)
        .type_text("Здравствуй, <strong>мир</strong>")
        .pause_for(250)
        .change_delete_speed(15)
        .delete_chars(15)
        .type_text("Hallo Welt")
        .pause_for(100)
        .change_delete_speed(5)
        .delete_chars(10)
        .change_delay(5)
        .type_text("สวัสดีชาวโลก")
        .pause_for(50)
        .change_delete_speed(1)
        .delete_chars(12)
        .type_text("世界您好！")
        .pause_for(2000)
        .delete_chars(5)
        .change_delay(75)
        .type_text("Hello, <strong>World!</strong>")
        .start()
}

/// The greeting as a validated script.
pub fn greeting_script() -> Result<Script, ScriptError> {
    greet(&mut ScriptBuilder::new())
}
