//! Speech/output gateway
//!
//! The shell talks to the user only through [`Gateway`]: one blocking call to
//! hear an utterance, one blocking call to say a response.

mod console;
mod voice;

pub use console::{ConsoleGateway, ConsolePrompter};
pub use voice::{VoiceGateway, capture_phrase};

use crate::Result;

/// Source of utterances and sink for responses
pub trait Gateway {
    /// Capture one utterance
    ///
    /// Returns `Ok(None)` when nothing usable was heard this cycle.
    ///
    /// # Errors
    ///
    /// `RecognitionTimeout` and STT errors are recoverable ("no command");
    /// `InputClosed` ends the session
    fn listen(&mut self) -> Result<Option<String>>;

    /// Render a response (already carrying the assistant tag)
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    fn speak(&mut self, text: &str) -> Result<()>;
}

impl<G: Gateway + ?Sized> Gateway for Box<G> {
    fn listen(&mut self) -> Result<Option<String>> {
        (**self).listen()
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        (**self).speak(text)
    }
}

/// Normalize raw recognizer or keyboard text into an utterance
///
/// Lower-cases, trims, and drops trailing sentence punctuation that
/// transcription services add. Blank input yields `None`.
#[must_use]
pub fn normalize_utterance(raw: &str) -> Option<String> {
    let text = raw
        .trim()
        .trim_end_matches(['.', '!', '?'])
        .trim()
        .to_lowercase();

    if text.is_empty() { None } else { Some(text) }
}
