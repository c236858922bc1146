//! Error types for the Marcus shell

use thiserror::Error;

/// Result type alias for Marcus operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Marcus shell
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// No speech started in time, or the phrase ran past the limit
    #[error("recognition timed out: {0}")]
    RecognitionTimeout(String),

    /// The input source has no more utterances (console EOF)
    #[error("input closed")]
    InputClosed,

    /// Upstream service failure (translation, weather, news, stocks, LLM)
    #[error("service error: {0}")]
    Service(String),

    /// Malformed math expression
    #[error("{0}")]
    Parse(String),

    /// Business profile error
    #[error("profile error: {0}")]
    Profile(String),

    /// Could not open a URL or launch an application
    #[error("launch error: {0}")]
    Launch(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Interactive prompt error
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Whether a listen failure should be treated as "no command this cycle"
    #[must_use]
    pub const fn is_recoverable_listen(&self) -> bool {
        matches!(
            self,
            Self::RecognitionTimeout(_) | Self::Stt(_) | Self::Http(_) | Self::Audio(_)
        )
    }
}
