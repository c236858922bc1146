//! TOML configuration file loading
//!
//! Supports `~/.config/marcus/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level TOML configuration file schema
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MarcusConfigFile {
    /// Name used in the spoken tag ("<name> says: ...")
    #[serde(default)]
    pub assistant_name: Option<String>,

    /// URL opened by the "open site" command
    #[serde(default)]
    pub site_url: Option<String>,

    /// Voice/audio configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherFileConfig,

    /// News provider configuration
    #[serde(default)]
    pub news: NewsFileConfig,

    /// Stock market provider configuration
    #[serde(default)]
    pub stocks: StocksFileConfig,

    /// Summarizer LLM configuration
    #[serde(default)]
    pub llm: LlmFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,

    /// Where the profile and transcript live
    #[serde(default)]
    pub storage: StorageFileConfig,
}

/// Voice processing configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VoiceFileConfig {
    /// Use the microphone/speakers (false = typed console)
    pub enabled: Option<bool>,

    /// STT model (e.g. "whisper-1")
    pub stt_model: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice identifier (e.g. "alloy")
    pub tts_voice: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f64>,

    /// Seconds to wait for speech to start
    pub listen_timeout_secs: Option<u64>,

    /// Maximum phrase length in seconds
    pub phrase_limit_secs: Option<u64>,
}

/// Weather configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WeatherFileConfig {
    /// City for "weather update"
    pub city: Option<String>,
}

/// News configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewsFileConfig {
    /// Two-letter country code for top headlines
    pub country: Option<String>,
}

/// Stock market configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StocksFileConfig {
    /// Ticker symbols reported by "stock market update"
    pub symbols: Option<Vec<String>>,
}

/// Summarizer configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LlmFileConfig {
    /// OpenAI-compatible base URL
    pub base_url: Option<String>,

    /// Model identifier
    pub model: Option<String>,
}

/// API keys configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub openweathermap: Option<String>,
    pub newsapi: Option<String>,
    pub llm: Option<String>,
}

/// Storage paths
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageFileConfig {
    /// Business profile record
    pub profile_path: Option<String>,

    /// Conversation transcript
    pub transcript_path: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `MarcusConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> MarcusConfigFile {
    let Some(path) = config_file_path() else {
        return MarcusConfigFile::default();
    };

    if !path.exists() {
        return MarcusConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to parse config file, using defaults"
            );
            MarcusConfigFile::default()
        }),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            MarcusConfigFile::default()
        }
    }
}

/// Parse config file contents
///
/// # Errors
///
/// Returns error if the TOML is malformed or has wrongly typed fields
pub fn parse_config(content: &str) -> crate::Result<MarcusConfigFile> {
    let config = toml::from_str(content)?;
    Ok(config)
}

/// Return the config file path: `~/.config/marcus/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("marcus").join("config.toml"))
}
