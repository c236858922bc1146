//! Configuration management for the Marcus shell

pub mod file;

use std::path::PathBuf;
use std::time::Duration;

use file::MarcusConfigFile;

/// Default assistant name used in the spoken tag
pub const DEFAULT_ASSISTANT_NAME: &str = "Marcus AI";

/// Default URL for the "open site" command
pub const DEFAULT_SITE_URL: &str = "https://skyaidevelopment01.wixsite.com/skyai-1";

/// Marcus shell configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Name used in the spoken tag
    pub assistant_name: String,

    /// URL opened by "open site"
    pub site_url: String,

    /// Voice configuration
    pub voice: VoiceConfig,

    /// Weather city
    pub weather_city: String,

    /// News country code
    pub news_country: String,

    /// Stock symbols for "stock market update"
    pub stock_symbols: Vec<String>,

    /// Summarizer LLM configuration
    pub llm: LlmConfig,

    /// API keys
    pub api_keys: ApiKeys,

    /// Business profile record path
    pub profile_path: PathBuf,

    /// Transcript path
    pub transcript_path: PathBuf,
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Use microphone and speakers
    pub enabled: bool,

    /// STT model (e.g. "whisper-1")
    pub stt_model: String,

    /// TTS model (e.g. "tts-1")
    pub tts_model: String,

    /// TTS voice identifier
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f64,

    /// How long to wait for speech to start
    pub listen_timeout: Duration,

    /// Longest phrase accepted
    pub phrase_limit: Duration,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stt_model: "whisper-1".to_string(),
            tts_model: "tts-1".to_string(),
            tts_voice: "alloy".to_string(),
            tts_speed: 1.0,
            listen_timeout: Duration::from_secs(5),
            phrase_limit: Duration::from_secs(10),
        }
    }
}

/// OpenAI-compatible chat endpoint used by the summarizer
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL (e.g. `https://api.openai.com/v1`)
    pub base_url: String,

    /// Model identifier
    pub model: String,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (Whisper and TTS)
    pub openai: Option<String>,

    /// `OpenWeatherMap` API key
    pub openweathermap: Option<String>,

    /// `NewsAPI` key
    pub newsapi: Option<String>,

    /// Summarizer LLM key (falls back to the `OpenAI` key)
    pub llm: Option<String>,
}

/// Default data directory: `~/.local/share/marcus` on Linux
#[must_use]
pub fn data_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map_or_else(|| PathBuf::from("."), |d| d.data_dir().join("marcus"))
}

impl Config {
    /// Load configuration (env > toml > default)
    #[must_use]
    pub fn load() -> Self {
        Self::from_sources(file::load_config_file(), |key| std::env::var(key).ok())
    }

    /// Build configuration from a parsed file and an environment lookup
    #[must_use]
    pub fn from_sources(fc: MarcusConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_keys = ApiKeys {
            openai: env("OPENAI_API_KEY").or(fc.api_keys.openai),
            openweathermap: env("OPENWEATHERMAP_API_KEY").or(fc.api_keys.openweathermap),
            newsapi: env("NEWSAPI_API_KEY").or(fc.api_keys.newsapi),
            llm: env("MARCUS_LLM_API_KEY").or(fc.api_keys.llm),
        };

        // Voice config (env > toml > default)
        let default_voice = VoiceConfig::default();
        let voice = VoiceConfig {
            enabled: fc.voice.enabled.unwrap_or(default_voice.enabled),
            stt_model: env("MARCUS_STT_MODEL")
                .or(fc.voice.stt_model)
                .unwrap_or(default_voice.stt_model),
            tts_model: env("MARCUS_TTS_MODEL")
                .or(fc.voice.tts_model)
                .unwrap_or(default_voice.tts_model),
            tts_voice: fc.voice.tts_voice.unwrap_or(default_voice.tts_voice),
            tts_speed: fc.voice.tts_speed.unwrap_or(default_voice.tts_speed),
            listen_timeout: fc
                .voice
                .listen_timeout_secs
                .map_or(default_voice.listen_timeout, Duration::from_secs),
            phrase_limit: fc
                .voice
                .phrase_limit_secs
                .map_or(default_voice.phrase_limit, Duration::from_secs),
        };

        let stock_symbols = env("MARCUS_STOCK_SYMBOLS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .or(fc.stocks.symbols)
            .unwrap_or_else(|| vec!["^NSEI".to_string(), "^BSESN".to_string()]);

        let llm = LlmConfig {
            base_url: env("MARCUS_LLM_BASE_URL")
                .or(fc.llm.base_url)
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: env("MARCUS_LLM_MODEL")
                .or(fc.llm.model)
                .unwrap_or_else(|| "gpt-4o-mini".to_string()),
        };

        let data_dir = data_dir();
        let profile_path = env("MARCUS_PROFILE_PATH")
            .or(fc.storage.profile_path)
            .map_or_else(|| data_dir.join("business_details.json"), PathBuf::from);
        let transcript_path = env("MARCUS_TRANSCRIPT_PATH")
            .or(fc.storage.transcript_path)
            .map_or_else(|| data_dir.join("spoken_responses.txt"), PathBuf::from);

        Self {
            assistant_name: env("MARCUS_ASSISTANT_NAME")
                .or(fc.assistant_name)
                .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
            site_url: env("MARCUS_SITE_URL")
                .or(fc.site_url)
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            voice,
            weather_city: env("MARCUS_WEATHER_CITY")
                .or(fc.weather.city)
                .unwrap_or_else(|| "Delhi".to_string()),
            news_country: env("MARCUS_NEWS_COUNTRY")
                .or(fc.news.country)
                .unwrap_or_else(|| "in".to_string()),
            stock_symbols,
            llm,
            api_keys,
            profile_path,
            transcript_path,
        }
    }

    /// Key used by the summarizer, if any
    #[must_use]
    pub fn llm_api_key(&self) -> Option<&str> {
        self.api_keys
            .llm
            .as_deref()
            .or(self.api_keys.openai.as_deref())
    }
}
