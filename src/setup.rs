//! Interactive first-run setup wizard (`marcus setup`)

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input};

use crate::config::file::{
    ApiKeysFileConfig, LlmFileConfig, MarcusConfigFile, NewsFileConfig, StocksFileConfig,
    VoiceFileConfig, WeatherFileConfig,
};
use crate::config::{DEFAULT_ASSISTANT_NAME, DEFAULT_SITE_URL, VoiceConfig};

/// Run the interactive setup wizard
///
/// Existing values are offered as defaults; blank key answers keep the
/// current key.
///
/// # Errors
///
/// Returns error if user input fails or config cannot be written
pub fn run_setup() -> anyhow::Result<()> {
    println!("Marcus Setup\n");

    let existing = crate::config::file::load_config_file();
    let config_path = crate::config::file::config_file_path()
        .unwrap_or_else(|| PathBuf::from("~/.config/marcus/config.toml"));

    if config_path.exists() {
        println!("Existing config found at {}\n", config_path.display());
    }

    // 1. Identity
    let assistant_name: String = Input::new()
        .with_prompt("Assistant name")
        .default(
            existing
                .assistant_name
                .clone()
                .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
        )
        .interact_text()?;

    let site_url: String = Input::new()
        .with_prompt("Site opened by \"open site\"")
        .default(
            existing
                .site_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
        )
        .interact_text()?;

    // 2. Voice
    let defaults = VoiceConfig::default();
    let enable_voice = Confirm::new()
        .with_prompt("Use microphone and speakers (otherwise type commands)?")
        .default(existing.voice.enabled.unwrap_or(defaults.enabled))
        .interact()?;

    let mut api_keys = ApiKeysFileConfig {
        openai: ask_key("OpenAI", "OPENAI_API_KEY", existing.api_keys.openai.as_deref())?,
        ..existing.api_keys.clone()
    };

    if enable_voice && api_keys.openai.is_none() {
        println!("Voice mode needs an OpenAI key for Whisper and TTS; run with --text until one is set.");
    }

    let voice = VoiceFileConfig {
        enabled: Some(enable_voice),
        ..existing.voice.clone()
    };

    // 3. Briefings
    let city: String = Input::new()
        .with_prompt("Weather city")
        .default(existing.weather.city.clone().unwrap_or_else(|| "Delhi".to_string()))
        .interact_text()?;
    api_keys.openweathermap = ask_key(
        "OpenWeatherMap",
        "OPENWEATHERMAP_API_KEY",
        existing.api_keys.openweathermap.as_deref(),
    )?;

    let country: String = Input::new()
        .with_prompt("News country code")
        .default(existing.news.country.clone().unwrap_or_else(|| "in".to_string()))
        .interact_text()?;
    api_keys.newsapi = ask_key("NewsAPI", "NEWSAPI_API_KEY", existing.api_keys.newsapi.as_deref())?;

    let symbols: String = Input::new()
        .with_prompt("Stock symbols (comma separated)")
        .default(
            existing
                .stocks
                .symbols
                .clone()
                .map_or_else(|| "^NSEI,^BSESN".to_string(), |s| s.join(",")),
        )
        .interact_text()?;

    // 4. Build and write config
    let config_file = MarcusConfigFile {
        assistant_name: Some(assistant_name),
        site_url: Some(site_url),
        voice,
        weather: WeatherFileConfig { city: Some(city) },
        news: NewsFileConfig {
            country: Some(country),
        },
        stocks: StocksFileConfig {
            symbols: Some(split_symbols(&symbols)),
        },
        llm: LlmFileConfig {
            base_url: existing.llm.base_url,
            model: existing.llm.model,
        },
        api_keys,
        storage: existing.storage,
    };

    write_config(&config_path, &config_file)?;
    println!("\nConfig written to {}", config_path.display());
    println!("\nSetup complete! Run `marcus` (or `marcus --text`) to start.");

    Ok(())
}

/// Ask for an API key, keeping the current one on a blank answer
fn ask_key(service: &str, env_hint: &str, current: Option<&str>) -> anyhow::Result<Option<String>> {
    let prompt = current.map_or_else(
        || format!("{service} API key ({env_hint}, leave blank to skip)"),
        |k| format!("{service} API key (current: {}, leave blank to keep)", mask_key(k)),
    );

    let input: String = Input::new()
        .with_prompt(&prompt)
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    Ok(if input.is_empty() {
        current.map(str::to_string)
    } else {
        Some(input.to_string())
    })
}

/// Show only the ends of a secret
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

fn split_symbols(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Serialize and write the config file
fn write_config(path: &Path, config: &MarcusConfigFile) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::parse_config;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdefghijkl"), "sk-a...ijkl");
        assert_eq!(mask_key("short"), "****");
    }

    #[test]
    fn test_split_symbols() {
        assert_eq!(split_symbols(" ^NSEI, ,AAPL "), vec!["^NSEI", "AAPL"]);
    }

    #[test]
    fn test_written_config_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = MarcusConfigFile {
            assistant_name: Some("Jarvis".into()),
            weather: WeatherFileConfig {
                city: Some("Pune".into()),
            },
            ..MarcusConfigFile::default()
        };
        write_config(&path, &config).unwrap();

        let parsed = parse_config(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.assistant_name.as_deref(), Some("Jarvis"));
        assert_eq!(parsed.weather.city.as_deref(), Some("Pune"));
        assert!(parsed.api_keys.openai.is_none());
    }
}
