//! Capability providers
//!
//! Each `handle_*` function takes the raw utterance and returns the sentence
//! to speak. Providers never fail the shell: service errors become a fixed
//! apology sentence. Anything that reaches the network or the OS goes through
//! [`Capabilities`] so the shell can run against a fake.

pub mod clock;
pub mod joke;
pub mod launcher;
pub mod math;
pub mod news;
pub mod stocks;
pub mod summarize;
pub mod translate;
pub mod weather;

use std::time::Duration;

pub use clock::TimeQuery;
pub use launcher::Launcher;
pub use math::handle_math;
pub use news::NewsClient;
pub use stocks::StockClient;
pub use summarize::{Summarizer, handle_summarization};
pub use translate::{GoogleTranslator, handle_translation};
pub use weather::WeatherClient;

use crate::config::Config;
use crate::router::strip_keyword;
use crate::Result;

/// Spoken when nothing in the active table matches
pub const FALLBACK_MESSAGE: &str = "I'm not sure how to respond to that. Please try a different command.";

/// External services and OS actions used by the command handlers
pub trait Capabilities {
    /// Translate `text` into `language` (spoken name or code)
    ///
    /// # Errors
    ///
    /// Returns error if the language is unknown or the service fails
    fn translate(&self, text: &str, language: &str) -> Result<String>;

    /// Current weather sentence
    ///
    /// # Errors
    ///
    /// Returns error if weather data is unavailable
    fn weather(&self) -> Result<String>;

    /// Top headlines sentence
    ///
    /// # Errors
    ///
    /// Returns error if news data is unavailable
    fn news(&self) -> Result<String>;

    /// Market update sentence
    ///
    /// # Errors
    ///
    /// Returns error if quotes are unavailable
    fn stocks(&self) -> Result<String>;

    /// Summary of `text` (falls back internally, never fails)
    fn summarize(&self, text: &str) -> String;

    /// Open a URL in the default browser
    ///
    /// # Errors
    ///
    /// Returns error if nothing could be launched
    fn open_url(&self, url: &str) -> Result<()>;

    /// Start Chrome
    ///
    /// # Errors
    ///
    /// Returns error if Chrome could not be launched
    fn open_chrome(&self) -> Result<()>;
}

/// Real network and OS capabilities
#[derive(Debug, Clone)]
pub struct LiveCapabilities {
    translator: GoogleTranslator,
    weather: WeatherClient,
    news: NewsClient,
    stocks: StockClient,
    summarizer: Summarizer,
    launcher: Launcher,
}

impl LiveCapabilities {
    /// Build all providers from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("marcus/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            translator: GoogleTranslator::new(client.clone()),
            weather: WeatherClient::new(
                client.clone(),
                config.api_keys.openweathermap.clone(),
                config.weather_city.clone(),
            ),
            news: NewsClient::new(
                client.clone(),
                config.api_keys.newsapi.clone(),
                config.news_country.clone(),
            ),
            stocks: StockClient::new(client.clone(), config.stock_symbols.clone()),
            summarizer: Summarizer::new(
                client,
                config.llm.clone(),
                config.llm_api_key().map(str::to_string),
            ),
            launcher: Launcher,
        })
    }
}

impl Capabilities for LiveCapabilities {
    fn translate(&self, text: &str, language: &str) -> Result<String> {
        self.translator.translate(text, language)
    }

    fn weather(&self) -> Result<String> {
        self.weather.current()
    }

    fn news(&self) -> Result<String> {
        self.news.headlines()
    }

    fn stocks(&self) -> Result<String> {
        self.stocks.update()
    }

    fn summarize(&self, text: &str) -> String {
        self.summarizer.summarize(text)
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.launcher.open_url(url)
    }

    fn open_chrome(&self) -> Result<()> {
        self.launcher.open_chrome()
    }
}

/// Current weather, or the failure sentence
#[must_use]
pub fn handle_weather<C: Capabilities + ?Sized>(caps: &C) -> String {
    caps.weather().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "weather lookup failed");
        weather::FAILURE_MESSAGE.to_string()
    })
}

/// Top headlines, or the failure sentence
#[must_use]
pub fn handle_news<C: Capabilities + ?Sized>(caps: &C) -> String {
    caps.news().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "news lookup failed");
        news::FAILURE_MESSAGE.to_string()
    })
}

/// Market update, or the failure sentence
#[must_use]
pub fn handle_stock_update<C: Capabilities + ?Sized>(caps: &C) -> String {
    caps.stocks().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stock lookup failed");
        stocks::FAILURE_MESSAGE.to_string()
    })
}

/// Placeholder dream analysis echoing the description back
#[must_use]
pub fn handle_dream_analysis(command: &str) -> String {
    let dream = strip_keyword(command, "analyze my dream");
    format!("Analyzing your dream: {dream}. Insights coming soon!")
}

/// Open a URL and return the sentence to speak
#[must_use]
pub fn handle_open<C: Capabilities + ?Sized>(caps: &C, url: &str, success: String) -> String {
    match caps.open_url(url) {
        Ok(()) => success,
        Err(e) => {
            tracing::warn!(error = %e, url, "open failed");
            launcher::FAILURE_MESSAGE.to_string()
        }
    }
}
