//! Top headlines from `NewsAPI`

use serde::Deserialize;

use crate::{Error, Result};

const HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";

/// Number of headlines read out
pub const HEADLINE_COUNT: usize = 5;

/// Spoken when news data is unavailable
pub const FAILURE_MESSAGE: &str = "Could not retrieve news data.";

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
}

/// Headline client for one country
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
    country: String,
}

impl NewsClient {
    /// Create a news client
    #[must_use]
    pub const fn new(client: reqwest::blocking::Client, api_key: Option<String>, country: String) -> Self {
        Self {
            client,
            api_key,
            country,
        }
    }

    /// Read the top headlines
    ///
    /// # Errors
    ///
    /// Returns error if no key is configured or the request fails
    pub fn headlines(&self) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("NEWSAPI_API_KEY not set".into()))?;

        let body = self
            .client
            .get(HEADLINES_URL)
            .query(&[("country", self.country.as_str()), ("apiKey", api_key)])
            .send()?
            .text()?;

        format_headlines(&body)
    }
}

/// Render a `NewsAPI` response body as a sentence
///
/// # Errors
///
/// Returns error if the body is not an `ok` response with titled articles
pub fn format_headlines(body: &str) -> Result<String> {
    let response: HeadlinesResponse = serde_json::from_str(body)?;
    if response.status != "ok" {
        return Err(Error::Service(format!(
            "news lookup failed: {}",
            response.message.unwrap_or_default()
        )));
    }

    let titles: Vec<String> = response
        .articles
        .into_iter()
        .filter_map(|a| a.title)
        .filter(|t| !t.trim().is_empty())
        .take(HEADLINE_COUNT)
        .collect();

    if titles.is_empty() {
        return Err(Error::Service("no headlines".into()));
    }

    Ok(format!(
        "Here are the top news headlines: {}",
        titles.join(", ")
    ))
}
