//! Text summarization
//!
//! Uses an OpenAI-compatible chat endpoint when a key is configured and
//! falls back to the leading sentences otherwise.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Capabilities;
use crate::config::LlmConfig;
use crate::router::strip_keyword;
use crate::{Error, Result};

/// Spoken when there is nothing after the keyword
pub const EMPTY_MESSAGE: &str = "Please tell me what to summarize.";

/// Sentences kept by the extractive fallback
const FALLBACK_SENTENCES: usize = 2;

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("valid regex"));

/// Handle a "summarize" utterance
#[must_use]
pub fn handle_summarization<C: Capabilities + ?Sized>(command: &str, caps: &C) -> String {
    let text = strip_keyword(command, "summarize");
    if text.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    caps.summarize(&text)
}

/// First `max` sentences of `text`, whitespace-normalized
#[must_use]
pub fn extractive_summary(text: &str, max: usize) -> String {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .take(max)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Deserialize)]
struct ChatContent {
    content: Option<String>,
}

/// Summarizer with optional LLM backend
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: reqwest::blocking::Client,
    llm: LlmConfig,
    api_key: Option<String>,
}

impl Summarizer {
    /// Create a summarizer; without a key only the fallback is used
    #[must_use]
    pub const fn new(client: reqwest::blocking::Client, llm: LlmConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            llm,
            api_key,
        }
    }

    /// Summarize `text`, never failing
    #[must_use]
    pub fn summarize(&self, text: &str) -> String {
        if let Some(api_key) = self.api_key.as_deref() {
            match self.complete(api_key, text) {
                Ok(summary) => return summary,
                Err(e) => tracing::warn!(error = %e, "LLM summary failed, using fallback"),
            }
        }
        extractive_summary(text, FALLBACK_SENTENCES)
    }

    fn complete(&self, api_key: &str, text: &str) -> Result<String> {
        let prompt = format!("Summarize: {text}");
        let request = ChatRequest {
            model: &self.llm.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: 100,
            temperature: 0.7,
        };

        let url = format!("{}/chat/completions", self.llm.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(30))
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::Service(format!("chat completion {status}: {body}")));
        }

        let chat: ChatResponse = response.json()?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Service("empty completion".into()))
    }
}
