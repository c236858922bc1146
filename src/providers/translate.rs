//! Translation: "translate <text> into <language>"

use serde_json::Value;

use super::Capabilities;
use crate::router::strip_keyword;
use crate::{Error, Result};

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Spoken when the request does not split into text and language
pub const SPECIFY_MESSAGE: &str = "Please specify the text and target language.";

/// Spoken when the translation service fails
pub const FAILURE_MESSAGE: &str = "Sorry, I could not translate that right now.";

/// Language names a listener is likely to say, with their ISO 639-1 codes
const LANGUAGES: &[(&str, &str)] = &[
    ("afrikaans", "af"),
    ("arabic", "ar"),
    ("bengali", "bn"),
    ("chinese", "zh-CN"),
    ("dutch", "nl"),
    ("english", "en"),
    ("french", "fr"),
    ("german", "de"),
    ("greek", "el"),
    ("gujarati", "gu"),
    ("hebrew", "iw"),
    ("hindi", "hi"),
    ("indonesian", "id"),
    ("italian", "it"),
    ("japanese", "ja"),
    ("kannada", "kn"),
    ("korean", "ko"),
    ("malayalam", "ml"),
    ("marathi", "mr"),
    ("nepali", "ne"),
    ("persian", "fa"),
    ("polish", "pl"),
    ("portuguese", "pt"),
    ("punjabi", "pa"),
    ("russian", "ru"),
    ("spanish", "es"),
    ("swahili", "sw"),
    ("swedish", "sv"),
    ("tamil", "ta"),
    ("telugu", "te"),
    ("thai", "th"),
    ("turkish", "tr"),
    ("ukrainian", "uk"),
    ("urdu", "ur"),
    ("vietnamese", "vi"),
];

/// Split a "translate ..." utterance into `(text, language)`
///
/// The remainder after the keyword must split on "into" into exactly two
/// non-empty parts.
#[must_use]
pub fn parse_request(command: &str) -> Option<(String, String)> {
    let rest = strip_keyword(command, "translate");
    let parts: Vec<&str> = rest.split("into").map(str::trim).collect();
    match parts.as_slice() {
        [text, language] if !text.is_empty() && !language.is_empty() => {
            Some(((*text).to_string(), (*language).to_string()))
        }
        _ => None,
    }
}

/// Resolve a spoken language name or code to a target code
#[must_use]
pub fn language_code(language: &str) -> Option<String> {
    let language = language.trim().to_lowercase();
    if let Some((_, code)) = LANGUAGES.iter().find(|(name, _)| *name == language) {
        return Some((*code).to_string());
    }
    // Accept a bare code ("es", "zh-cn")
    let is_code = (2..=5).contains(&language.len())
        && language.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
    is_code.then_some(language)
}

/// Handle a "translate" utterance
#[must_use]
pub fn handle_translation<C: Capabilities + ?Sized>(command: &str, caps: &C) -> String {
    let Some((text, language)) = parse_request(command) else {
        return SPECIFY_MESSAGE.to_string();
    };

    match caps.translate(&text, &language) {
        Ok(translated) => format!("The translation is: {translated}"),
        Err(e) => {
            tracing::warn!(error = %e, language, "translation failed");
            FAILURE_MESSAGE.to_string()
        }
    }
}

/// Client for the public Google Translate endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::blocking::Client,
}

impl GoogleTranslator {
    /// Create a translator sharing the given HTTP client
    #[must_use]
    pub const fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    /// Translate `text` into `language` (name or code)
    ///
    /// # Errors
    ///
    /// Returns error on an unknown language or a service failure
    pub fn translate(&self, text: &str, language: &str) -> Result<String> {
        let code = language_code(language)
            .ok_or_else(|| Error::Service(format!("unknown language: {language}")))?;

        let url = format!(
            "{TRANSLATE_URL}?client=gtx&sl=auto&tl={}&dt=t&q={}",
            urlencoding::encode(&code),
            urlencoding::encode(text)
        );

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::Service(format!(
                "translate returned {}",
                response.status()
            )));
        }

        let body: Value = response.json()?;
        let translated = parse_translation(&body)?;
        tracing::debug!(code, chars = translated.len(), "translated");
        Ok(translated)
    }
}

/// Join the translated segments of a `translate_a/single` response
///
/// # Errors
///
/// Returns error if the response carries no segments
pub fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Service("malformed translation response".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(Error::Service("empty translation".into()));
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_request() {
        assert_eq!(
            parse_request("translate good morning into spanish"),
            Some(("good morning".to_string(), "spanish".to_string()))
        );
    }

    #[test]
    fn test_parse_request_requires_exactly_two_parts() {
        assert_eq!(parse_request("translate hello"), None);
        assert_eq!(parse_request("translate into spanish"), None);
        assert_eq!(parse_request("translate a into b into c"), None);
    }

    #[test]
    fn test_language_code() {
        assert_eq!(language_code("Spanish").as_deref(), Some("es"));
        assert_eq!(language_code("hindi").as_deref(), Some("hi"));
        assert_eq!(language_code("fr").as_deref(), Some("fr"));
        assert_eq!(language_code("klingon"), None);
    }

    #[test]
    fn test_parse_translation_joins_segments() {
        let body = json!([[["Buenos ", "Good ", null], ["días", "morning", null]], null, "en"]);
        assert_eq!(parse_translation(&body).unwrap(), "Buenos días");
    }

    #[test]
    fn test_parse_translation_rejects_garbage() {
        assert!(parse_translation(&json!({"error": 1})).is_err());
        assert!(parse_translation(&json!([[]])).is_err());
    }
}
