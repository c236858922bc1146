//! Current weather from `OpenWeatherMap`

use serde_json::Value;

use crate::{Error, Result};

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Spoken when weather data is unavailable
pub const FAILURE_MESSAGE: &str = "Could not retrieve weather data.";

/// Weather client for one configured city
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
    city: String,
}

impl WeatherClient {
    /// Create a weather client
    #[must_use]
    pub const fn new(client: reqwest::blocking::Client, api_key: Option<String>, city: String) -> Self {
        Self {
            client,
            api_key,
            city,
        }
    }

    /// Describe the current weather in metric units
    ///
    /// # Errors
    ///
    /// Returns error if no key is configured, the request fails, or the
    /// response is not a successful report
    pub fn current(&self) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("OPENWEATHERMAP_API_KEY not set".into()))?;

        let response = self
            .client
            .get(WEATHER_URL)
            .query(&[("q", self.city.as_str()), ("appid", api_key), ("units", "metric")])
            .send()?;

        let body: Value = response.json()?;
        format_report(&self.city, &body)
    }
}

/// Render an `OpenWeatherMap` response as a sentence
///
/// # Errors
///
/// Returns error unless `cod` is 200 and description and temperature exist
pub fn format_report(city: &str, body: &Value) -> Result<String> {
    // `cod` is a number on success and sometimes a string on failure
    let cod = match body.get("cod") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    if cod != Some(200) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(Error::Service(format!("weather lookup failed: {message}")));
    }

    let description = body
        .pointer("/weather/0/description")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Service("weather description missing".into()))?;
    let temperature = body
        .pointer("/main/temp")
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::Service("temperature missing".into()))?;

    Ok(format!(
        "The current weather in {city} is {description} with a temperature of {temperature}°C."
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_report() {
        let body = json!({
            "cod": 200,
            "weather": [{"description": "haze"}],
            "main": {"temp": 31.5}
        });
        assert_eq!(
            format_report("Delhi", &body).unwrap(),
            "The current weather in Delhi is haze with a temperature of 31.5°C."
        );
    }

    #[test]
    fn test_format_report_rejects_failure_code() {
        let body = json!({"cod": "404", "message": "city not found"});
        let err = format_report("Atlantis", &body).unwrap_err();
        assert!(err.to_string().contains("city not found"));
    }

    #[test]
    fn test_format_report_requires_fields() {
        let body = json!({"cod": 200, "weather": []});
        assert!(format_report("Delhi", &body).is_err());
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let client = WeatherClient::new(reqwest::blocking::Client::new(), None, "Delhi".into());
        assert!(matches!(client.current(), Err(Error::Config(_))));
    }
}
