//! Index quotes from the Yahoo Finance chart API

use serde_json::Value;

use crate::{Error, Result};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Spoken when market data is unavailable
pub const FAILURE_MESSAGE: &str = "Could not retrieve stock market data.";

/// Quote client for the configured symbols
#[derive(Debug, Clone)]
pub struct StockClient {
    client: reqwest::blocking::Client,
    symbols: Vec<String>,
}

impl StockClient {
    /// Create a quote client
    #[must_use]
    pub const fn new(client: reqwest::blocking::Client, symbols: Vec<String>) -> Self {
        Self { client, symbols }
    }

    /// Describe every configured symbol
    ///
    /// # Errors
    ///
    /// Returns error if no symbols are configured or any quote fails
    pub fn update(&self) -> Result<String> {
        if self.symbols.is_empty() {
            return Err(Error::Config("no stock symbols configured".into()));
        }

        let lines = self
            .symbols
            .iter()
            .map(|symbol| self.quote(symbol))
            .collect::<Result<Vec<_>>>()?;

        Ok(lines.join(" "))
    }

    fn quote(&self, symbol: &str) -> Result<String> {
        let url = format!(
            "{CHART_URL}/{}?range=1d&interval=1d",
            urlencoding::encode(symbol)
        );
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::Service(format!(
                "quote for {symbol} returned {}",
                response.status()
            )));
        }

        let body: Value = response.json()?;
        format_quote(symbol, &body)
    }
}

/// Render one chart response as "<symbol> is at <price>, up|down <pct>%."
///
/// # Errors
///
/// Returns error if price or previous close is missing
pub fn format_quote(symbol: &str, body: &Value) -> Result<String> {
    let meta = body
        .pointer("/chart/result/0/meta")
        .ok_or_else(|| Error::Service(format!("no quote for {symbol}")))?;

    let price = meta
        .get("regularMarketPrice")
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::Service(format!("no price for {symbol}")))?;
    let previous = meta
        .get("chartPreviousClose")
        .or_else(|| meta.get("previousClose"))
        .and_then(Value::as_f64)
        .filter(|p| *p != 0.0)
        .ok_or_else(|| Error::Service(format!("no previous close for {symbol}")))?;

    let change = (price - previous) / previous * 100.0;
    let direction = if change < 0.0 { "down" } else { "up" };

    Ok(format!(
        "{symbol} is at {price:.2}, {direction} {:.2}%.",
        change.abs()
    ))
}
