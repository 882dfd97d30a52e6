//! Authenticated client for the stock data service
//!
//! Separate collaborator from the number-generator endpoints: these calls
//! carry a bearer token (see [`crate::auth`]) and feed the excluded chart
//! layer, which renders the series and the average line as given.

use crate::auth::{Credentials, TokenCache};
use crate::client::FetchError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// One price sample from the stock history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    #[serde(rename = "lastUpdatedAt")]
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct StockListResponse {
    stocks: HashMap<String, String>,
}

/// Stock data client owning its HTTP connection and token cache.
pub struct StockClient {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenCache,
}

impl StockClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self, FetchError> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            base_url: base_url.into(),
            tokens: TokenCache::new(credentials),
        })
    }

    fn auth_url(&self) -> String {
        format!("{}/auth", self.base_url)
    }

    /// Display-name to symbol map from the stock list endpoint.
    pub async fn fetch_stock_list(&self) -> Result<HashMap<String, String>, FetchError> {
        let token = self.tokens.bearer(&self.client, &self.auth_url()).await?;

        let response = self
            .client
            .get(format!("{}/stocks", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream(status.as_u16()));
        }

        let list: StockListResponse = response.json().await.map_err(FetchError::from)?;
        Ok(list.stocks)
    }

    /// Price history for `symbol` over the last `minutes` minutes.
    ///
    /// The endpoint returns a bare object instead of an array when only one
    /// sample exists; both shapes normalize to a vec.
    pub async fn fetch_price_history(
        &self,
        symbol: &str,
        minutes: u32,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let token = self.tokens.bearer(&self.client, &self.auth_url()).await?;

        let url = format!("{}/stocks/{}?minutes={}", self.base_url, symbol, minutes);
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_price_history(&body)
    }
}

fn parse_price_history(body: &[u8]) -> Result<Vec<PricePoint>, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::Transport(format!("invalid price payload: {}", e)))?;

    let points = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|point: PricePoint| vec![point])
    };

    points.map_err(|e| FetchError::Transport(format!("invalid price payload: {}", e)))
}

/// Mean price over a series; the value the chart overlays as its average
/// line. Undefined for an empty series.
pub fn average_price(points: &[PricePoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().map(|p| p.price).sum::<f64>() / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_history() {
        let body = br#"[
            {"price": 120.5, "lastUpdatedAt": "2025-05-08T04:26:27.465Z"},
            {"price": 121.0, "lastUpdatedAt": "2025-05-08T04:27:02.110Z"}
        ]"#;

        let points = parse_price_history(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].price, 120.5);
        assert!(points[0].last_updated_at < points[1].last_updated_at);
    }

    #[test]
    fn test_parse_single_object_normalizes_to_vec() {
        let body = br#"{"price": 99.25, "lastUpdatedAt": "2025-05-08T04:26:27.465Z"}"#;

        let points = parse_price_history(body).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price, 99.25);
    }

    #[test]
    fn test_parse_invalid_payload_is_an_error() {
        assert!(parse_price_history(b"[1, 2, 3]").is_err());
        assert!(parse_price_history(b"nope").is_err());
    }

    #[test]
    fn test_average_price() {
        let points = parse_price_history(
            br#"[
                {"price": 100.0, "lastUpdatedAt": "2025-05-08T04:26:27.465Z"},
                {"price": 102.0, "lastUpdatedAt": "2025-05-08T04:27:27.465Z"},
                {"price": 104.0, "lastUpdatedAt": "2025-05-08T04:28:27.465Z"}
            ]"#,
        )
        .unwrap();

        assert_eq!(average_price(&points), Some(102.0));
        assert_eq!(average_price(&[]), None);
    }
}
