//! Bearer-token acquisition for the stock data service
//!
//! The token lives in an explicit cache owned by the stock client, not in
//! process-global state. Refresh policy: refetch when no token is cached or
//! the cached one is older than the TTL.

use crate::client::FetchError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Registration details posted to the auth endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub name: String,
    #[serde(rename = "rollNo")]
    pub roll_no: String,
    #[serde(rename = "accessCode")]
    pub access_code: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    fetched_at: Instant,
}

/// Cached bearer token with a fixed-TTL refresh policy.
pub struct TokenCache {
    credentials: Credentials,
    ttl: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// The auth endpoint reports no expiry, so tokens are assumed stale
    /// after 15 minutes.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

    pub fn new(credentials: Credentials) -> Self {
        Self::with_ttl(credentials, Self::DEFAULT_TTL)
    }

    pub fn with_ttl(credentials: Credentials, ttl: Duration) -> Self {
        Self {
            credentials,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Current bearer token, refreshed through `auth_url` when absent or
    /// older than the TTL.
    pub async fn bearer(
        &self,
        client: &reqwest::Client,
        auth_url: &str,
    ) -> Result<String, FetchError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.fetched_at.elapsed() < self.ttl {
                return Ok(token.value.clone());
            }
        }

        let response = client
            .post(auth_url)
            .json(&self.credentials)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream(status.as_u16()));
        }

        let auth: AuthResponse = response.json().await.map_err(FetchError::from)?;
        log::info!("Refreshed stock service bearer token");

        *cached = Some(CachedToken {
            value: auth.access_token.clone(),
            fetched_at: Instant::now(),
        });

        Ok(auth.access_token)
    }

    /// Whether the next `bearer` call would hit the network.
    pub async fn needs_refresh(&self) -> bool {
        match self.cached.lock().await.as_ref() {
            Some(token) => token.fetched_at.elapsed() >= self.ttl,
            None => true,
        }
    }
}
