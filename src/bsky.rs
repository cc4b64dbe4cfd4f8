use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;

const MAX_RETRIES: usize = 4;
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(2);

/// `app.bsky.actor.defs#profileViewDetailed`, trimmed to what the stats page uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub did: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub follows_count: i64,
    #[serde(default)]
    pub posts_count: i64,
}

/// XRPC error body: `{ "error": "InvalidRequest", "message": "Profile not found" }`
#[derive(Deserialize)]
struct XrpcErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error looking up profile: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{}", describe_api_error(.status, .error, .message))]
    Api {
        status: u16,
        error: String,
        message: Option<String>,
    },

    #[error("rate limited by the Bluesky API after {attempts} attempts")]
    RateLimited { attempts: usize },

    #[error("unexpected profile response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct BlueskyClient {
    service_url: Arc<String>,
    token: Option<Arc<String>>,
    http: Arc<Client>,
    max_wait: Duration,
}

impl BlueskyClient {
    /// Create an XRPC client for the configured AppView.
    pub fn new(config: &Config) -> Result<Self, LookupError> {
        Self::with_builder(config, Client::builder())
    }

    fn with_builder(config: &Config, builder: ClientBuilder) -> Result<Self, LookupError> {
        let http = builder
            .timeout(config.request_timeout)
            .user_agent(concat!("skyage/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            service_url: Arc::new(config.service_url.clone()),
            token: config.bearer_token().map(|t| Arc::new(t.to_string())),
            http: Arc::new(http),
            max_wait: config.request_timeout,
        })
    }

    /// Low-level XRPC query with basic retry/backoff and error-body decoding.
    async fn query(&self, nsid: &str, params: &[(&str, &str)]) -> Result<Value, LookupError> {
        let url = format!("{}/xrpc/{nsid}", self.service_url);
        let mut attempt = 0usize;

        loop {
            attempt += 1;

            let mut req = self.http.get(&url).query(params);
            if let Some(token) = &self.token {
                req = req.bearer_auth(token.as_str());
            }

            let resp = req.send().await?;
            let status = resp.status();
            let headers = resp.headers().clone();
            let body = resp.text().await?;

            if status.is_success() {
                return Ok(serde_json::from_str(&body)?);
            }

            // If rate limited, honor Retry-After header when present
            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt >= MAX_RETRIES {
                    return Err(LookupError::RateLimited { attempts: attempt });
                }
                let wait = retry_after(&headers, self.max_wait);
                warn!(attempt, ?wait, "rate limited, retrying");
                sleep(wait).await;
                continue;
            }

            if status.is_server_error() && attempt < MAX_RETRIES {
                let backoff = Duration::from_millis(250u64.saturating_mul(1 << (attempt - 1)));
                warn!(attempt, status = status.as_u16(), ?backoff, "server error, retrying");
                sleep(backoff).await;
                continue;
            }

            return Err(api_error(status, &body));
        }
    }

    /// Fetch the detailed profile for a handle or DID.
    #[tracing::instrument(skip(self))]
    pub async fn get_profile(&self, actor: &str) -> Result<Profile, LookupError> {
        let json = self
            .query("app.bsky.actor.getProfile", &[("actor", actor)])
            .await?;
        debug!(response = %json, "profile lookup succeeded");

        Ok(serde_json::from_value(json)?)
    }
}

/// Delay requested by a 429 response, never longer than `max_wait`.
fn retry_after(headers: &HeaderMap, max_wait: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER)
        .min(max_wait)
}

fn describe_api_error(status: &u16, error: &str, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("{message} ({error}, HTTP {status})"),
        None => format!("{error} (HTTP {status})"),
    }
}

fn api_error(status: StatusCode, body: &str) -> LookupError {
    let parsed = serde_json::from_str::<XrpcErrorBody>(body).ok();
    let error = parsed
        .as_ref()
        .and_then(|b| b.error.clone())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("UnknownError")
                .to_string()
        });
    let message = parsed
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    LookupError::Api {
        status: status.as_u16(),
        error,
        message,
    }
}
