/**
 * Centrifugo Gateway Client
 *
 * Thin client for the gateway's server API. Every call is a
 * `POST {api_url}/api` with a JSON body `{"method": ..., "params": {...}}` and
 * an `Authorization: apikey <key>` header. Calls time out after 10 seconds and
 * are never retried.
 *
 * # Delivery
 *
 * Publishing is advisory. Failures come back as [`RealtimeError`] and are
 * logged here with the channel involved; callers only log them again and
 * never turn them into request failures.
 *
 * # Channel Tokens
 *
 * Browsers connect to the gateway with a short-lived HS256 token signed with
 * the gateway secret, independent of the session token.
 */
use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::backend::auth::AuthError;
use crate::backend::server::config::{PLACEHOLDER_API_KEY, PLACEHOLDER_SECRET};

/// Timeout applied to every gateway call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Lifetime of a channel connection token
pub const CHANNEL_TOKEN_TTL_SECS: i64 = 3600;

/// Gateway call failures
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// Connection failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx response carrying a non-null `error` field
    #[error("API error: {0}")]
    Api(String),

    /// Response body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Claims of a channel connection token
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelClaims {
    pub sub: String,
    pub exp: i64,
}

/// Client for the real-time gateway's server API
#[derive(Clone)]
pub struct CentrifugoClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    token_key: EncodingKey,
}

impl CentrifugoClient {
    /// Build a client
    ///
    /// # Arguments
    /// * `api_url` - Gateway base URL, without the `/api` suffix
    /// * `api_key` - Server API key
    /// * `secret` - Secret used to sign channel tokens
    pub fn new(api_url: &str, api_key: &str, secret: &str) -> Result<Self, RealtimeError> {
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            tracing::warn!("[Realtime] Centrifugo API key not configured properly");
        }
        if secret.is_empty() || secret == PLACEHOLDER_SECRET {
            tracing::warn!("[Realtime] Centrifugo secret not configured properly");
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RealtimeError::Network(format!("client build failed: {}", e)))?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            token_key: EncodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Sign a connection token for `user_id`, valid for `ttl_secs` seconds
    pub fn issue_channel_token(&self, user_id: &str, ttl_secs: i64) -> Result<String, AuthError> {
        let claims = ChannelClaims {
            sub: user_id.to_string(),
            exp: Utc::now().timestamp() + ttl_secs,
        };

        encode(&Header::default(), &claims, &self.token_key).map_err(|e| {
            tracing::error!("[Realtime] Error generating Centrifugo token: {:?}", e);
            AuthError::Signing(e.to_string())
        })
    }

    /// Publish `data` to one channel
    pub async fn publish<T>(&self, channel: &str, data: &T) -> Result<(), RealtimeError>
    where
        T: Serialize + ?Sized,
    {
        tracing::debug!("[Realtime] Publishing to channel {}", channel);

        let params = json!({ "channel": channel, "data": data });
        match self.call("publish", params).await {
            Ok(_) => {
                tracing::debug!("[Realtime] Published to channel {}", channel);
                Ok(())
            }
            Err(e) => {
                tracing::error!("[Realtime] Publish to {} failed: {}", channel, e);
                Err(e)
            }
        }
    }

    /// Publish the same `data` to several channels in one call
    pub async fn broadcast<T>(&self, channels: &[String], data: &T) -> Result<(), RealtimeError>
    where
        T: Serialize + ?Sized,
    {
        let params = json!({ "channels": channels, "data": data });
        self.call("broadcast", params).await.map(|_| ()).map_err(|e| {
            tracing::error!("[Realtime] Broadcast to {:?} failed: {}", channels, e);
            e
        })
    }

    /// Ids of the clients currently subscribed to `channel`
    ///
    /// # Returns
    /// `None` on any failure
    pub async fn presence(&self, channel: &str) -> Option<Vec<String>> {
        match self.call("presence", json!({ "channel": channel })).await {
            Ok(result) => Some(
                result
                    .get("presence")
                    .and_then(Value::as_object)
                    .map(|presence| presence.keys().cloned().collect())
                    .unwrap_or_default(),
            ),
            Err(e) => {
                tracing::error!("[Realtime] Presence for {} failed: {}", channel, e);
                None
            }
        }
    }

    /// Issue one API call and return its `result` field
    async fn call(&self, method: &str, params: Value) -> Result<Value, RealtimeError> {
        let response = self
            .http
            .post(format!("{}/api", self.api_url))
            .header(AUTHORIZATION, format!("apikey {}", self.api_key))
            .json(&json!({ "method": method, "params": params }))
            .send()
            .await
            .map_err(|e| RealtimeError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RealtimeError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(RealtimeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = if body.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(&body).map_err(|e| RealtimeError::Decode(e.to_string()))?
        };

        match value.get("error") {
            Some(error) if !error.is_null() => Err(RealtimeError::Api(error.to_string())),
            _ => Ok(value.get("result").cloned().unwrap_or(Value::Null)),
        }
    }
}

impl fmt::Debug for CentrifugoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CentrifugoClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
