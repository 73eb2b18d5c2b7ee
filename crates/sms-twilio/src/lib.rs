//! # Twilio SMS Provider
//!
//! Twilio REST backend for the [`SmsClient`] contract.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SendRequest, SmsClient};
//! use sms_twilio::TwilioClient;
//!
//! let client = TwilioClient::new("ACxxxxxxxx", "auth_token");
//! let response = client.send(SendRequest::new("+1234567890", "+0987654321", "Hello from Twilio!")).await?;
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use sms_core::{ProviderException, SendRequest, SendResponse, SmsClient, SmsError};
use std::time::Duration;
use tracing::{debug, error};

const PROVIDER: &str = "twilio";
const API_VERSION: &str = "2010-04-01";
/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// Twilio REST client.
#[derive(Clone, Debug)]
pub struct TwilioClient {
    /// Twilio Account SID.
    pub account_sid: String,
    /// Twilio Auth Token (password for Basic auth).
    pub auth_token: String,
    /// API base URL; override for testing/mocking.
    pub base_url: String,
    http: reqwest::Client,
}

impl TwilioClient {
    pub fn new<S: Into<String>>(account_sid: S, auth_token: S) -> Self {
        Self::with_base_url(account_sid, auth_token, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url<S: Into<String>>(account_sid: S, auth_token: S, base_url: String) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Bound every provider call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SmsError> {
        self.http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SmsError::Transport(e.to_string()))?;
        Ok(self)
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            API_VERSION,
            self.account_sid
        )
    }
}

#[derive(Debug, Serialize)]
struct TwilioSendRequest<'a> {
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "Body")]
    body: &'a str,
    #[serde(rename = "MediaUrl", skip_serializing_if = "Option::is_none")]
    media_url: Option<&'a str>,
    #[serde(rename = "StatusCallback", skip_serializing_if = "Option::is_none")]
    status_callback: Option<&'a str>,
}

impl<'a> From<&SendRequest<'a>> for TwilioSendRequest<'a> {
    fn from(req: &SendRequest<'a>) -> Self {
        Self {
            from: req.from,
            to: req.to,
            body: req.text,
            media_url: req.media_url,
            status_callback: req.status_callback,
        }
    }
}

/// Error payload returned by Twilio for rejected requests.
#[derive(Debug, Deserialize)]
struct TwilioException {
    code: Option<i64>,
    status: Option<u16>,
    message: String,
    more_info: Option<String>,
}

impl TwilioException {
    fn into_provider_exception(self, http_status: StatusCode) -> ProviderException {
        ProviderException {
            code: self.code.unwrap_or_default(),
            status: self.status.unwrap_or_else(|| http_status.as_u16()),
            message: self.message,
            more_info: self.more_info.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl SmsClient for TwilioClient {
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        let payload = TwilioSendRequest::from(&req);
        debug!(to = req.to, "posting message to Twilio");

        let res = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&payload)
            .send()
            .await
            .map_err(|e| SmsError::Transport(e.to_string()))?;

        let status = res.status();
        let raw_text = res
            .text()
            .await
            .map_err(|e| SmsError::Transport(e.to_string()))?;

        if status != StatusCode::OK && status != StatusCode::CREATED {
            let exc: TwilioException = serde_json::from_str(&raw_text).map_err(|e| {
                error!("undecodable Twilio error response (HTTP {}): {}", status, e);
                SmsError::Transport(format!("HTTP {}: {}", status, raw_text))
            })?;
            return Err(SmsError::Provider(exc.into_provider_exception(status)));
        }

        let raw_json: serde_json::Value = serde_json::from_str(&raw_text)
            .map_err(|e| SmsError::Transport(format!("decode response: {}", e)))?;

        let id = raw_json
            .get("sid")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(sms_core::fallback_id);

        Ok(SendResponse {
            id,
            provider: PROVIDER,
            raw: raw_json,
        })
    }
}
