//! # SMS Core
//!
//! Provider-agnostic contract for sending SMS messages.
//!
//! This crate provides the building blocks shared by every provider:
//! - [`SmsClient`] trait for sending a single SMS
//! - [`SendRequest`] / [`SendResponse`] request and response types
//! - [`SmsError`], which separates transport failures from
//!   provider-reported exceptions
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SendRequest, SmsClient};
//!
//! let response = client.send(SendRequest::new("+1234567890", "+0987654321", "Hello world!")).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Structured failure returned by a provider for a call that completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderException {
    /// Provider-specific error code.
    pub code: i64,
    /// Status reported by the provider (usually the HTTP status).
    pub status: u16,
    pub message: String,
    /// Link to the provider's documentation for this error.
    pub more_info: String,
}

impl fmt::Display for ProviderException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code: {}, status: {}, message: {}, more info: {}",
            self.code, self.status, self.message, self.more_info
        )
    }
}

/// Errors that can occur during SMS operations
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The call could not be completed, or its response could not be decoded
    #[error("transport error: {0}")]
    Transport(String),
    /// The provider answered with a structured exception
    #[error("provider exception: {0}")]
    Provider(ProviderException),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendRequest<'a> {
    pub to: &'a str,
    pub from: &'a str,
    pub text: &'a str,
    /// Media attachment URL (MMS). Omitted from the provider call when `None`.
    pub media_url: Option<&'a str>,
    /// Delivery status callback URL. Omitted from the provider call when `None`.
    pub status_callback: Option<&'a str>,
}

impl<'a> SendRequest<'a> {
    /// Plain text request with both optional fields left empty.
    pub fn new(to: &'a str, from: &'a str, text: &'a str) -> Self {
        Self {
            to,
            from,
            text,
            media_url: None,
            status_callback: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub id: String,
    /// Name of the backend/provider that produced the response, e.g. "twilio".
    pub provider: &'static str,
    /// Raw provider payload for debugging / audit.
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait SmsClient: Send + Sync {
    /// Send a single text SMS.
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError>;
}

/// Utility to create a pseudo id if a provider doesn't return one.
pub fn fallback_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_exception_display_keeps_every_field() {
        let exc = ProviderException {
            code: 21211,
            status: 400,
            message: "The 'To' number +200 is not a valid phone number.".into(),
            more_info: "https://www.twilio.com/docs/errors/21211".into(),
        };
        assert_eq!(
            exc.to_string(),
            "code: 21211, status: 400, message: The 'To' number +200 is not a valid phone number., more info: https://www.twilio.com/docs/errors/21211"
        );
        let err = SmsError::Provider(exc.clone());
        assert!(err.to_string().ends_with(&exc.to_string()));
    }

    #[test]
    fn plain_request_has_no_optional_fields() {
        let req = SendRequest::new("+100", "+999", "hi");
        assert_eq!(req.to, "+100");
        assert_eq!(req.from, "+999");
        assert!(req.media_url.is_none());
        assert!(req.status_callback.is_none());
    }

    #[test]
    fn fallback_ids_are_unique() {
        assert_ne!(fallback_id(), fallback_id());
    }
}
