//! # SMS Notify
//!
//! Sends one fixed SMS notification to a list of subscribers through Twilio.
//!
//! The run is a straight pipeline:
//!
//! 1. [`config::resolve`](crate::config::resolve) merges an optional configuration file with command
//!    line overrides and validates the result.
//! 2. [`dispatch::dispatch`](crate::dispatch::dispatch) sends the message to each subscriber in order
//!    and stops at the first failure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sms_notify::prelude::*;
//! use sms_twilio::TwilioClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = resolve(Some("notify.yaml".as_ref()), &Overrides::default())?;
//!     let client = TwilioClient::new(config.account_sid.clone(), config.auth_token.clone());
//!     let sent = notify(&client, &config).await?;
//!     println!("notified {sent} subscribers");
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```yaml
//! account-sid: ACxxxxxxxxxxxxxxxx
//! auth-token: xxxxxxxx
//! subscribers:
//!   - "+15550001111"
//!   - "+15550002222"
//! notification-text: "Deploy finished"
//! number: "+15550009999"
//! ```

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;

pub use crate::config::{resolve, resolve_with_fallback, Field, NotifyConfig, Overrides};
pub use error::{NotifyError, ParseError, Stage};

/// Common imports for SMS Notify usage
pub mod prelude {
    pub use crate::cli::{normalize_args, Cli};
    pub use crate::config::{resolve, resolve_with_fallback, Field, NotifyConfig, Overrides};
    pub use crate::dispatch::{dispatch, notify};
    pub use crate::error::{NotifyError, ParseError, Stage};
    pub use crate::logging::{LogFormat, LoggingConfig};
    pub use sms_core::*;
}
