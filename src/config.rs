//! Notification configuration: file loading, flag overrides and validation.

use crate::error::{NotifyError, ParseError};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Required configuration fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AccountSid,
    AuthToken,
    Subscribers,
    NotificationText,
    Number,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::AccountSid => "account SID",
            Field::AuthToken => "auth token",
            Field::Subscribers => "subscribers",
            Field::NotificationText => "notification text",
            Field::Number => "number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NotifyConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// Destination numbers, notified in order
    pub subscribers: Vec<String>,
    /// Message body sent verbatim to every subscriber
    pub notification_text: String,
    /// Sender number
    pub number: String,
}

/// Values supplied on the command line. `None` and empty strings leave the
/// file value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Comma separated subscriber list
    pub subscribers: Option<String>,
    pub notification_text: Option<String>,
    pub number: Option<String>,
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn file_format(path: &Path) -> FileFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        _ => FileFormat::Yaml,
    }
}

/// Only whitespace, comments and document markers.
fn is_blank_yaml(contents: &str) -> bool {
    contents.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

impl NotifyConfig {
    /// Load configuration from a file. The format follows the extension
    /// (`.toml`, `.json`), YAML otherwise.
    pub fn from_file(path: &Path) -> Result<Self, NotifyError> {
        let contents = fs::read_to_string(path).map_err(|source| NotifyError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_document(&contents, file_format(path))
    }

    /// Decode configuration from an in-memory document.
    ///
    /// YAML string fields keep the scalar text as written, so an unquoted
    /// `+15550001111` stays a phone number. An empty document yields the
    /// default configuration.
    pub fn from_document(contents: &str, format: FileFormat) -> Result<Self, NotifyError> {
        let decoded = match format {
            FileFormat::Yaml if is_blank_yaml(contents) => Ok(Self::default()),
            FileFormat::Yaml => serde_yaml::from_str::<Option<Self>>(contents)
                .map(Option::unwrap_or_default)
                .map_err(ParseError::from),
            format => Config::builder()
                .add_source(File::from_str(contents, format))
                .build()
                .and_then(|c| c.try_deserialize::<Self>())
                .map_err(ParseError::from),
        };
        decoded.map_err(NotifyError::ConfigParse)
    }

    /// Apply command line overrides field by field. A subscriber override
    /// replaces the whole list.
    pub fn merge(mut self, overrides: &Overrides) -> Self {
        if let Some(sid) = supplied(&overrides.account_sid) {
            self.account_sid = sid.to_string();
        }
        if let Some(token) = supplied(&overrides.auth_token) {
            self.auth_token = token.to_string();
        }
        if let Some(subs) = supplied(&overrides.subscribers) {
            self.subscribers = subs.split(',').map(str::to_string).collect();
        }
        if let Some(text) = supplied(&overrides.notification_text) {
            self.notification_text = text.to_string();
        }
        if let Some(number) = supplied(&overrides.number) {
            self.number = number.to_string();
        }
        self
    }

    /// Report the first missing field.
    pub fn validate(&self) -> Result<(), NotifyError> {
        let missing = if self.account_sid.is_empty() {
            Some(Field::AccountSid)
        } else if self.auth_token.is_empty() {
            Some(Field::AuthToken)
        } else if self.subscribers.is_empty() {
            Some(Field::Subscribers)
        } else if self.notification_text.is_empty() {
            Some(Field::NotificationText)
        } else if self.number.is_empty() {
            Some(Field::Number)
        } else {
            None
        };
        match missing {
            Some(field) => Err(NotifyError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Fill fields that are still empty from `fallback`. Values already set
    /// by the file or by flags are kept.
    pub fn fill_missing(mut self, fallback: &Overrides) -> Self {
        let fallback = NotifyConfig::default().merge(fallback);
        if self.account_sid.is_empty() {
            self.account_sid = fallback.account_sid;
        }
        if self.auth_token.is_empty() {
            self.auth_token = fallback.auth_token;
        }
        if self.subscribers.is_empty() {
            self.subscribers = fallback.subscribers;
        }
        if self.notification_text.is_empty() {
            self.notification_text = fallback.notification_text;
        }
        if self.number.is_empty() {
            self.number = fallback.number;
        }
        self
    }
}

/// Merge the optional configuration file with command line overrides and
/// validate the result.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<NotifyConfig, NotifyError> {
    resolve_with_fallback(path, overrides, &Overrides::default())
}

/// [`resolve`], then fill fields left empty by both sources from `fallback`
/// (typically the environment) before validating.
pub fn resolve_with_fallback(
    path: Option<&Path>,
    overrides: &Overrides,
    fallback: &Overrides,
) -> Result<NotifyConfig, NotifyError> {
    let base = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            NotifyConfig::from_file(path)?
        }
        None => NotifyConfig::default(),
    };
    let config = base.merge(overrides).fill_missing(fallback);
    config.validate()?;
    Ok(config)
}
