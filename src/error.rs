use crate::config::Field;
use sms_core::{ProviderException, SmsError};
use std::fmt;
use std::path::PathBuf;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadConfig,
    UnmarshalConfig,
    InvalidConfig,
    SendSms,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::LoadConfig => "load config",
            Stage::UnmarshalConfig => "unmarshal config",
            Stage::InvalidConfig => "invalid config",
            Stage::SendSms => "send SMS",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoding failure for a configuration document
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

/// Errors that abort a notification run
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Configuration file could not be read
    #[error("load config: read {}: {source}", .path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Configuration file could not be decoded
    #[error("unmarshal config: {0}")]
    ConfigParse(#[source] ParseError),
    /// A required field is still empty after merging file and flags
    #[error("invalid config: missing value: {0}")]
    MissingField(Field),
    /// The provider could not be reached for this subscriber
    #[error("send SMS to {to}: {source}")]
    SendTransport {
        to: String,
        #[source]
        source: SmsError,
    },
    /// The provider rejected the message for this subscriber
    #[error("send SMS to {to}: {exception}")]
    SendProvider {
        to: String,
        exception: ProviderException,
    },
}

impl NotifyError {
    pub fn stage(&self) -> Stage {
        match self {
            NotifyError::ConfigLoad { .. } => Stage::LoadConfig,
            NotifyError::ConfigParse(_) => Stage::UnmarshalConfig,
            NotifyError::MissingField(_) => Stage::InvalidConfig,
            NotifyError::SendTransport { .. } | NotifyError::SendProvider { .. } => Stage::SendSms,
        }
    }
}
