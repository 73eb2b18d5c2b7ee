//! Command line flags.

use crate::config::{self, NotifyConfig, Overrides};
use crate::error::NotifyError;
use crate::logging::{LogFormat, LoggingConfig};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Flags that may also be spelled with a single dash (`-from +1555`).
const LONG_FLAGS: &[&str] = &[
    "from",
    "subs",
    "text",
    "sid",
    "token",
    "config",
    "timeout",
    "log-level",
    "log-format",
    "api-base-url",
    "help",
    "version",
];

/// Long flags that do not take a value.
const SWITCHES: &[&str] = &["help", "version"];

pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";

/// Send a fixed SMS notification to every subscriber.
#[derive(Parser, Debug, Clone)]
#[command(name = "sms-notify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The number from which the SMS will be sent
    #[arg(long, value_name = "NUMBER", allow_hyphen_values = true)]
    pub from: Option<String>,

    /// Subscribers list (comma separated)
    #[arg(long, value_name = "NUMBERS", allow_hyphen_values = true)]
    pub subs: Option<String>,

    /// Text body
    #[arg(long, allow_hyphen_values = true)]
    pub text: Option<String>,

    /// Twilio account SID [fallback: TWILIO_ACCOUNT_SID]
    #[arg(long, allow_hyphen_values = true)]
    pub sid: Option<String>,

    /// Twilio account token [fallback: TWILIO_AUTH_TOKEN]
    #[arg(long, allow_hyphen_values = true)]
    pub token: Option<String>,

    /// Config path (YAML, TOML or JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds, 0 to wait indefinitely
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Log level or filter directive
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Twilio API base URL
    #[arg(long, default_value = sms_twilio::DEFAULT_BASE_URL, hide = true)]
    pub api_base_url: String,
}

impl Cli {
    /// Parse the process arguments, accepting single-dash long flags.
    pub fn parse_env() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            account_sid: self.sid.clone(),
            auth_token: self.token.clone(),
            subscribers: self.subs.clone(),
            notification_text: self.text.clone(),
            number: self.from.clone(),
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    /// Build the validated notification configuration. Credentials missing
    /// from both the file and the flags are taken from the environment.
    pub fn resolve(&self) -> Result<NotifyConfig, NotifyError> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// [`Cli::resolve`] with an explicit environment lookup.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<NotifyConfig, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        config::resolve_with_fallback(
            self.config_path(),
            &self.overrides(),
            &env_fallback(lookup),
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

/// Credentials read from the environment, applied only to fields the file
/// and the flags leave empty.
pub fn env_fallback<F>(lookup: F) -> Overrides
where
    F: Fn(&str) -> Option<String>,
{
    Overrides {
        account_sid: lookup(ENV_ACCOUNT_SID),
        auth_token: lookup(ENV_AUTH_TOKEN),
        ..Overrides::default()
    }
}

/// Rewrite `-flag` and `-flag=value` into their double-dash form so clap
/// accepts them. The program name, flag values and unknown arguments pass
/// through.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    let mut value_follows = false;

    for arg in args {
        if std::mem::take(&mut value_follows) {
            out.push(arg);
            continue;
        }
        let Some(s) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        let flag = s.strip_prefix("--").or_else(|| s.strip_prefix('-'));
        match flag.map(|f| (f, f.split_once('='))) {
            Some((name, None)) if LONG_FLAGS.contains(&name) => {
                value_follows = !SWITCHES.contains(&name);
                out.push(OsString::from(format!("--{name}")));
            }
            Some((_, Some((name, value)))) if LONG_FLAGS.contains(&name) => {
                out.push(OsString::from(format!("--{name}={value}")));
            }
            _ => out.push(arg),
        }
    }
    out
}
