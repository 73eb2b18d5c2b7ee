//! sms-notify - send a fixed SMS notification to a subscriber list.
//!
//! CLI entry point.

use sms_notify::cli::Cli;
use sms_notify::{dispatch, logging};
use sms_twilio::TwilioClient;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_env();
    logging::init(&cli.logging());

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            error!(stage = %e.stage(), "{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut client = TwilioClient::with_base_url(
        config.account_sid.clone(),
        config.auth_token.clone(),
        cli.api_base_url.clone(),
    );
    if let Some(timeout) = cli.timeout() {
        client = match client.with_timeout(timeout) {
            Ok(client) => client,
            Err(e) => {
                error!("build SMS client: {}", e);
                return ExitCode::FAILURE;
            }
        };
    }

    match dispatch::notify(&client, &config).await {
        Ok(sent) => {
            info!(sent, "all subscribers notified");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(stage = %e.stage(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
