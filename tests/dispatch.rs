use async_trait::async_trait;
use sms_notify::dispatch::{dispatch, notify};
use sms_notify::{NotifyConfig, NotifyError, Stage};
use sms_core::{ProviderException, SendRequest, SendResponse, SmsClient, SmsError};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Call {
    to: String,
    from: String,
    text: String,
    media_url: Option<String>,
    status_callback: Option<String>,
}

enum Outcome {
    Transport,
    Exception(ProviderException),
}

/// Records every send and fails for the configured destination.
#[derive(Default)]
struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    fail_for: Option<(String, fn() -> Outcome)>,
}

impl RecordingClient {
    fn failing_for(to: &str, outcome: fn() -> Outcome) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_for: Some((to.to_string(), outcome)),
        }
    }

    fn destinations(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.to.clone()).collect()
    }
}

#[async_trait]
impl SmsClient for RecordingClient {
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        self.calls.lock().unwrap().push(Call {
            to: req.to.to_string(),
            from: req.from.to_string(),
            text: req.text.to_string(),
            media_url: req.media_url.map(str::to_string),
            status_callback: req.status_callback.map(str::to_string),
        });

        if let Some((to, outcome)) = &self.fail_for {
            if to == req.to {
                return Err(match outcome() {
                    Outcome::Transport => SmsError::Transport("connection reset".into()),
                    Outcome::Exception(exc) => SmsError::Provider(exc),
                });
            }
        }

        Ok(SendResponse {
            id: format!("SM-{}", req.to),
            provider: "recording",
            raw: serde_json::Value::Null,
        })
    }
}

fn subscribers(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn invalid_number() -> Outcome {
    Outcome::Exception(ProviderException {
        code: 21211,
        status: 400,
        message: "The 'To' number +200 is not a valid phone number.".into(),
        more_info: "https://www.twilio.com/docs/errors/21211".into(),
    })
}

#[tokio::test]
async fn sends_once_per_subscriber_in_order() {
    let client = RecordingClient::default();
    let subs = subscribers(&["+300", "+100", "+200"]);

    let sent = dispatch(&client, &subs, "+999", "hi").await.unwrap();

    assert_eq!(sent, 3);
    assert_eq!(client.destinations(), subs);
    for call in client.calls.lock().unwrap().iter() {
        assert_eq!(call.from, "+999");
        assert_eq!(call.text, "hi");
        assert_eq!(call.media_url, None);
        assert_eq!(call.status_callback, None);
    }
}

#[tokio::test]
async fn provider_exception_aborts_with_all_fields() {
    let client = RecordingClient::failing_for("+200", invalid_number);
    let subs = subscribers(&["+100", "+200"]);

    let err = dispatch(&client, &subs, "+999", "hi").await.unwrap_err();

    assert_eq!(client.destinations(), vec!["+100", "+200"]);
    assert_eq!(err.stage(), Stage::SendSms);
    match err {
        NotifyError::SendProvider { to, exception } => {
            assert_eq!(to, "+200");
            assert_eq!(exception.code, 21211);
            assert_eq!(exception.status, 400);
            assert_eq!(exception.message, "The 'To' number +200 is not a valid phone number.");
            assert_eq!(exception.more_info, "https://www.twilio.com/docs/errors/21211");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_stops_remaining_sends() {
    let client = RecordingClient::failing_for("+100", || Outcome::Transport);
    let subs = subscribers(&["+100", "+200", "+300"]);

    let err = dispatch(&client, &subs, "+999", "hi").await.unwrap_err();

    assert_eq!(client.destinations(), vec!["+100"]);
    assert!(matches!(
        err,
        NotifyError::SendTransport { ref to, source: SmsError::Transport(_) } if to == "+100"
    ));
}

#[tokio::test]
async fn notify_uses_config_fields() {
    let client = RecordingClient::default();
    let config = NotifyConfig {
        account_sid: "ACtest".into(),
        auth_token: "secret".into(),
        subscribers: subscribers(&["+100", "+200"]),
        notification_text: "deploy finished".into(),
        number: "+999".into(),
    };

    assert_eq!(notify(&client, &config).await.unwrap(), 2);
    let calls = client.calls.lock().unwrap();
    assert_eq!(calls[0].from, "+999");
    assert_eq!(calls[1].text, "deploy finished");
}
