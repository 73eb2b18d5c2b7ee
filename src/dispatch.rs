//! Sequential fan-out of the notification to every subscriber.

use crate::config::NotifyConfig;
use crate::error::NotifyError;
use sms_core::{SendRequest, SmsClient, SmsError};
use tracing::{debug, info};

/// Send `text` from `from` to each subscriber in order, one call at a time.
///
/// The first failed send aborts the run; messages already sent are not
/// rolled back. Returns the number of messages sent.
pub async fn dispatch<C>(
    client: &C,
    subscribers: &[String],
    from: &str,
    text: &str,
) -> Result<usize, NotifyError>
where
    C: SmsClient + ?Sized,
{
    for to in subscribers {
        info!(to = %to, from = %from, body = ?text, "sending notification");

        match client.send(SendRequest::new(to, from, text)).await {
            Ok(res) => debug!(to = %to, id = %res.id, provider = res.provider, "notification accepted"),
            Err(SmsError::Provider(exception)) => {
                return Err(NotifyError::SendProvider {
                    to: to.clone(),
                    exception,
                });
            }
            Err(source) => {
                return Err(NotifyError::SendTransport {
                    to: to.clone(),
                    source,
                });
            }
        }
    }
    Ok(subscribers.len())
}

/// [`dispatch`] driven by a resolved configuration.
pub async fn notify<C>(client: &C, config: &NotifyConfig) -> Result<usize, NotifyError>
where
    C: SmsClient + ?Sized,
{
    dispatch(
        client,
        &config.subscribers,
        &config.number,
        &config.notification_text,
    )
    .await
}
