use super::{INotifier, NotificationDeliveryError, SessionNotification};
use reqwest::Client;
use tracing::error;

/// Posts every `SessionNotification` as json to a webhook, typically the
/// mail service of the application
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn notify(
        &self,
        notification: &SessionNotification,
    ) -> Result<(), NotificationDeliveryError> {
        let res = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .map_err(|e| {
                error!("Error posting session notification: {:?}", e);
                NotificationDeliveryError::Transport(e.to_string())
            })?;

        if !res.status().is_success() {
            return Err(NotificationDeliveryError::Rejected(res.status().as_u16()));
        }
        Ok(())
    }
}
