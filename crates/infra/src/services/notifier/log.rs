use super::{INotifier, NotificationDeliveryError, SessionNotification};
use tracing::info;

/// Notifier used when no delivery endpoint is configured
pub struct LogNotifier {}

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn notify(
        &self,
        notification: &SessionNotification,
    ) -> Result<(), NotificationDeliveryError> {
        info!(
            session_id = %notification.session_id,
            subject = %notification.subject_name,
            date = %notification.occurrence_date,
            time = %notification.occurrence_time,
            recipients = notification.recipients.len(),
            "Session notification"
        );
        Ok(())
    }
}
