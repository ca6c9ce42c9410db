mod log;
mod webhook;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;
use tutor_scheduler_domain::ID;

pub use self::log::LogNotifier;
pub use webhook::WebhookNotifier;

/// Everything the participants of an upcoming `Session` occurrence are told
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNotification {
    pub session_id: ID,
    pub subject_id: ID,
    pub subject_name: String,
    pub occurrence_date: NaiveDate,
    pub occurrence_time: NaiveTime,
    pub recipients: Vec<String>,
}

#[derive(Error, Debug)]
pub enum NotificationDeliveryError {
    #[error("Unable to reach the notification endpoint: {0}")]
    Transport(String),
    #[error("The notification endpoint rejected the notification with status: {0}")]
    Rejected(u16),
}

/// Delivers notifications to the participants of a `Session`.
/// Delivery is attempted once, retrying is up to the caller.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn notify(&self, notification: &SessionNotification)
        -> Result<(), NotificationDeliveryError>;
}
