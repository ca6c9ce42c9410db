use crate::{occurrence::SessionOccurrence, shared::entity::ID};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// Natural key of a `NotificationRecord`. At most one record exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationKey {
    pub session_id: ID,
    pub occurrence_date: NaiveDate,
    pub occurrence_time: NaiveTime,
}

impl From<&SessionOccurrence> for NotificationKey {
    fn from(o: &SessionOccurrence) -> Self {
        Self {
            session_id: o.session.id.clone(),
            occurrence_date: o.occurrence.date,
            occurrence_time: o.occurrence.time,
        }
    }
}

/// A `NotificationRecord` states that the participants of a `Session`
/// occurrence have been notified. Records are never updated and are
/// deleted once older than the retention horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub session_id: ID,
    pub occurrence_date: NaiveDate,
    pub occurrence_time: NaiveTime,
    /// Timestamp in millis of when the notification was fired
    pub fired_at: i64,
}

impl NotificationRecord {
    pub fn new(key: NotificationKey, fired_at: i64) -> Self {
        Self {
            session_id: key.session_id,
            occurrence_date: key.occurrence_date,
            occurrence_time: key.occurrence_time,
            fired_at,
        }
    }

    pub fn key(&self) -> NotificationKey {
        NotificationKey {
            session_id: self.session_id.clone(),
            occurrence_date: self.occurrence_date,
            occurrence_time: self.occurrence_time,
        }
    }
}
