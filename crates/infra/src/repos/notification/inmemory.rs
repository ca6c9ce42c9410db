use super::{INotificationRepo, LedgerInsert};
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use tutor_scheduler_domain::{NotificationKey, NotificationRecord, ID};

pub struct InMemoryNotificationRepo {
    records: std::sync::Mutex<Vec<NotificationRecord>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryNotificationRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, record: &NotificationRecord) -> anyhow::Result<LedgerInsert> {
        let mut records = lock(&self.records);
        let key = record.key();
        if records.iter().any(|r| r.key() == key) {
            return Ok(LedgerInsert::AlreadyExists);
        }
        records.push(record.clone());
        Ok(LedgerInsert::Inserted)
    }

    async fn exists(&self, key: &NotificationKey) -> anyhow::Result<bool> {
        Ok(!find_by(&self.records, |r| r.key() == *key).is_empty())
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<NotificationRecord> {
        find_by(&self.records, |r| r.session_id == *session_id)
    }

    async fn delete_fired_before(&self, before: i64) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.records, |r| r.fired_at < before))
    }

    async fn delete_by_session(&self, session_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.records, |r| r.session_id == *session_id))
    }
}
