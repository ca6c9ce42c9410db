mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;
use tutor_scheduler_domain::{NotificationKey, NotificationRecord, ID};

/// Outcome of inserting into the notification ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerInsert {
    Inserted,
    /// A record with the same key was already stored, e.g. by an
    /// overlapping sweep. This is not an error.
    AlreadyExists,
}

/// The ledger of occurrences whose participants have been notified.
/// Stores at most one `NotificationRecord` per `NotificationKey`.
#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, record: &NotificationRecord) -> anyhow::Result<LedgerInsert>;
    async fn exists(&self, key: &NotificationKey) -> anyhow::Result<bool>;
    async fn find_by_session(&self, session_id: &ID) -> Vec<NotificationRecord>;
    /// Deletes every record fired before the timestamp `before`
    async fn delete_fired_before(&self, before: i64) -> anyhow::Result<DeleteResult>;
    async fn delete_by_session(&self, session_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::prelude::*;

    fn key(session_id: &ID, hour: u32) -> NotificationKey {
        NotificationKey {
            session_id: session_id.clone(),
            occurrence_date: NaiveDate::from_ymd_opt(2025, 10, 14).unwrap(),
            occurrence_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn enforces_unique_keys() {
        let repo = InMemoryNotificationRepo::new();
        let session_id = ID::default();
        let record = NotificationRecord::new(key(&session_id, 14), 100);

        assert!(!repo.exists(&record.key()).await.unwrap());
        assert_eq!(repo.insert(&record).await.unwrap(), LedgerInsert::Inserted);
        assert!(repo.exists(&record.key()).await.unwrap());

        let duplicate = NotificationRecord::new(key(&session_id, 14), 200);
        assert_eq!(
            repo.insert(&duplicate).await.unwrap(),
            LedgerInsert::AlreadyExists
        );
        let stored = repo.find_by_session(&session_id).await;
        assert_eq!(stored, vec![record]);

        // Another occurrence of the same session is a different key
        let next = NotificationRecord::new(key(&session_id, 15), 200);
        assert_eq!(repo.insert(&next).await.unwrap(), LedgerInsert::Inserted);
    }

    #[tokio::test]
    async fn deletes_old_records() {
        let repo = InMemoryNotificationRepo::new();
        let session_id = ID::default();
        repo.insert(&NotificationRecord::new(key(&session_id, 8), 100))
            .await
            .unwrap();
        repo.insert(&NotificationRecord::new(key(&session_id, 9), 200))
            .await
            .unwrap();
        repo.insert(&NotificationRecord::new(key(&ID::default(), 9), 300))
            .await
            .unwrap();

        let res = repo.delete_fired_before(200).await.unwrap();
        assert_eq!(res.deleted_count, 1);
        assert!(!repo.exists(&key(&session_id, 8)).await.unwrap());
        assert!(repo.exists(&key(&session_id, 9)).await.unwrap());

        let res = repo.delete_by_session(&session_id).await.unwrap();
        assert_eq!(res.deleted_count, 1);
        assert!(repo.find_by_session(&session_id).await.is_empty());
    }
}
