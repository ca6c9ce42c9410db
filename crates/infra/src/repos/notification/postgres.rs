use super::{INotificationRepo, LedgerInsert};
use crate::repos::shared::repo::DeleteResult;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use tutor_scheduler_domain::{NotificationKey, NotificationRecord, ID};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRecordRaw {
    session_uid: Uuid,
    occurrence_date: NaiveDate,
    occurrence_time: NaiveTime,
    fired_at: i64,
}

impl From<NotificationRecordRaw> for NotificationRecord {
    fn from(raw: NotificationRecordRaw) -> Self {
        Self {
            session_id: raw.session_uid.into(),
            occurrence_date: raw.occurrence_date,
            occurrence_time: raw.occurrence_time,
            fired_at: raw.fired_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, record: &NotificationRecord) -> anyhow::Result<LedgerInsert> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO notification_records
            (session_uid, occurrence_date, occurrence_time, fired_at)
            VALUES($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(record.session_id.inner_ref())
        .bind(record.occurrence_date)
        .bind(record.occurrence_time)
        .bind(record.fired_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            Ok(LedgerInsert::AlreadyExists)
        } else {
            Ok(LedgerInsert::Inserted)
        }
    }

    async fn exists(&self, key: &NotificationKey) -> anyhow::Result<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM notification_records AS n
                WHERE n.session_uid = $1 AND n.occurrence_date = $2 AND n.occurrence_time = $3
            )
            "#,
        )
        .bind(key.session_id.inner_ref())
        .bind(key.occurrence_date)
        .bind(key.occurrence_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<NotificationRecord> {
        sqlx::query_as::<_, NotificationRecordRaw>(
            r#"
            SELECT session_uid, occurrence_date, occurrence_time, fired_at
            FROM notification_records AS n
            WHERE n.session_uid = $1
            "#,
        )
        .bind(session_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to query notification records of session {} : {:?}", session_id, e);
            vec![]
        })
        .into_iter()
        .map(|r| r.into())
        .collect()
    }

    async fn delete_fired_before(&self, before: i64) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM notification_records AS n
            WHERE n.fired_at < $1
            "#,
        )
        .bind(before)
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn delete_by_session(&self, session_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM notification_records AS n
            WHERE n.session_uid = $1
            "#,
        )
        .bind(session_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
