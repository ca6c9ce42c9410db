use super::{ISessionRepo, SessionWrite};
use chrono::{NaiveDate, NaiveTime};
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, Transaction};
use std::convert::TryFrom;
use tracing::{error, warn};
use tutor_scheduler_domain::{
    find_conflict, InvalidRecurrenceError, Recurrence, Session, ID,
};

pub struct PostgresSessionRepo {
    pool: PgPool,
}

impl PostgresSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRaw {
    session_uid: Uuid,
    owner_uid: Uuid,
    subject_uid: Uuid,
    start_time: NaiveTime,
    duration_minutes: i64,
    week_number: i16,
    session_date: Option<NaiveDate>,
    anchor_date: NaiveDate,
    created: i64,
    updated: i64,
}

impl TryFrom<SessionRaw> for Session {
    type Error = InvalidRecurrenceError;

    fn try_from(raw: SessionRaw) -> Result<Self, Self::Error> {
        let recurrence = Recurrence::from_week_number(raw.week_number, raw.session_date)?;
        Session::restore(
            raw.session_uid.into(),
            raw.owner_uid.into(),
            raw.subject_uid.into(),
            raw.start_time,
            raw.duration_minutes,
            recurrence,
            Some(raw.anchor_date),
            raw.created,
            raw.updated,
        )
    }
}

fn session_date(session: &Session) -> Option<NaiveDate> {
    match session.recurrence {
        Recurrence::OneTime(date) => Some(date),
        _ => None,
    }
}

fn into_sessions(rows: Vec<SessionRaw>) -> Vec<Session> {
    rows.into_iter()
        .filter_map(|raw| {
            let session_uid = raw.session_uid;
            match Session::try_from(raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!("Skipping stored session {} : {}", session_uid, e);
                    None
                }
            }
        })
        .collect()
}

/// Takes the owner scoped write lock for the rest of the transaction and
/// returns the sessions of the owner as seen under that lock
async fn lock_owner(
    tx: &mut Transaction<'_, Postgres>,
    owner_id: &ID,
) -> anyhow::Result<Vec<Session>> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::uuid::text))")
        .bind(owner_id.inner_ref())
        .execute(&mut **tx)
        .await?;

    let rows: Vec<SessionRaw> = sqlx::query_as(
        r#"
        SELECT * FROM sessions AS s
        WHERE s.owner_uid = $1
        "#,
    )
    .bind(owner_id.inner_ref())
    .fetch_all(&mut **tx)
    .await?;

    Ok(into_sessions(rows))
}

#[async_trait::async_trait]
impl ISessionRepo for PostgresSessionRepo {
    async fn insert_exclusive(&self, session: &Session) -> anyhow::Result<SessionWrite> {
        let mut tx = self.pool.begin().await?;
        let owned = lock_owner(&mut tx, &session.owner_id).await?;
        if let Some(conflict) = find_conflict(session, &owned) {
            tx.rollback().await?;
            return Ok(SessionWrite::Conflict(conflict.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO sessions
            (session_uid, owner_uid, subject_uid, start_time, duration_minutes, week_number, session_date, anchor_date, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(session.id.inner_ref())
        .bind(session.owner_id.inner_ref())
        .bind(session.subject_id.inner_ref())
        .bind(session.start_time)
        .bind(session.duration.minutes())
        .bind(session.recurrence.week_number())
        .bind(session_date(session))
        .bind(session.anchor_date())
        .bind(session.created)
        .bind(session.updated)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(SessionWrite::Written)
    }

    async fn save_exclusive(&self, session: &Session) -> anyhow::Result<SessionWrite> {
        let mut tx = self.pool.begin().await?;
        let owned = lock_owner(&mut tx, &session.owner_id).await?;
        if let Some(conflict) = find_conflict(session, &owned) {
            tx.rollback().await?;
            return Ok(SessionWrite::Conflict(conflict.clone()));
        }

        let rows_affected = sqlx::query(
            r#"
            UPDATE sessions
            SET subject_uid = $2,
            start_time = $3,
            duration_minutes = $4,
            week_number = $5,
            session_date = $6,
            anchor_date = $7,
            updated = $8
            WHERE session_uid = $1
            "#,
        )
        .bind(session.id.inner_ref())
        .bind(session.subject_id.inner_ref())
        .bind(session.start_time)
        .bind(session.duration.minutes())
        .bind(session.recurrence.week_number())
        .bind(session_date(session))
        .bind(session.anchor_date())
        .bind(session.updated)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        if rows_affected == 0 {
            return Ok(SessionWrite::NotFound);
        }
        Ok(SessionWrite::Written)
    }

    async fn find(&self, session_id: &ID) -> Option<Session> {
        let raw: SessionRaw = match sqlx::query_as(
            r#"
            SELECT * FROM sessions AS s
            WHERE s.session_uid = $1
            "#,
        )
        .bind(session_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(s) => s,
            Err(_) => return None,
        };
        into_sessions(vec![raw]).pop()
    }

    async fn find_by_owner(&self, owner_id: &ID) -> Vec<Session> {
        let rows: Vec<SessionRaw> = sqlx::query_as(
            r#"
            SELECT * FROM sessions AS s
            WHERE s.owner_uid = $1
            "#,
        )
        .bind(owner_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to query sessions of owner {} : {:?}", owner_id, e);
            vec![]
        });
        into_sessions(rows)
    }

    async fn find_by_subject(&self, subject_id: &ID) -> Vec<Session> {
        let rows: Vec<SessionRaw> = sqlx::query_as(
            r#"
            SELECT * FROM sessions AS s
            WHERE s.subject_uid = $1
            "#,
        )
        .bind(subject_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to query sessions of subject {} : {:?}", subject_id, e);
            vec![]
        });
        into_sessions(rows)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Session>> {
        let rows: Vec<SessionRaw> = sqlx::query_as("SELECT * FROM sessions")
            .fetch_all(&self.pool)
            .await?;
        Ok(into_sessions(rows))
    }

    async fn delete(&self, session_id: &ID) -> Option<Session> {
        let raw: SessionRaw = match sqlx::query_as(
            r#"
            DELETE FROM sessions AS s
            WHERE s.session_uid = $1
            RETURNING *
            "#,
        )
        .bind(session_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(s) => s,
            Err(_) => return None,
        };
        into_sessions(vec![raw]).pop()
    }
}
