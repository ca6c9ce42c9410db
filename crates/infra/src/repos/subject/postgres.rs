use super::ISubjectRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tutor_scheduler_domain::{Subject, ID};

pub struct PostgresSubjectRepo {
    pool: PgPool,
}

impl PostgresSubjectRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubjectRaw {
    subject_uid: Uuid,
    tutor_uid: Uuid,
    name: String,
    recipients: Vec<String>,
}

impl From<SubjectRaw> for Subject {
    fn from(raw: SubjectRaw) -> Self {
        Self {
            id: raw.subject_uid.into(),
            tutor_id: raw.tutor_uid.into(),
            name: raw.name,
            recipients: raw.recipients,
        }
    }
}

const SELECT_SUBJECTS: &str = r#"
    SELECT s.subject_uid, s.tutor_uid, s.name,
        COALESCE(
            ARRAY_AGG(r.email) FILTER (WHERE r.email IS NOT NULL),
            ARRAY[]::TEXT[]
        ) AS recipients
    FROM subjects AS s
    LEFT JOIN subject_recipients AS r
        ON r.subject_uid = s.subject_uid
    WHERE s.subject_uid = ANY($1)
    GROUP BY s.subject_uid
"#;

#[async_trait::async_trait]
impl ISubjectRepo for PostgresSubjectRepo {
    async fn insert(&self, subject: &Subject) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO subjects(subject_uid, tutor_uid, name)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(subject.id.inner_ref())
        .bind(subject.tutor_id.inner_ref())
        .bind(&subject.name)
        .execute(&mut *tx)
        .await?;

        for email in &subject.recipients {
            sqlx::query(
                r#"
                INSERT INTO subject_recipients(subject_uid, email)
                VALUES($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(subject.id.inner_ref())
            .bind(email)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, subject_id: &ID) -> Option<Subject> {
        self.find_many(&[subject_id.clone()]).await.ok()?.pop()
    }

    async fn find_many(&self, subject_ids: &[ID]) -> anyhow::Result<Vec<Subject>> {
        let ids = subject_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let subjects = sqlx::query_as::<_, SubjectRaw>(SELECT_SUBJECTS)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|s| s.into())
            .collect();
        Ok(subjects)
    }
}
