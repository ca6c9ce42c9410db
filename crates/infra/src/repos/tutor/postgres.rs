use super::ITutorRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tutor_scheduler_domain::{Tutor, ID};

pub struct PostgresTutorRepo {
    pool: PgPool,
}

impl PostgresTutorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TutorRaw {
    tutor_uid: Uuid,
    name: String,
    email: String,
}

impl From<TutorRaw> for Tutor {
    fn from(raw: TutorRaw) -> Self {
        Self {
            id: raw.tutor_uid.into(),
            name: raw.name,
            email: raw.email,
        }
    }
}

#[async_trait::async_trait]
impl ITutorRepo for PostgresTutorRepo {
    async fn insert(&self, tutor: &Tutor) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tutors(tutor_uid, name, email)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(tutor.id.inner_ref())
        .bind(&tutor.name)
        .bind(&tutor.email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, tutor_id: &ID) -> Option<Tutor> {
        sqlx::query_as::<_, TutorRaw>(
            r#"
            SELECT * FROM tutors AS t
            WHERE t.tutor_uid = $1
            "#,
        )
        .bind(tutor_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|t| t.into())
    }
}
