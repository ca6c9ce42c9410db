mod notification;
mod session;
mod shared;
mod subject;
mod tutor;

use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
use session::{InMemorySessionRepo, PostgresSessionRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use subject::{InMemorySubjectRepo, PostgresSubjectRepo};
use tracing::info;
use tutor::{InMemoryTutorRepo, PostgresTutorRepo};

pub use notification::{INotificationRepo, LedgerInsert};
pub use session::{ISessionRepo, SessionWrite};
pub use shared::repo::DeleteResult;
pub use subject::ISubjectRepo;
pub use tutor::ITutorRepo;

#[derive(Clone)]
pub struct Repos {
    pub sessions: Arc<dyn ISessionRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub tutors: Arc<dyn ITutorRepo>,
    pub subjects: Arc<dyn ISubjectRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            sessions: Arc::new(PostgresSessionRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            tutors: Arc::new(PostgresTutorRepo::new(pool.clone())),
            subjects: Arc::new(PostgresSubjectRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            sessions: Arc::new(InMemorySessionRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            tutors: Arc::new(InMemoryTutorRepo::new()),
            subjects: Arc::new(InMemorySubjectRepo::new()),
        }
    }
}
