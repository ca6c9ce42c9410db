mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    DeleteResult, INotificationRepo, ISessionRepo, ISubjectRepo, ITutorRepo, LedgerInsert,
    Repos, SessionWrite,
};
pub use services::*;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::info;

#[derive(Clone)]
pub struct SchedulerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

fn create_notifier(config: &Config) -> Arc<dyn INotifier> {
    match &config.notification_webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
        None => Arc::new(LogNotifier {}),
    }
}

impl SchedulerContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(connection_string) => Repos::create_postgres(connection_string).await?,
            None => {
                info!("Did not find DATABASE_URL environment variable. Using in-memory storage.");
                Repos::create_inmemory()
            }
        };
        Ok(Self {
            repos,
            notifier: create_notifier(&config),
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// Context backed by in-memory repositories, mostly useful for testing.
    /// The clock and the notifier can be swapped out afterwards.
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        Self {
            repos: Repos::create_inmemory(),
            notifier: create_notifier(&config),
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<SchedulerContext> {
    SchedulerContext::create(Config::new()).await
}

pub async fn run_migration(connection_string: &str) -> anyhow::Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    Ok(())
}
