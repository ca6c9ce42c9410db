mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use tracing::info;
use tutor_scheduler_api::JobSchedulers;
use tutor_scheduler_infra::{run_migration, setup_context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("tutor_scheduler".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await?;
    if let Some(connection_string) = &context.config.database_url {
        run_migration(connection_string).await?;
    }

    let jobs = JobSchedulers::start(context);
    info!("Job schedulers started");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down, waiting for running jobs to complete ...");
    jobs.shutdown().await;
    info!("Shutting down ... [done]");

    Ok(())
}
