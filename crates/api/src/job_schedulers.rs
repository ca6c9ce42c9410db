use crate::{
    notification::{
        purge_notification_records::PurgeNotificationRecordsUseCase,
        run_notification_sweep::RunNotificationSweepUseCase,
    },
    shared::usecase::execute,
};
use std::time::Duration;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, interval_at, Instant},
};
use tracing::{error, info};
use tutor_scheduler_infra::SchedulerContext;

/// Seconds until `secs_before_min` seconds before the next whole minute
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs a notification sweep every `sweep_interval_secs`, starting at the
/// next whole minute. A running sweep is completed before the job stops.
pub fn start_notification_sweep_job(
    ctx: SchedulerContext,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_first_run = get_start_delay(now.max(0) as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_first_run as u64);
        let period = Duration::from_secs(ctx.config.sweep_interval_secs.max(1));

        let mut sweep_interval = interval_at(start, period);
        loop {
            tokio::select! {
                _ = sweep_interval.tick() => {}
                _ = shutdown.changed() => break,
            }

            let usecase = RunNotificationSweepUseCase {
                now: ctx.sys.now_in(&ctx.config.timezone),
            };
            let _ = execute(usecase, &ctx).await;
        }
        info!("Notification sweep job stopped");
    })
}

/// Purges old notification records every `retention_interval_secs`
pub fn start_retention_job(
    ctx: SchedulerContext,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(ctx.config.retention_interval_secs.max(1));
        let mut retention_interval = interval(period);
        loop {
            tokio::select! {
                _ = retention_interval.tick() => {}
                _ = shutdown.changed() => break,
            }

            let usecase = PurgeNotificationRecordsUseCase {
                now: ctx.sys.get_timestamp_millis(),
            };
            let _ = execute(usecase, &ctx).await;
        }
        info!("Notification retention job stopped");
    })
}

/// Handle to the running job schedulers
pub struct JobSchedulers {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobSchedulers {
    pub fn start(ctx: SchedulerContext) -> Self {
        let (shutdown, receiver) = watch::channel(false);
        let handles = vec![
            start_notification_sweep_job(ctx.clone(), receiver.clone()),
            start_retention_job(ctx, receiver),
        ];
        Self { shutdown, handles }
    }

    /// Stops scheduling new runs and waits for the running ones to complete
    pub async fn shutdown(self) {
        if self.shutdown.send(true).is_err() {
            error!("Job schedulers had already stopped");
        }
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Job scheduler failed: {:?}", e);
            }
        }
    }
}
