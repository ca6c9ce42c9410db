use crate::{error::SchedulingError, shared::usecase::UseCase};
use tracing::info;
use tutor_scheduler_infra::SchedulerContext;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Deletes the `NotificationRecord`s fired more than the retention
/// horizon before `now`, a timestamp in millis
#[derive(Debug)]
pub struct PurgeNotificationRecordsUseCase {
    pub now: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for SchedulingError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::Storage,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for PurgeNotificationRecordsUseCase {
    /// Number of deleted records
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "PurgeNotificationRecords";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let horizon = ctx
            .config
            .notification_retention_days
            .saturating_mul(MILLIS_PER_DAY);
        let before = self.now.saturating_sub(horizon);

        let res = ctx
            .repos
            .notifications
            .delete_fired_before(before)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!(
            "Purged {} notification records fired before {}",
            res.deleted_count, before
        );
        Ok(res.deleted_count)
    }
}
