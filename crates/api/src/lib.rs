mod error;
mod job_schedulers;
mod notification;
mod session;
mod shared;

use chrono::NaiveDateTime;
use notification::{
    purge_notification_records::PurgeNotificationRecordsUseCase,
    run_notification_sweep::RunNotificationSweepUseCase,
};
use session::{
    create_session::CreateSessionUseCase, delete_session::DeleteSessionUseCase,
    get_session::GetSessionUseCase, get_sessions::GetSessionsUseCase,
    get_upcoming_sessions::GetUpcomingSessionsUseCase, update_session::UpdateSessionUseCase,
};
use shared::usecase::execute;
use tutor_scheduler_domain::{Session, SessionOccurrence, SessionPatch, ID};
use tutor_scheduler_infra::SchedulerContext;

pub use error::SchedulingError;
pub use job_schedulers::{
    get_start_delay, start_notification_sweep_job, start_retention_job, JobSchedulers,
};
pub use notification::run_notification_sweep::SweepReport;
pub use session::{create_session::SessionCandidate, SessionFilter};

/// Stores a new `Session` unless it clashes with another `Session` of the
/// same tutor
pub async fn create_session(
    ctx: &SchedulerContext,
    candidate: SessionCandidate,
) -> Result<Session, SchedulingError> {
    let usecase = CreateSessionUseCase { candidate };
    execute(usecase, ctx).await.map_err(SchedulingError::from)
}

pub async fn update_session(
    ctx: &SchedulerContext,
    session_id: ID,
    patch: SessionPatch,
) -> Result<Session, SchedulingError> {
    let usecase = UpdateSessionUseCase { session_id, patch };
    execute(usecase, ctx).await.map_err(SchedulingError::from)
}

pub async fn delete_session(
    ctx: &SchedulerContext,
    session_id: ID,
) -> Result<Session, SchedulingError> {
    let usecase = DeleteSessionUseCase { session_id };
    execute(usecase, ctx).await.map_err(SchedulingError::from)
}

pub async fn get_session(
    ctx: &SchedulerContext,
    session_id: ID,
) -> Result<Session, SchedulingError> {
    let usecase = GetSessionUseCase { session_id };
    execute(usecase, ctx).await.map_err(SchedulingError::from)
}

pub async fn list_sessions(
    ctx: &SchedulerContext,
    filter: SessionFilter,
) -> Result<Vec<Session>, SchedulingError> {
    let usecase = GetSessionsUseCase { filter };
    execute(usecase, ctx).await.map_err(SchedulingError::from)
}

/// The next occurrence of every `Session` of a tutor or subject, starting
/// at or after `from - lookback_minutes` and at most `lookahead_days` days
/// ahead
pub async fn upcoming_occurrences(
    ctx: &SchedulerContext,
    filter: SessionFilter,
    from: NaiveDateTime,
    lookahead_days: i64,
    lookback_minutes: i64,
) -> Result<Vec<SessionOccurrence>, SchedulingError> {
    let usecase = GetUpcomingSessionsUseCase {
        filter,
        from,
        lookahead_days,
        lookback_minutes,
    };
    execute(usecase, ctx).await.map_err(SchedulingError::from)
}

/// Runs one notification sweep for the given wall clock time in the
/// configured timezone
pub async fn run_notification_sweep(
    ctx: &SchedulerContext,
    now: NaiveDateTime,
) -> Result<SweepReport, SchedulingError> {
    let usecase = RunNotificationSweepUseCase { now };
    execute(usecase, ctx).await.map_err(SchedulingError::from)
}

/// Returns the number of purged records
pub async fn purge_notification_records(
    ctx: &SchedulerContext,
    now_millis: i64,
) -> Result<i64, SchedulingError> {
    let usecase = PurgeNotificationRecordsUseCase { now: now_millis };
    execute(usecase, ctx).await.map_err(SchedulingError::from)
}
