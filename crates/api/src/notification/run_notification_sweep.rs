use crate::{error::SchedulingError, shared::usecase::UseCase};
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use tracing::{debug, error, info};
use tutor_scheduler_domain::{
    imminent_occurrences, NotificationKey, NotificationRecord, SessionOccurrence, Subject, ID,
};
use tutor_scheduler_infra::{LedgerInsert, SchedulerContext, SessionNotification};

/// Notifies the participants of every occurrence starting within the
/// configured lead time from `now`, at most once per occurrence.
///
/// The ledger record is written after the notifier succeeded. A failed
/// delivery leaves no record behind and is retried by the next sweep.
#[derive(Debug)]
pub struct RunNotificationSweepUseCase {
    pub now: NaiveDateTime,
}

/// What happened to the imminent occurrences of a sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub notified: usize,
    pub already_notified: usize,
    pub failed: usize,
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

enum Outcome {
    Notified,
    AlreadyNotified,
    Failed,
}

#[async_trait::async_trait]
impl UseCase for RunNotificationSweepUseCase {
    type Response = SweepReport;

    type Error = UseCaseError;

    const NAME: &'static str = "RunNotificationSweep";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let sessions = ctx
            .repos
            .sessions
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let lead = Duration::minutes(ctx.config.notification_lead_minutes);
        let imminent = imminent_occurrences(sessions, self.now, lead);
        if imminent.is_empty() {
            return Ok(SweepReport::default());
        }

        let subjects = find_subjects(&imminent, ctx).await;

        let mut report = SweepReport::default();
        for occurrence in &imminent {
            match sweep_occurrence(occurrence, &subjects, ctx).await {
                Outcome::Notified => report.notified += 1,
                Outcome::AlreadyNotified => report.already_notified += 1,
                Outcome::Failed => report.failed += 1,
            }
        }
        info!(
            "Notification sweep at {} : {} notified, {} already notified, {} failed",
            self.now, report.notified, report.already_notified, report.failed
        );

        Ok(report)
    }
}

async fn find_subjects(
    imminent: &[SessionOccurrence],
    ctx: &SchedulerContext,
) -> HashMap<ID, Subject> {
    let mut subject_ids = imminent
        .iter()
        .map(|o| o.session.subject_id.clone())
        .collect::<Vec<_>>();
    subject_ids.sort();
    subject_ids.dedup();

    match ctx.repos.subjects.find_many(&subject_ids).await {
        Ok(subjects) => subjects.into_iter().map(|s| (s.id.clone(), s)).collect(),
        Err(e) => {
            error!("Unable to look up the subjects of imminent sessions: {:?}", e);
            HashMap::new()
        }
    }
}

/// Failures are isolated to the occurrence they happened for
async fn sweep_occurrence(
    occurrence: &SessionOccurrence,
    subjects: &HashMap<ID, Subject>,
    ctx: &SchedulerContext,
) -> Outcome {
    let key = NotificationKey::from(occurrence);
    let session = &occurrence.session;

    match ctx.repos.notifications.exists(&key).await {
        Ok(true) => {
            debug!(
                "Session {} at {} was already notified",
                session.id,
                occurrence.occurrence.starts_at()
            );
            return Outcome::AlreadyNotified;
        }
        Ok(false) => (),
        Err(e) => {
            error!("Unable to read the notification ledger: {:?}", e);
            return Outcome::Failed;
        }
    }

    let subject = match subjects.get(&session.subject_id) {
        Some(subject) => subject,
        None => {
            error!(
                "Subject {} of session {} was not found, not notifying",
                session.subject_id, session.id
            );
            return Outcome::Failed;
        }
    };

    let notification = SessionNotification {
        session_id: session.id.clone(),
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        occurrence_date: occurrence.occurrence.date,
        occurrence_time: occurrence.occurrence.time,
        recipients: subject.recipients.clone(),
    };
    if let Err(e) = ctx.notifier.notify(&notification).await {
        error!(
            "Unable to notify participants of session {} at {} : {}",
            session.id,
            occurrence.occurrence.starts_at(),
            e
        );
        return Outcome::Failed;
    }

    let record = NotificationRecord::new(key, ctx.sys.get_timestamp_millis());
    match ctx.repos.notifications.insert(&record).await {
        Ok(LedgerInsert::Inserted) => {
            info!(
                "Notified participants of session {} at {}",
                session.id,
                occurrence.occurrence.starts_at()
            );
            Outcome::Notified
        }
        Ok(LedgerInsert::AlreadyExists) => {
            debug!(
                "Session {} at {} was notified by a concurrent sweep",
                session.id,
                occurrence.occurrence.starts_at()
            );
            Outcome::AlreadyNotified
        }
        Err(e) => {
            error!(
                "Notified session {} at {} but unable to record it : {:?}",
                session.id,
                occurrence.occurrence.starts_at(),
                e
            );
            Outcome::Failed
        }
    }
}
