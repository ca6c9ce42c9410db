use super::{check_references, UnknownReference};
use crate::{error::SchedulingError, shared::usecase::UseCase};
use chrono::{NaiveDate, NaiveTime};
use tutor_scheduler_domain::{InvalidRecurrenceError, Recurrence, Session, SessionParams, ID};
use tutor_scheduler_infra::{SchedulerContext, SessionWrite};

/// A `Session` as proposed by a tutor, before it is validated and stored
#[derive(Debug, Clone)]
pub struct SessionCandidate {
    pub owner_id: ID,
    pub subject_id: ID,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub recurrence: Recurrence,
    /// Required for weekly and daily sessions
    pub anchor_date: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct CreateSessionUseCase {
    pub candidate: SessionCandidate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidRecurrence(InvalidRecurrenceError),
    UnknownTutor(ID),
    UnknownSubject(ID),
    Conflict(ID),
    StorageError,
}

impl From<UnknownReference> for UseCaseError {
    fn from(e: UnknownReference) -> Self {
        match e {
            UnknownReference::Tutor(id) => Self::UnknownTutor(id),
            UnknownReference::Subject(id) => Self::UnknownSubject(id),
        }
    }
}

impl From<UseCaseError> for SchedulingError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidRecurrence(e) => Self::InvalidRecurrence(e),
            UseCaseError::UnknownTutor(id) => Self::UnknownTutor(id),
            UseCaseError::UnknownSubject(id) => Self::UnknownSubject(id),
            UseCaseError::Conflict(id) => Self::Conflict(id),
            UseCaseError::StorageError => Self::Storage,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CreateSessionUseCase {
    type Response = Session;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSession";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let candidate = self.candidate.clone();
        let session = Session::new(SessionParams {
            owner_id: candidate.owner_id,
            subject_id: candidate.subject_id,
            start_time: candidate.start_time,
            duration_minutes: candidate.duration_minutes,
            recurrence: candidate.recurrence,
            anchor_date: candidate.anchor_date,
            timestamp: ctx.sys.get_timestamp_millis(),
        })
        .map_err(UseCaseError::InvalidRecurrence)?;

        check_references(&session.owner_id, &session.subject_id, ctx).await?;

        match ctx.repos.sessions.insert_exclusive(&session).await {
            Ok(SessionWrite::Written) => Ok(session),
            Ok(SessionWrite::Conflict(existing)) => Err(UseCaseError::Conflict(existing.id)),
            // Only returned when saving
            Ok(SessionWrite::NotFound) | Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
