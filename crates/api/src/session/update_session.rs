use super::{check_references, UnknownReference};
use crate::{error::SchedulingError, shared::usecase::UseCase};
use tutor_scheduler_domain::{InvalidRecurrenceError, Session, SessionPatch, ID};
use tutor_scheduler_infra::{SchedulerContext, SessionWrite};

#[derive(Debug)]
pub struct UpdateSessionUseCase {
    pub session_id: ID,
    pub patch: SessionPatch,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidRecurrence(InvalidRecurrenceError),
    UnknownSubject(ID),
    Conflict(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulingError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(id),
            UseCaseError::InvalidRecurrence(e) => Self::InvalidRecurrence(e),
            UseCaseError::UnknownSubject(id) => Self::UnknownSubject(id),
            UseCaseError::Conflict(id) => Self::Conflict(id),
            UseCaseError::StorageError => Self::Storage,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for UpdateSessionUseCase {
    type Response = Session;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSession";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let session = match ctx.repos.sessions.find(&self.session_id).await {
            Some(session) => session,
            None => return Err(UseCaseError::NotFound(self.session_id.clone())),
        };

        let updated = session
            .apply(&self.patch, ctx.sys.get_timestamp_millis())
            .map_err(UseCaseError::InvalidRecurrence)?;

        if self.patch.subject_id.is_some() {
            check_references(&updated.owner_id, &updated.subject_id, ctx)
                .await
                .map_err(|e| match e {
                    UnknownReference::Subject(id) => UseCaseError::UnknownSubject(id),
                    // The owner of a stored session is never changed
                    UnknownReference::Tutor(_) => UseCaseError::NotFound(session.id.clone()),
                })?;
        }

        match ctx.repos.sessions.save_exclusive(&updated).await {
            Ok(SessionWrite::Written) => Ok(updated),
            Ok(SessionWrite::Conflict(existing)) => Err(UseCaseError::Conflict(existing.id)),
            Ok(SessionWrite::NotFound) => Err(UseCaseError::NotFound(updated.id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::session::test_helpers::*;
    use chrono::Weekday;
    use std::sync::Arc;
    use tutor_scheduler_domain::{Recurrence, SessionParams};
    use tutor_scheduler_infra::ISessionRepo;

    async fn insert(t: &TestContext, hour: u32, recurrence: Recurrence) -> Session {
        let session = Session::new(SessionParams {
            owner_id: t.tutor.id.clone(),
            subject_id: t.subject.id.clone(),
            start_time: time(hour, 0),
            duration_minutes: 60,
            recurrence,
            anchor_date: Some(date(2025, 10, 7)),
            timestamp: 0,
        })
        .unwrap();
        t.ctx.repos.sessions.insert_exclusive(&session).await.unwrap();
        session
    }

    #[tokio::test]
    async fn updates_session() {
        let t = setup().await;
        let session = insert(&t, 14, Recurrence::Weekly(Weekday::Tue)).await;

        let mut usecase = UpdateSessionUseCase {
            session_id: session.id.clone(),
            patch: SessionPatch {
                start_time: Some(time(14, 30)),
                ..Default::default()
            },
        };
        let updated = usecase.execute(&t.ctx).await.unwrap();
        assert_eq!(updated.start_time, time(14, 30));
        assert_eq!(updated.created, 0);
        assert_eq!(updated.updated, 1759276800000);
        assert_eq!(t.ctx.repos.sessions.find(&session.id).await, Some(updated));
    }

    #[tokio::test]
    async fn rejects_update_into_other_session() {
        let t = setup().await;
        let session = insert(&t, 10, Recurrence::Weekly(Weekday::Tue)).await;
        let daily = insert(&t, 14, Recurrence::Daily).await;

        let mut usecase = UpdateSessionUseCase {
            session_id: session.id.clone(),
            patch: SessionPatch {
                start_time: Some(time(13, 30)),
                ..Default::default()
            },
        };
        assert_eq!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::Conflict(daily.id))
        );
        assert_eq!(t.ctx.repos.sessions.find(&session.id).await, Some(session));
    }

    #[tokio::test]
    async fn rejects_missing_session_and_subject() {
        let t = setup().await;
        let missing = ID::default();
        let mut usecase = UpdateSessionUseCase {
            session_id: missing.clone(),
            patch: Default::default(),
        };
        assert_eq!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::NotFound(missing.clone()))
        );

        let session = insert(&t, 10, Recurrence::Daily).await;
        let mut usecase = UpdateSessionUseCase {
            session_id: session.id,
            patch: SessionPatch {
                subject_id: Some(missing.clone()),
                ..Default::default()
            },
        };
        assert_eq!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::UnknownSubject(missing))
        );
    }

    /// Loses every session right after it has been read, like a delete
    /// landing between the lookup and the write of an update
    struct VanishingSessionRepo {
        inner: Arc<dyn ISessionRepo>,
    }

    #[async_trait::async_trait]
    impl ISessionRepo for VanishingSessionRepo {
        async fn insert_exclusive(&self, session: &Session) -> anyhow::Result<SessionWrite> {
            self.inner.insert_exclusive(session).await
        }
        async fn save_exclusive(&self, session: &Session) -> anyhow::Result<SessionWrite> {
            self.inner.save_exclusive(session).await
        }
        async fn find(&self, session_id: &ID) -> Option<Session> {
            let session = self.inner.find(session_id).await;
            self.inner.delete(session_id).await;
            session
        }
        async fn find_by_owner(&self, owner_id: &ID) -> Vec<Session> {
            self.inner.find_by_owner(owner_id).await
        }
        async fn find_by_subject(&self, subject_id: &ID) -> Vec<Session> {
            self.inner.find_by_subject(subject_id).await
        }
        async fn find_all(&self) -> anyhow::Result<Vec<Session>> {
            self.inner.find_all().await
        }
        async fn delete(&self, session_id: &ID) -> Option<Session> {
            self.inner.delete(session_id).await
        }
    }

    #[tokio::test]
    async fn update_of_concurrently_deleted_session_is_not_found() {
        let mut t = setup().await;
        let session = insert(&t, 10, Recurrence::Daily).await;
        t.ctx.repos.sessions = Arc::new(VanishingSessionRepo {
            inner: t.ctx.repos.sessions.clone(),
        });

        let mut usecase = UpdateSessionUseCase {
            session_id: session.id.clone(),
            patch: SessionPatch {
                start_time: Some(time(11, 0)),
                ..Default::default()
            },
        };
        assert_eq!(
            usecase.execute(&t.ctx).await,
            Err(UseCaseError::NotFound(session.id.clone()))
        );
        assert!(t.ctx.repos.sessions.find_all().await.unwrap().is_empty());
    }
}
