use crate::{
    error::SchedulingError,
    shared::usecase::{Subscriber, UseCase},
};
use tracing::error;
use tutor_scheduler_domain::{Session, ID};
use tutor_scheduler_infra::SchedulerContext;

#[derive(Debug)]
pub struct DeleteSessionUseCase {
    pub session_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for SchedulingError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(id),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DeleteSessionUseCase {
    type Response = Session;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSession";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .sessions
            .delete(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.session_id.clone()))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(DeleteNotificationRecordsOnSessionDeleted)]
    }
}

/// The ledger has no use for records of a deleted `Session`
pub struct DeleteNotificationRecordsOnSessionDeleted;

#[async_trait::async_trait]
impl Subscriber<DeleteSessionUseCase> for DeleteNotificationRecordsOnSessionDeleted {
    async fn notify(&self, session: &Session, ctx: &SchedulerContext) {
        if let Err(e) = ctx.repos.notifications.delete_by_session(&session.id).await {
            error!(
                "Unable to delete notification records of session {} : {:?}",
                session.id, e
            );
        }
    }
}
