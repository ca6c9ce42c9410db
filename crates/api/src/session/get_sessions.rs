use super::SessionFilter;
use crate::{error::SchedulingError, shared::usecase::UseCase};
use tutor_scheduler_domain::Session;
use tutor_scheduler_infra::SchedulerContext;

/// Lists the stored `Session`s of a tutor or a subject
#[derive(Debug)]
pub struct GetSessionsUseCase {
    pub filter: SessionFilter,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {}

impl From<UseCaseError> for SchedulingError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait]
impl UseCase for GetSessionsUseCase {
    type Response = Vec<Session>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSessions";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let mut sessions = self.filter.find(ctx).await;
        sessions.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(sessions)
    }
}
