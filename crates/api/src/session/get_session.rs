use crate::{error::SchedulingError, shared::usecase::UseCase};
use tutor_scheduler_domain::{Session, ID};
use tutor_scheduler_infra::SchedulerContext;

#[derive(Debug)]
pub struct GetSessionUseCase {
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
impl UseCase for GetSessionUseCase {
    type Response = Session;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSession";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.sessions.find(&self.session_id).await {
            Some(session) => Ok(session),
            None => Err(UseCaseError::NotFound(self.session_id.clone())),
        }
    }
}
