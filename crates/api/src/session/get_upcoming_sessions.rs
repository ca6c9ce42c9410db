use super::SessionFilter;
use crate::{error::SchedulingError, shared::usecase::UseCase};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tutor_scheduler_domain::{project_upcoming, SessionOccurrence};
use tutor_scheduler_infra::SchedulerContext;

/// Projects every `Session` matching the filter onto its next occurrence.
/// Sessions that already started less than `lookback_minutes` ago are
/// still listed.
#[derive(Debug)]
pub struct GetUpcomingSessionsUseCase {
    pub filter: SessionFilter,
    pub from: NaiveDateTime,
    pub lookahead_days: i64,
    pub lookback_minutes: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidLookahead(i64, i64),
    InvalidLookback(i64),
}

impl From<UseCaseError> for SchedulingError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidLookahead(days, limit) => Self::InvalidQuery(format!(
                "The lookahead must be between 0 and {} days, got: {}",
                limit, days
            )),
            UseCaseError::InvalidLookback(minutes) => Self::InvalidQuery(format!(
                "The lookback must be a non negative amount of minutes, got: {}",
                minutes
            )),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetUpcomingSessionsUseCase {
    type Response = Vec<SessionOccurrence>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingSessions";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let limit = ctx.config.upcoming_lookahead_days_limit;
        if self.lookahead_days < 0 || self.lookahead_days > limit {
            return Err(UseCaseError::InvalidLookahead(self.lookahead_days, limit));
        }
        if self.lookback_minutes < 0 {
            return Err(UseCaseError::InvalidLookback(self.lookback_minutes));
        }

        let from = self
            .from
            .checked_sub_signed(Duration::minutes(self.lookback_minutes))
            .unwrap_or(NaiveDateTime::MIN);
        // The lookback never shortens the lookahead
        let last_date = self
            .from
            .date()
            .checked_add_signed(Duration::days(self.lookahead_days))
            .unwrap_or(NaiveDate::MAX);
        let sessions = self.filter.find(ctx).await;

        Ok(project_upcoming(sessions, from, last_date))
    }
}
