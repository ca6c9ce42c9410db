pub mod create_session;
pub mod delete_session;
pub mod get_session;
pub mod get_sessions;
pub mod get_upcoming_sessions;
pub mod update_session;

use tutor_scheduler_domain::ID;
use tutor_scheduler_infra::SchedulerContext;

/// Selects the `Session`s of a tutor or of a subject
#[derive(Debug, Clone, PartialEq)]
pub enum SessionFilter {
    Owner(ID),
    Subject(ID),
}

impl SessionFilter {
    async fn find(&self, ctx: &SchedulerContext) -> Vec<tutor_scheduler_domain::Session> {
        match self {
            Self::Owner(owner_id) => ctx.repos.sessions.find_by_owner(owner_id).await,
            Self::Subject(subject_id) => ctx.repos.sessions.find_by_subject(subject_id).await,
        }
    }
}

#[derive(Debug, PartialEq)]
enum UnknownReference {
    Tutor(ID),
    Subject(ID),
}

/// Checks that the tutor and the subject referenced by a `Session` exist
async fn check_references(
    owner_id: &ID,
    subject_id: &ID,
    ctx: &SchedulerContext,
) -> Result<(), UnknownReference> {
    if ctx.repos.tutors.find(owner_id).await.is_none() {
        return Err(UnknownReference::Tutor(owner_id.clone()));
    }
    if ctx.repos.subjects.find(subject_id).await.is_none() {
        return Err(UnknownReference::Subject(subject_id.clone()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use chrono::prelude::*;
    use std::sync::Arc;
    use tutor_scheduler_domain::{Subject, Tutor};
    use tutor_scheduler_infra::{ISys, SchedulerContext};

    pub struct StaticTimeSys(pub i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    pub struct TestContext {
        pub ctx: SchedulerContext,
        pub tutor: Tutor,
        pub subject: Subject,
    }

    pub async fn setup() -> TestContext {
        let mut ctx = SchedulerContext::create_inmemory();
        ctx.config.timezone = chrono_tz::UTC;
        // 2025-10-01T00:00:00Z
        ctx.sys = Arc::new(StaticTimeSys(1759276800000));

        let tutor = Tutor::new("Ada", "ada@example.com");
        let mut subject = Subject::new(tutor.id.clone(), "Algebra");
        subject.recipients = vec!["student@example.com".into()];
        ctx.repos.tutors.insert(&tutor).await.unwrap();
        ctx.repos.subjects.insert(&subject).await.unwrap();

        TestContext {
            ctx,
            tutor,
            subject,
        }
    }
}
