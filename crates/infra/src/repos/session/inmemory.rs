use super::{ISessionRepo, SessionWrite};
use crate::repos::shared::inmemory_repo::*;
use tutor_scheduler_domain::{find_conflict, Session, ID};

pub struct InMemorySessionRepo {
    sessions: std::sync::Mutex<Vec<Session>>,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self {
            sessions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemorySessionRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ISessionRepo for InMemorySessionRepo {
    // The whole collection stays locked between the check and the write
    async fn insert_exclusive(&self, session: &Session) -> anyhow::Result<SessionWrite> {
        let mut sessions = lock(&self.sessions);
        if let Some(conflict) = find_conflict(session, &sessions) {
            return Ok(SessionWrite::Conflict(conflict.clone()));
        }
        sessions.push(session.clone());
        Ok(SessionWrite::Written)
    }

    async fn save_exclusive(&self, session: &Session) -> anyhow::Result<SessionWrite> {
        let mut sessions = lock(&self.sessions);
        if let Some(conflict) = find_conflict(session, &sessions) {
            return Ok(SessionWrite::Conflict(conflict.clone()));
        }
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => {
                *existing = session.clone();
                Ok(SessionWrite::Written)
            }
            None => Ok(SessionWrite::NotFound),
        }
    }

    async fn find(&self, session_id: &ID) -> Option<Session> {
        find(session_id, &self.sessions)
    }

    async fn find_by_owner(&self, owner_id: &ID) -> Vec<Session> {
        find_by(&self.sessions, |session| session.owner_id == *owner_id)
    }

    async fn find_by_subject(&self, subject_id: &ID) -> Vec<Session> {
        find_by(&self.sessions, |session| session.subject_id == *subject_id)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Session>> {
        Ok(find_by(&self.sessions, |_| true))
    }

    async fn delete(&self, session_id: &ID) -> Option<Session> {
        delete(session_id, &self.sessions)
    }
}
