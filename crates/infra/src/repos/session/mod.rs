mod inmemory;
mod postgres;

pub use inmemory::InMemorySessionRepo;
pub use postgres::PostgresSessionRepo;
use tutor_scheduler_domain::{Session, ID};

/// Outcome of a write that is rejected when the `Session` clashes with
/// another `Session` of the same owner
#[derive(Debug, Clone, PartialEq)]
pub enum SessionWrite {
    Written,
    /// Nothing was written because of this existing `Session`
    Conflict(Session),
    /// The `Session` to save is not stored, e.g. deleted concurrently
    NotFound,
}

/// Storage of `Session`s.
///
/// The exclusive writes run the conflict detector and the write while
/// holding a lock scoped to the owner of the `Session`, so that two
/// concurrent writers for the same tutor cannot both pass the check against
/// a stale view and commit overlapping sessions.
#[async_trait::async_trait]
pub trait ISessionRepo: Send + Sync {
    async fn insert_exclusive(&self, session: &Session) -> anyhow::Result<SessionWrite>;
    async fn save_exclusive(&self, session: &Session) -> anyhow::Result<SessionWrite>;
    async fn find(&self, session_id: &ID) -> Option<Session>;
    async fn find_by_owner(&self, owner_id: &ID) -> Vec<Session>;
    async fn find_by_subject(&self, subject_id: &ID) -> Vec<Session>;
    async fn find_all(&self) -> anyhow::Result<Vec<Session>>;
    async fn delete(&self, session_id: &ID) -> Option<Session>;
}
