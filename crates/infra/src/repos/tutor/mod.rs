mod inmemory;
mod postgres;

pub use inmemory::InMemoryTutorRepo;
pub use postgres::PostgresTutorRepo;
use tutor_scheduler_domain::{Tutor, ID};

#[async_trait::async_trait]
pub trait ITutorRepo: Send + Sync {
    async fn insert(&self, tutor: &Tutor) -> anyhow::Result<()>;
    async fn find(&self, tutor_id: &ID) -> Option<Tutor>;
}
