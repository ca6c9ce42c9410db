use super::ITutorRepo;
use crate::repos::shared::inmemory_repo::*;
use tutor_scheduler_domain::{Tutor, ID};

pub struct InMemoryTutorRepo {
    tutors: std::sync::Mutex<Vec<Tutor>>,
}

impl InMemoryTutorRepo {
    pub fn new() -> Self {
        Self {
            tutors: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryTutorRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ITutorRepo for InMemoryTutorRepo {
    async fn insert(&self, tutor: &Tutor) -> anyhow::Result<()> {
        insert(tutor, &self.tutors);
        Ok(())
    }

    async fn find(&self, tutor_id: &ID) -> Option<Tutor> {
        find(tutor_id, &self.tutors)
    }
}
