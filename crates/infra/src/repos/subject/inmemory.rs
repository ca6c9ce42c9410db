use super::ISubjectRepo;
use crate::repos::shared::inmemory_repo::*;
use tutor_scheduler_domain::{Subject, ID};

pub struct InMemorySubjectRepo {
    subjects: std::sync::Mutex<Vec<Subject>>,
}

impl InMemorySubjectRepo {
    pub fn new() -> Self {
        Self {
            subjects: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemorySubjectRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ISubjectRepo for InMemorySubjectRepo {
    async fn insert(&self, subject: &Subject) -> anyhow::Result<()> {
        insert(subject, &self.subjects);
        Ok(())
    }

    async fn find(&self, subject_id: &ID) -> Option<Subject> {
        find(subject_id, &self.subjects)
    }

    async fn find_many(&self, subject_ids: &[ID]) -> anyhow::Result<Vec<Subject>> {
        Ok(find_by(&self.subjects, |s| subject_ids.contains(&s.id)))
    }
}
