mod inmemory;
mod postgres;

pub use inmemory::InMemorySubjectRepo;
pub use postgres::PostgresSubjectRepo;
use tutor_scheduler_domain::{Subject, ID};

#[async_trait::async_trait]
pub trait ISubjectRepo: Send + Sync {
    async fn insert(&self, subject: &Subject) -> anyhow::Result<()>;
    async fn find(&self, subject_id: &ID) -> Option<Subject>;
    async fn find_many(&self, subject_ids: &[ID]) -> anyhow::Result<Vec<Subject>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_find() {
        let repo = InMemorySubjectRepo::new();
        let mut subject = Subject::new(ID::default(), "Algebra");
        subject.recipients = vec!["student@example.com".into()];
        let other = Subject::new(ID::default(), "Geometry");
        repo.insert(&subject).await.unwrap();
        repo.insert(&other).await.unwrap();

        assert_eq!(repo.find(&subject.id).await, Some(subject.clone()));
        let found = repo.find_many(&[subject.id.clone()]).await.unwrap();
        assert_eq!(found, vec![subject]);
        assert!(repo.find(&ID::default()).await.is_none());
    }
}
