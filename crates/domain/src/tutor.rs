use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// The owner of `Session`s
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: ID,
    pub name: String,
    pub email: String,
}

impl Tutor {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for Tutor {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A module or course taught in `Session`s
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: ID,
    pub tutor_id: ID,
    pub name: String,
    /// Email addresses notified before each session of the subject
    pub recipients: Vec<String>,
}

impl Subject {
    pub fn new(tutor_id: ID, name: &str) -> Self {
        Self {
            id: Default::default(),
            tutor_id,
            name: name.into(),
            recipients: Vec::new(),
        }
    }
}

impl Entity for Subject {
    fn id(&self) -> &ID {
        &self.id
    }
}
