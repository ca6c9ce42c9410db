use thiserror::Error;
use tutor_scheduler_domain::{InvalidRecurrenceError, ID};

/// Errors surfaced to the callers of the scheduling engine
#[derive(Error, Debug, PartialEq)]
pub enum SchedulingError {
    #[error("The session clashes with the existing session: {0}. Pick another time.")]
    Conflict(ID),
    #[error("Invalid session provided. Error message: `{0}`")]
    InvalidRecurrence(#[from] InvalidRecurrenceError),
    #[error("The session with id: {0}, was not found.")]
    NotFound(ID),
    #[error("The tutor with id: {0}, was not found.")]
    UnknownTutor(ID),
    #[error("The subject with id: {0}, was not found.")]
    UnknownSubject(ID),
    #[error("Invalid query provided. Error message: `{0}`")]
    InvalidQuery(String),
    #[error("Internal storage error")]
    Storage,
}
