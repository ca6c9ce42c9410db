mod conflict;
mod interval;
mod notification;
mod occurrence;
mod session;
mod shared;
mod tutor;

pub use conflict::{find_conflict, has_conflict, sessions_overlap};
pub use interval::{occupies_on_date, windows_overlap, TimeWindow};
pub use notification::{NotificationKey, NotificationRecord};
pub use occurrence::{
    imminent_occurrences, next_occurrence_on_or_after, project_upcoming, Occurrence,
    SessionOccurrence,
};
pub use session::{Session, SessionParams, SessionPatch};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{
    next_weekday_on_or_after, weekday_from_number, InvalidRecurrenceError, Recurrence,
    SessionDuration,
};
pub use tutor::{Subject, Tutor};
