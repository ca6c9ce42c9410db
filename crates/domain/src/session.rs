use crate::shared::{
    entity::{Entity, ID},
    recurrence::{InvalidRecurrenceError, Recurrence, SessionDuration},
};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A `Session` is a tutoring slot owned by a tutor. It either happens once
/// or repeats weekly / daily from its `anchor_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionData")]
pub struct Session {
    pub id: ID,
    /// The tutor owning this `Session`. Conflicts are only checked
    /// between sessions with the same owner.
    pub owner_id: ID,
    /// The subject being taught, not used when checking for conflicts
    pub subject_id: ID,
    pub start_time: NaiveTime,
    pub duration: SessionDuration,
    pub recurrence: Recurrence,
    anchor_date: NaiveDate,
    pub created: i64,
    pub updated: i64,
}

/// Unvalidated `Session` as read from json
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionData {
    id: ID,
    owner_id: ID,
    subject_id: ID,
    start_time: NaiveTime,
    duration: i64,
    recurrence: Recurrence,
    anchor_date: Option<NaiveDate>,
    created: i64,
    updated: i64,
}

impl TryFrom<SessionData> for Session {
    type Error = InvalidRecurrenceError;

    fn try_from(data: SessionData) -> Result<Self, Self::Error> {
        Self::restore(
            data.id,
            data.owner_id,
            data.subject_id,
            data.start_time,
            data.duration,
            data.recurrence,
            data.anchor_date,
            data.created,
            data.updated,
        )
    }
}

/// Input for constructing a new `Session`
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub owner_id: ID,
    pub subject_id: ID,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub recurrence: Recurrence,
    /// Required for recurring sessions, must be omitted or equal to
    /// the date for one time sessions
    pub anchor_date: Option<NaiveDate>,
    pub timestamp: i64,
}

/// Partial update of a `Session`
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub subject_id: Option<ID>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<i64>,
    pub recurrence: Option<Recurrence>,
    pub anchor_date: Option<NaiveDate>,
}

fn resolve_anchor(
    recurrence: &Recurrence,
    anchor_date: Option<NaiveDate>,
) -> Result<NaiveDate, InvalidRecurrenceError> {
    match (recurrence, anchor_date) {
        (Recurrence::OneTime(date), None) => Ok(*date),
        (Recurrence::OneTime(date), Some(anchor)) if anchor == *date => Ok(anchor),
        (Recurrence::OneTime(_), Some(_)) => Err(InvalidRecurrenceError::AnchorMismatch),
        (_, Some(anchor)) => Ok(anchor),
        (_, None) => Err(InvalidRecurrenceError::MissingAnchor),
    }
}

impl Session {
    pub fn new(params: SessionParams) -> Result<Self, InvalidRecurrenceError> {
        Self::restore(
            ID::default(),
            params.owner_id,
            params.subject_id,
            params.start_time,
            params.duration_minutes,
            params.recurrence,
            params.anchor_date,
            params.timestamp,
            params.timestamp,
        )
    }

    /// Rebuilds a `Session` from storage, validating it the same way `new` does
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ID,
        owner_id: ID,
        subject_id: ID,
        start_time: NaiveTime,
        duration_minutes: i64,
        recurrence: Recurrence,
        anchor_date: Option<NaiveDate>,
        created: i64,
        updated: i64,
    ) -> Result<Self, InvalidRecurrenceError> {
        let duration = SessionDuration::new(duration_minutes)?;
        let anchor_date = resolve_anchor(&recurrence, anchor_date)?;
        Ok(Self {
            id,
            owner_id,
            subject_id,
            start_time,
            duration,
            recurrence,
            anchor_date,
            created,
            updated,
        })
    }

    /// First date from which occurrences exist. For one time sessions
    /// this is the date of the session.
    pub fn anchor_date(&self) -> NaiveDate {
        match self.recurrence {
            Recurrence::OneTime(date) => date,
            _ => self.anchor_date,
        }
    }

    /// Returns the `Session` as it would look after applying `patch`.
    /// Nothing is changed if the patch is invalid.
    pub fn apply(&self, patch: &SessionPatch, timestamp: i64) -> Result<Self, InvalidRecurrenceError> {
        let recurrence = patch.recurrence.unwrap_or(self.recurrence);
        let anchor_date = match (&recurrence, patch.anchor_date) {
            // The anchor of a one time session moves with its date
            (Recurrence::OneTime(_), anchor) => anchor,
            (_, Some(anchor)) => Some(anchor),
            (_, None) => Some(self.anchor_date),
        };
        Self::restore(
            self.id.clone(),
            self.owner_id.clone(),
            patch
                .subject_id
                .clone()
                .unwrap_or_else(|| self.subject_id.clone()),
            patch.start_time.unwrap_or(self.start_time),
            patch
                .duration_minutes
                .unwrap_or_else(|| self.duration.minutes()),
            recurrence,
            anchor_date,
            self.created,
            timestamp,
        )
    }
}

impl Entity for Session {
    fn id(&self) -> &ID {
        &self.id
    }
}
