//! Detects whether a candidate `Session` clashes with any of a tutor's
//! existing sessions.
//!
//! Recurring sessions have infinitely many occurrences, so nothing is
//! enumerated. A session lasts at most one day, which means an occurrence of
//! one session can only overlap occurrences of another session starting the
//! same day, the day before or the day after. For each of those three day
//! offsets the recurrence pair is resolved into a single witness date (or
//! none), and because every occurrence of a session has the same time of day
//! the overlap at that witness decides the offset for every date.

use crate::{
    interval::{occupies_on_date, windows_overlap},
    session::Session,
    shared::recurrence::{next_weekday_on_or_after, Recurrence},
};
use chrono::prelude::*;
use chrono::Duration;

/// Day offsets between an occurrence of `a` and an occurrence of `b` that
/// can possibly overlap.
const DAY_OFFSETS: [i64; 3] = [-1, 0, 1];

fn shift_weekday(weekday: Weekday, offset: i64) -> Weekday {
    match offset {
        -1 => weekday.pred(),
        1 => weekday.succ(),
        _ => weekday,
    }
}

/// A date `d` on which `a` occurs while `b` occurs on `d + offset`
fn witness(a: &Session, b: &Session, offset: i64) -> Option<NaiveDate> {
    let shift = Duration::days(offset);
    match (a.recurrence, b.recurrence) {
        (Recurrence::OneTime(date), _) => {
            let b_date = date.checked_add_signed(shift)?;
            if b.recurrence.occurs_on(b.anchor_date(), b_date) {
                Some(date)
            } else {
                None
            }
        }
        (_, Recurrence::OneTime(b_date)) => {
            let date = b_date.checked_sub_signed(shift)?;
            if a.recurrence.occurs_on(a.anchor_date(), date) {
                Some(date)
            } else {
                None
            }
        }
        (a_recurrence, b_recurrence) => {
            // Both series are infinite, so the first date on which both are
            // active (seen from `a`) is where the search starts
            let both_active = a
                .anchor_date()
                .max(b.anchor_date().checked_sub_signed(shift)?);
            match (a_recurrence, b_recurrence) {
                (Recurrence::Weekly(a_day), Recurrence::Weekly(b_day)) => {
                    if shift_weekday(a_day, offset) == b_day {
                        next_weekday_on_or_after(both_active, a_day)
                    } else {
                        None
                    }
                }
                (Recurrence::Weekly(a_day), Recurrence::Daily) => {
                    next_weekday_on_or_after(both_active, a_day)
                }
                (Recurrence::Daily, Recurrence::Weekly(b_day)) => {
                    next_weekday_on_or_after(both_active, shift_weekday(b_day, -offset))
                }
                _ => Some(both_active),
            }
        }
    }
}

/// Whether some occurrence of `a` overlaps some occurrence of `b`.
/// Ownership is not considered here.
pub fn sessions_overlap(a: &Session, b: &Session) -> bool {
    DAY_OFFSETS.iter().any(|offset| {
        let a_date = match witness(a, b, *offset) {
            Some(date) => date,
            None => return false,
        };
        let b_date = match a_date.checked_add_signed(Duration::days(*offset)) {
            Some(date) => date,
            None => return false,
        };
        match (occupies_on_date(a, a_date), occupies_on_date(b, b_date)) {
            (Some(a_window), Some(b_window)) => windows_overlap(&a_window, &b_window),
            _ => false,
        }
    })
}

/// The first `Session` in `existing` that clashes with `candidate`.
///
/// Only sessions with the same owner are considered, and `candidate` never
/// clashes with a stored version of itself (same id), so the function can be
/// used both when creating and when updating a `Session`.
pub fn find_conflict<'a>(candidate: &Session, existing: &'a [Session]) -> Option<&'a Session> {
    existing.iter().find(|session| {
        session.owner_id == candidate.owner_id
            && session.id != candidate.id
            && sessions_overlap(candidate, session)
    })
}

pub fn has_conflict(candidate: &Session, existing: &[Session]) -> bool {
    find_conflict(candidate, existing).is_some()
}
