use crate::{session::Session, shared::recurrence::SessionDuration};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` of wall clock time. Both ends carry a
/// date, so a window running past midnight simply ends on the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(date: NaiveDate, start_time: NaiveTime, duration: SessionDuration) -> Self {
        let start = date.and_time(start_time);
        Self {
            start,
            end: start
                .checked_add_signed(duration.as_chrono())
                .unwrap_or(NaiveDateTime::MAX),
        }
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        windows_overlap(self, other)
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Touching windows (one ending exactly when the other starts) do not overlap
pub fn windows_overlap(a: &TimeWindow, b: &TimeWindow) -> bool {
    a.start < b.end && b.start < a.end
}

/// The window `session` occupies when it occurs on `date`, if it occurs on that date
pub fn occupies_on_date(session: &Session, date: NaiveDate) -> Option<TimeWindow> {
    if session.recurrence.occurs_on(session.anchor_date(), date) {
        Some(TimeWindow::new(date, session.start_time, session.duration))
    } else {
        None
    }
}
