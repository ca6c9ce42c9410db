use crate::{
    session::Session,
    shared::recurrence::{next_weekday_on_or_after, Recurrence},
};
use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};

/// A concrete date and time at which a `Session` takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Occurrence {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOccurrence {
    pub session: Session,
    pub occurrence: Occurrence,
}

/// The first occurrence of `session` starting at or after
/// `reference_date` + `reference_time`.
pub fn next_occurrence_on_or_after(
    session: &Session,
    reference_date: NaiveDate,
    reference_time: NaiveTime,
) -> Option<Occurrence> {
    let starts_too_early_on = |date: NaiveDate| {
        date == reference_date && session.start_time < reference_time
    };

    let date = match session.recurrence {
        Recurrence::OneTime(date) => {
            if date < reference_date || starts_too_early_on(date) {
                return None;
            }
            date
        }
        Recurrence::Weekly(weekday) => {
            let first = next_weekday_on_or_after(reference_date.max(session.anchor_date()), weekday)?;
            if starts_too_early_on(first) {
                first.checked_add_signed(Duration::weeks(1))?
            } else {
                first
            }
        }
        Recurrence::Daily => {
            let first = reference_date.max(session.anchor_date());
            if starts_too_early_on(first) {
                first.succ_opt()?
            } else {
                first
            }
        }
    };

    Some(Occurrence {
        date,
        time: session.start_time,
    })
}

/// Projects every session onto its next occurrence starting at or after
/// `from` and keeps those on or before `last_date`.
/// The result is ordered by start, ties broken by session id.
pub fn project_upcoming(
    sessions: Vec<Session>,
    from: NaiveDateTime,
    last_date: NaiveDate,
) -> Vec<SessionOccurrence> {
    let mut upcoming = sessions
        .into_iter()
        .filter_map(|session| {
            next_occurrence_on_or_after(&session, from.date(), from.time())
                .filter(|occurrence| occurrence.date <= last_date)
                .map(|occurrence| SessionOccurrence {
                    session,
                    occurrence,
                })
        })
        .collect::<Vec<_>>();

    upcoming.sort_by(|a, b| {
        a.occurrence
            .cmp(&b.occurrence)
            .then_with(|| a.session.id.cmp(&b.session.id))
    });
    upcoming
}

/// Occurrences starting within `[now, now + lead]`
pub fn imminent_occurrences(
    sessions: Vec<Session>,
    now: NaiveDateTime,
    lead: Duration,
) -> Vec<SessionOccurrence> {
    let until = now.checked_add_signed(lead).unwrap_or(NaiveDateTime::MAX);
    sessions
        .into_iter()
        .filter_map(|session| {
            next_occurrence_on_or_after(&session, now.date(), now.time())
                .filter(|occurrence| occurrence.starts_at() <= until)
                .map(|occurrence| SessionOccurrence {
                    session,
                    occurrence,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SessionParams, ID};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn session(start: NaiveTime, recurrence: Recurrence, anchor: Option<NaiveDate>) -> Session {
        Session::new(SessionParams {
            owner_id: ID::default(),
            subject_id: ID::default(),
            start_time: start,
            duration_minutes: 60,
            recurrence,
            anchor_date: anchor,
            timestamp: 0,
        })
        .unwrap()
    }

    fn occurrence(d: NaiveDate, t: NaiveTime) -> Option<Occurrence> {
        Some(Occurrence { date: d, time: t })
    }

    #[test]
    fn one_time_projection() {
        let s = session(time(14, 0), Recurrence::OneTime(date(2025, 10, 14)), None);

        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 1), time(23, 0)),
            occurrence(date(2025, 10, 14), time(14, 0))
        );
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 14), time(14, 0)),
            occurrence(date(2025, 10, 14), time(14, 0))
        );
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 14), time(14, 1)),
            None
        );
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 15), time(0, 0)),
            None
        );
    }

    #[test]
    fn weekly_projection() {
        // Tuesdays from 2025-10-07
        let s = session(
            time(14, 0),
            Recurrence::Weekly(Weekday::Tue),
            Some(date(2025, 10, 7)),
        );

        // Before the anchor
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 9, 1), time(15, 0)),
            occurrence(date(2025, 10, 7), time(14, 0))
        );
        // Same day, before start
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 14), time(13, 55)),
            occurrence(date(2025, 10, 14), time(14, 0))
        );
        // Same day, after start
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 14), time(14, 1)),
            occurrence(date(2025, 10, 21), time(14, 0))
        );
        // Wednesday
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 15), time(9, 0)),
            occurrence(date(2025, 10, 21), time(14, 0))
        );
    }

    #[test]
    fn daily_projection() {
        let s = session(time(8, 0), Recurrence::Daily, Some(date(2025, 10, 10)));

        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 1), time(12, 0)),
            occurrence(date(2025, 10, 10), time(8, 0))
        );
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 12), time(7, 0)),
            occurrence(date(2025, 10, 12), time(8, 0))
        );
        assert_eq!(
            next_occurrence_on_or_after(&s, date(2025, 10, 12), time(9, 0)),
            occurrence(date(2025, 10, 13), time(8, 0))
        );
    }

    #[test]
    fn daily_projection_is_monotonic() {
        let s = session(time(12, 0), Recurrence::Daily, Some(date(2025, 1, 1)));
        let d = date(2025, 6, 1);
        let mut previous: Option<Occurrence> = None;
        for minute in (0..24 * 60).step_by(7) {
            let t = time(minute / 60, minute % 60);
            let next = next_occurrence_on_or_after(&s, d, t).expect("Daily always recurs");
            assert!(next.date >= d);
            if let Some(previous) = previous {
                assert!(next >= previous);
            }
            previous = Some(next);
        }
    }

    #[test]
    fn projects_upcoming_within_lookahead() {
        let monday = session(
            time(10, 0),
            Recurrence::Weekly(Weekday::Mon),
            Some(date(2025, 1, 6)),
        );
        let daily = session(time(9, 0), Recurrence::Daily, Some(date(2025, 1, 1)));
        let far = session(time(9, 0), Recurrence::OneTime(date(2025, 12, 24)), None);

        // Tuesday 2025-10-14 at 10:00
        let from = date(2025, 10, 14).and_hms_opt(10, 0, 0).unwrap();
        let upcoming = project_upcoming(
            vec![monday.clone(), daily.clone(), far.clone()],
            from,
            date(2025, 10, 21),
        );
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].session.id, daily.id);
        assert_eq!(
            upcoming[0].occurrence,
            Occurrence {
                date: date(2025, 10, 15),
                time: time(9, 0)
            }
        );
        assert_eq!(upcoming[1].session.id, monday.id);
        assert_eq!(upcoming[1].occurrence.date, date(2025, 10, 20));

        let upcoming = project_upcoming(vec![monday, daily, far], from, date(2025, 10, 14));
        assert!(upcoming.is_empty());
    }

    #[test]
    fn finds_imminent_occurrences() {
        let s = session(
            time(14, 0),
            Recurrence::Weekly(Weekday::Tue),
            Some(date(2025, 10, 7)),
        );
        let now = date(2025, 10, 14).and_hms_opt(13, 55, 0).unwrap();
        let imminent = imminent_occurrences(vec![s.clone()], now, Duration::minutes(60));
        assert_eq!(imminent.len(), 1);
        assert_eq!(imminent[0].occurrence.starts_at(), date(2025, 10, 14).and_hms_opt(14, 0, 0).unwrap());

        let imminent = imminent_occurrences(vec![s.clone()], now, Duration::minutes(4));
        assert!(imminent.is_empty());

        let now = date(2025, 10, 14).and_hms_opt(12, 0, 0).unwrap();
        assert!(imminent_occurrences(vec![s], now, Duration::minutes(60)).is_empty());
    }
}
