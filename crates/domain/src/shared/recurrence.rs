use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Week number used by storage for a `Recurrence::OneTime`
const ONE_TIME_WEEK_NUMBER: i16 = 0;
/// Week number used by storage for a `Recurrence::Daily`
const DAILY_WEEK_NUMBER: i16 = 8;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidRecurrenceError {
    #[error("Weekday must be in 1..=7 (Monday = 1), got: {0}")]
    WeekdayOutOfRange(u8),
    #[error("Duration must be a positive amount of minutes, got: {0}")]
    NonPositiveDuration(i64),
    #[error("Duration must be at most 1440 minutes, got: {0}")]
    DurationTooLong(i64),
    #[error("Unknown week number: {0}")]
    UnknownWeekNumber(i16),
    #[error("A one time session needs a date")]
    MissingDate,
    #[error("A recurring session needs an anchor date")]
    MissingAnchor,
    #[error("The anchor date of a one time session must equal its date")]
    AnchorMismatch,
}

/// How a `Session` repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Recurrence {
    /// Occurs exactly once, on the given date
    OneTime(NaiveDate),
    /// Occurs every calendar week on the given weekday
    Weekly(Weekday),
    /// Occurs every calendar day
    Daily,
}

impl Recurrence {
    /// Weekly recurrence from a weekday number where Monday is 1 and Sunday is 7
    pub fn weekly(weekday: u8) -> Result<Self, InvalidRecurrenceError> {
        weekday_from_number(weekday)
            .map(Self::Weekly)
            .ok_or(InvalidRecurrenceError::WeekdayOutOfRange(weekday))
    }

    /// Decodes the storage encoding: 0 is one time (on `date`), 1..=7 is
    /// a weekday and 8 is daily.
    pub fn from_week_number(
        week_number: i16,
        date: Option<NaiveDate>,
    ) -> Result<Self, InvalidRecurrenceError> {
        match week_number {
            ONE_TIME_WEEK_NUMBER => date
                .map(Self::OneTime)
                .ok_or(InvalidRecurrenceError::MissingDate),
            DAILY_WEEK_NUMBER => Ok(Self::Daily),
            n if (1..=7).contains(&n) => Self::weekly(n as u8),
            n => Err(InvalidRecurrenceError::UnknownWeekNumber(n)),
        }
    }

    pub fn week_number(&self) -> i16 {
        match self {
            Self::OneTime(_) => ONE_TIME_WEEK_NUMBER,
            Self::Weekly(weekday) => weekday.number_from_monday() as i16,
            Self::Daily => DAILY_WEEK_NUMBER,
        }
    }

    /// Whether the pattern has an occurrence on `date`, given the first
    /// date the pattern is active
    pub fn occurs_on(&self, anchor: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Self::OneTime(d) => *d == date,
            Self::Weekly(weekday) => date >= anchor && date.weekday() == *weekday,
            Self::Daily => date >= anchor,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::OneTime(_))
    }
}

pub fn weekday_from_number(weekday: u8) -> Option<Weekday> {
    let weekday = match weekday {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

/// The first date on or after `date` falling on `weekday`
pub fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let days_ahead =
        (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_signed(chrono::Duration::days(days_ahead as i64))
}

/// Length of a session in minutes. A session never lasts longer than a day,
/// so an occurrence can at most spill over into the following calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SessionDuration(i64);

impl SessionDuration {
    pub const MAX_MINUTES: i64 = 60 * 24;

    pub fn new(minutes: i64) -> Result<Self, InvalidRecurrenceError> {
        if minutes <= 0 {
            return Err(InvalidRecurrenceError::NonPositiveDuration(minutes));
        }
        if minutes > Self::MAX_MINUTES {
            return Err(InvalidRecurrenceError::DurationTooLong(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> i64 {
        self.0
    }

    pub fn as_chrono(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.0)
    }
}

impl std::convert::TryFrom<i64> for SessionDuration {
    type Error = InvalidRecurrenceError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<SessionDuration> for i64 {
    fn from(duration: SessionDuration) -> Self {
        duration.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_numbers_start_on_monday() {
        assert_eq!(Recurrence::weekly(1), Ok(Recurrence::Weekly(Weekday::Mon)));
        assert_eq!(Recurrence::weekly(2), Ok(Recurrence::Weekly(Weekday::Tue)));
        assert_eq!(Recurrence::weekly(7), Ok(Recurrence::Weekly(Weekday::Sun)));
    }

    #[test]
    fn rejects_weekday_out_of_range() {
        assert_eq!(
            Recurrence::weekly(0),
            Err(InvalidRecurrenceError::WeekdayOutOfRange(0))
        );
        assert_eq!(
            Recurrence::weekly(9),
            Err(InvalidRecurrenceError::WeekdayOutOfRange(9))
        );
    }

    #[test]
    fn week_number_encoding_roundtrips() {
        let d = date(2025, 10, 14);
        for recurrence in &[
            Recurrence::OneTime(d),
            Recurrence::Weekly(Weekday::Tue),
            Recurrence::Daily,
        ] {
            let decoded = Recurrence::from_week_number(recurrence.week_number(), Some(d));
            assert_eq!(decoded, Ok(*recurrence));
        }
        assert_eq!(
            Recurrence::from_week_number(0, None),
            Err(InvalidRecurrenceError::MissingDate)
        );
        assert_eq!(
            Recurrence::from_week_number(9, Some(d)),
            Err(InvalidRecurrenceError::UnknownWeekNumber(9))
        );
    }

    #[test]
    fn occurs_on_respects_anchor() {
        let anchor = date(2025, 10, 7); // Tuesday
        let weekly = Recurrence::Weekly(Weekday::Tue);
        assert!(weekly.occurs_on(anchor, date(2025, 10, 7)));
        assert!(weekly.occurs_on(anchor, date(2025, 10, 14)));
        assert!(!weekly.occurs_on(anchor, date(2025, 9, 30)));
        assert!(!weekly.occurs_on(anchor, date(2025, 10, 15)));

        assert!(Recurrence::Daily.occurs_on(anchor, date(2025, 10, 8)));
        assert!(!Recurrence::Daily.occurs_on(anchor, date(2025, 10, 6)));

        let once = Recurrence::OneTime(date(2025, 10, 15));
        assert!(once.occurs_on(date(2025, 10, 15), date(2025, 10, 15)));
        assert!(!once.occurs_on(date(2025, 10, 15), date(2025, 10, 16)));
    }

    #[test]
    fn finds_next_weekday() {
        // 2025-10-14 is a Tuesday
        let tuesday = date(2025, 10, 14);
        assert_eq!(next_weekday_on_or_after(tuesday, Weekday::Tue), Some(tuesday));
        assert_eq!(
            next_weekday_on_or_after(tuesday, Weekday::Wed),
            Some(date(2025, 10, 15))
        );
        assert_eq!(
            next_weekday_on_or_after(tuesday, Weekday::Mon),
            Some(date(2025, 10, 20))
        );
    }

    #[test]
    fn duration_bounds() {
        assert!(SessionDuration::new(1).is_ok());
        assert!(SessionDuration::new(SessionDuration::MAX_MINUTES).is_ok());
        assert_eq!(
            SessionDuration::new(0),
            Err(InvalidRecurrenceError::NonPositiveDuration(0))
        );
        assert_eq!(
            SessionDuration::new(-30),
            Err(InvalidRecurrenceError::NonPositiveDuration(-30))
        );
        assert_eq!(
            SessionDuration::new(1441),
            Err(InvalidRecurrenceError::DurationTooLong(1441))
        );
    }

    #[test]
    fn recurrence_serializes_as_tagged_variant() {
        let json = serde_json::to_value(&Recurrence::Daily).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Daily" }));
        let weekly: Recurrence =
            serde_json::from_value(serde_json::json!({ "type": "Weekly", "value": "Tue" }))
                .unwrap();
        assert_eq!(weekly, Recurrence::Weekly(Weekday::Tue));
    }
}
