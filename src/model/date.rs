use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::fmt;

/// A calendar date, or an instant with its original UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrDateTime {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl DateOrDateTime {
    pub fn is_time_specified(&self) -> bool {
        matches!(self, DateOrDateTime::DateTime(_))
    }

    /// The calendar date, in the value's own offset for date-times.
    pub fn date(&self) -> NaiveDate {
        match self {
            DateOrDateTime::Date(date) => *date,
            DateOrDateTime::DateTime(date_time) => date_time.date_naive(),
        }
    }
}

impl From<NaiveDate> for DateOrDateTime {
    fn from(date: NaiveDate) -> Self {
        DateOrDateTime::Date(date)
    }
}

impl From<DateTime<FixedOffset>> for DateOrDateTime {
    fn from(date_time: DateTime<FixedOffset>) -> Self {
        DateOrDateTime::DateTime(date_time)
    }
}

impl From<DateTime<Utc>> for DateOrDateTime {
    fn from(date_time: DateTime<Utc>) -> Self {
        DateOrDateTime::DateTime(date_time.fixed_offset())
    }
}

impl fmt::Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrDateTime::Date(date) => write!(f, "{}", date),
            DateOrDateTime::DateTime(date_time) => write!(f, "{}", date_time.to_rfc3339()),
        }
    }
}

/// A single date or a `start..end` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateOrDateRange {
    pub start: DateOrDateTime,
    pub end: Option<DateOrDateTime>,
}

impl DateOrDateRange {
    pub fn single(start: impl Into<DateOrDateTime>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    pub fn range(start: impl Into<DateOrDateTime>, end: impl Into<DateOrDateTime>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    pub fn is_range(&self) -> bool {
        self.end.is_some()
    }
}

impl From<DateOrDateTime> for DateOrDateRange {
    fn from(start: DateOrDateTime) -> Self {
        Self::single(start)
    }
}
