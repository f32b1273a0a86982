use std::{fmt, ops::Deref};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Human readable rendering used in every response and by `Display`, e.g.
/// `Mon Jan 01 2024`
pub const CALENDAR_DATE_FORMAT: &str = "%a %b %d %Y";
/// Form used for the log range query params and for storage
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarDateError {
    #[error("'{input}' is not a recognised date")]
    Unrecognised { input: String },
    #[error("'{input}' is outside of the supported year range")]
    OutOfRange { input: String },
}

/// A date without a time component.
///
/// Persisted as its ISO `yyyy-mm-dd` text so range comparisons in sqlite are
/// plain string comparisons. Only serialization renders the calendar-date
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// The current date in UTC
    pub fn today() -> Self {
        Utc::now().date_naive().into()
    }

    /// Parses the date forms accepted on exercise creation: `yyyy-mm-dd`, an
    /// RFC 3339 timestamp (only the date is kept) or the calendar-date string
    pub fn parse(input: &str) -> Result<Self, CalendarDateError> {
        let trimmed = input.trim();
        let date = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
            .or_else(|| NaiveDate::parse_from_str(trimmed, CALENDAR_DATE_FORMAT).ok())
            .ok_or_else(|| CalendarDateError::Unrecognised {
                input: input.to_owned(),
            })?;

        Self::checked(date, input)
    }

    /// Parses only the `yyyy-mm-dd` form
    pub fn parse_iso(input: &str) -> Result<Self, CalendarDateError> {
        let date = NaiveDate::parse_from_str(input.trim(), ISO_DATE_FORMAT).map_err(|_| {
            CalendarDateError::Unrecognised {
                input: input.to_owned(),
            }
        })?;

        Self::checked(date, input)
    }

    // Keep to four digit years so the stored text sorts the same as the date
    fn checked(date: NaiveDate, input: &str) -> Result<Self, CalendarDateError> {
        if !(1..=9999).contains(&date.year()) {
            return Err(CalendarDateError::OutOfRange {
                input: input.to_owned(),
            });
        }
        Ok(Self(date))
    }

    pub fn to_iso_string(&self) -> String {
        self.0.format(ISO_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CALENDAR_DATE_FORMAT))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Deref for CalendarDate {
    type Target = NaiveDate;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CalendarDate::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(feature = "exemplar-model")]
mod sql {
    use chrono::NaiveDate;
    use rusqlite::{
        types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
        ToSql,
    };

    use super::CalendarDate;

    impl ToSql for CalendarDate {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(ToSqlOutput::Owned(self.to_iso_string().into()))
        }
    }

    impl FromSql for CalendarDate {
        fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
            NaiveDate::column_result(value).map(CalendarDate::from)
        }
    }
}

#[cfg(feature = "sea-query-enum")]
impl From<&CalendarDate> for sea_query::Value {
    fn from(value: &CalendarDate) -> Self {
        value.to_iso_string().into()
    }
}

#[cfg(feature = "sea-query-enum")]
impl From<CalendarDate> for sea_query::Value {
    fn from(value: CalendarDate) -> Self {
        (&value).into()
    }
}
