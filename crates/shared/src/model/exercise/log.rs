use serde::{Deserialize, Serialize};

use crate::{
    api::payloads::LogQuery,
    types::{CalendarDate, CalendarDateError},
};

#[cfg(feature = "backend")]
use {
    crate::{api::error::ServerError, model::ExerciseIden, types::Uuid},
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{Expr, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// One item of a user's exercise log. The ids are left out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: CalendarDate,
}

/// Inclusive date range and cap applied to a log query
#[derive(Debug, Clone, PartialEq)]
pub struct LogFilter {
    /// `None` means no lower bound
    pub from: Option<CalendarDate>,
    pub to: CalendarDate,
    pub limit: u64,
}

impl LogFilter {
    pub const DEFAULT_LIMIT: u64 = 10;
    /// SQLite binds integers as `i64`
    pub const MAX_LIMIT: u64 = i64::MAX as u64;

    /// `from`/`to` must be `yyyy-mm-dd` when present. `to` falls back to
    /// `today`, a limit that is missing, not a number or not positive falls
    /// back to `default_limit`
    pub fn from_query(
        query: &LogQuery,
        today: CalendarDate,
        default_limit: u64,
    ) -> Result<Self, CalendarDateError> {
        let from = non_empty(&query.from)
            .map(CalendarDate::parse_iso)
            .transpose()?;
        let to = non_empty(&query.to)
            .map(CalendarDate::parse_iso)
            .transpose()?
            .unwrap_or(today);
        let limit = non_empty(&query.limit)
            .and_then(|limit| limit.parse::<i64>().ok())
            .and_then(|limit| u64::try_from(limit).ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(default_limit);

        Ok(Self { from, to, limit })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(feature = "backend")]
impl LogEntry {
    /// Exercises of `user_id` dated within the filter's range, oldest first,
    /// at most `filter.limit` of them
    pub fn fetch_for_user<T>(
        conn: &Connection,
        user_id: &Uuid,
        filter: &LogFilter,
    ) -> Result<Vec<LogEntry>, ServerError<T>> {
        let mut query = Query::select();
        query
            .columns([
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .and_where(Expr::col(ExerciseIden::Date).lte(filter.to));
        if let Some(from) = filter.from {
            query.and_where(Expr::col(ExerciseIden::Date).gte(from));
        }
        let (sql, values) = query
            .order_by(ExerciseIden::Date, Order::Asc)
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .limit(filter.limit)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let log = stmt
            .query_map(&*values.as_params(), LogEntry::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(log)
    }
}

#[cfg(test)]
mod test {
    use super::LogFilter;
    use crate::{api::payloads::LogQuery, types::CalendarDate};

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse_iso(s).unwrap()
    }

    fn query(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> LogQuery {
        LogQuery {
            from: from.map(str::to_owned),
            to: to.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    #[test]
    fn test_defaults() {
        let today = date("2024-06-15");
        let filter = LogFilter::from_query(&LogQuery::default(), today, LogFilter::DEFAULT_LIMIT).unwrap();
        assert_eq!(
            filter,
            LogFilter {
                from: None,
                to: today,
                limit: 10,
            }
        );
    }

    #[test]
    fn test_explicit_range_and_limit() {
        let q = query(Some("2023-01-01"), Some("2023-01-31"), Some("1"));
        let filter = LogFilter::from_query(&q, date("2024-06-15"), 10).unwrap();
        assert_eq!(filter.from, Some(date("2023-01-01")));
        assert_eq!(filter.to, date("2023-01-31"));
        assert_eq!(filter.limit, 1);
    }

    #[test]
    fn test_bad_limit_falls_back() {
        let today = date("2024-06-15");
        for limit in [
            "ten",
            "-3",
            "0",
            "2.5",
            "",
            "9223372036854775808",
            "18446744073709551615",
        ] {
            let filter = LogFilter::from_query(&query(None, None, Some(limit)), today, 7).unwrap();
            assert_eq!(filter.limit, 7, "limit {limit:?}");
        }

        let largest = LogFilter::from_query(&query(None, None, Some("9223372036854775807")), today, 7)
            .unwrap();
        assert_eq!(largest.limit, LogFilter::MAX_LIMIT);
    }

    #[test]
    fn test_bad_range_is_rejected() {
        let today = date("2024-06-15");
        assert!(LogFilter::from_query(&query(Some("January"), None, None), today, 10).is_err());
        assert!(LogFilter::from_query(&query(None, Some("2023-02-30"), None), today, 10).is_err());
    }
}
