use serde::{Deserialize, Serialize};

use crate::types::{CalendarDate, Uuid};

#[cfg(feature = "backend")]
use {
    crate::{
        api::{
            error::ServerError, payloads::LogExerciseRequest,
            response_errors::LogExerciseError,
        },
        model::{NewExercise, UserProfile},
    },
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(feature = "backend", check("../../../../server/migrations/002-exercise/up.sql"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: CalendarDate,
    pub duration: i64,
    pub description: String,
    pub version: i64,
}

#[cfg(feature = "backend")]
impl Exercise {
    pub fn fetch_by_id<T>(conn: &Connection, id: &Uuid) -> Result<Exercise, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Date,
                ExerciseIden::Duration,
                ExerciseIden::Description,
                ExerciseIden::Version,
            ])
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt.query_row(&*values.as_params(), Exercise::from_row)?;
        Ok(exercise)
    }

    /// Persists one exercise row. The store refuses a `user_id` that doesn't
    /// reference an existing user
    pub fn create<T>(
        conn: &mut Connection,
        new_exercise: NewExercise,
    ) -> Result<Exercise, ServerError<T>> {
        let tx = conn.transaction()?;
        let exercise = {
            new_exercise.insert(&tx)?;
            Exercise::fetch_by_id(&tx, &new_exercise.id)?
        };
        tx.commit()?;

        Ok(exercise)
    }

    /// Looks up the owning user, resolves the request body and persists the
    /// exercise in one transaction, so an exercise is never written for a user
    /// that isn't there. An unknown user is reported before a bad body
    pub fn create_for_user(
        conn: &mut Connection,
        user_id: Uuid,
        request: LogExerciseRequest,
        today: CalendarDate,
    ) -> Result<(UserProfile, Exercise), ServerError<LogExerciseError>> {
        let tx = conn.transaction()?;
        let (user, exercise) = {
            let user = UserProfile::fetch_by_id(&tx, &user_id)?.ok_or_else(|| {
                LogExerciseError::UserNotFound {
                    id: user_id.to_string(),
                }
            })?;
            let new_exercise = NewExercise::from_request(user_id, request, today)?;
            new_exercise.insert(&tx)?;
            (user, Exercise::fetch_by_id(&tx, &new_exercise.id)?)
        };
        tx.commit()?;

        Ok((user, exercise))
    }
}
