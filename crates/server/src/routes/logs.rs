use axum::{
    extract::{Path, Query},
    Json,
};
use shared::{
    api::{
        error::ServerError,
        payloads::{ExerciseLogResponse, LogQuery},
        response_errors::ExerciseLogError,
    },
    model::{LogEntry, LogFilter, UserProfile},
    types::{CalendarDate, Uuid},
};
use tracing::instrument;

use crate::{db::DatabaseConnection, Args};

#[instrument(skip(conn, args))]
pub async fn exercise_log(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
    Path(id): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<ExerciseLogResponse>, ServerError<ExerciseLogError>> {
    let user_id = Uuid::parse(&id).map_err(|_| ExerciseLogError::UserNotFound { id })?;
    let filter = LogFilter::from_query(&query, CalendarDate::today(), args.default_log_limit);

    let (user, log) = conn
        .interact(move |conn| {
            let user = UserProfile::fetch_by_id(conn, &user_id)?.ok_or_else(|| {
                ExerciseLogError::UserNotFound {
                    id: user_id.to_string(),
                }
            })?;
            // A bad range is only reported for a user that exists
            let filter = filter?;
            let log = LogEntry::fetch_for_user(conn, &user_id, &filter)?;

            Ok::<_, ServerError<ExerciseLogError>>((user, log))
        })
        .await??;

    Ok(Json(ExerciseLogResponse::new(user, log)))
}
