use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::{ExerciseResponse, LogExerciseRequest},
        response_errors::LogExerciseError,
    },
    model::Exercise,
    types::{CalendarDate, Uuid},
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, FormOrJson};

/// Records one exercise for the user in the path and answers with the user
/// merged with the new exercise
#[instrument(skip(conn))]
pub async fn log_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<String>,
    FormOrJson(req): FormOrJson<LogExerciseRequest>,
) -> Result<Json<ExerciseResponse>, ServerError<LogExerciseError>> {
    // An id that isn't a uuid can't belong to any user
    let user_id = Uuid::parse(&id).map_err(|_| LogExerciseError::UserNotFound { id })?;

    let today = CalendarDate::today();
    let (user, exercise) = conn
        .interact(move |conn| Exercise::create_for_user(conn, user_id, req, today))
        .await??;

    info!(user_id = %user.id, exercise_id = %exercise.id, "Logged exercise");
    Ok(Json((user, exercise).into()))
}
