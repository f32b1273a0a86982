use axum::{
    routing::{get, post},
    Router,
};
use shared::api::Object;

use crate::AppState;

mod ping;
pub use ping::*;

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;

/// Every api route, still waiting for its state
pub fn router() -> Router<AppState> {
    Router::new()
        .route(Object::Ping.path(), get(ping))
        .route(Object::Users.path(), get(list_users).post(create_user))
        .route(Object::UserExercises.path(), post(log_exercise))
        .route(Object::UserLogs.path(), get(exercise_log))
}
