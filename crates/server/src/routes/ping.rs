use axum::{http::StatusCode, Json};

/// Liveness check, doesn't touch the database
pub async fn ping() -> (StatusCode, Json<()>) {
    (StatusCode::OK, Json(()))
}
