use axum::Json;
use shared::{
    api::{
        error::ServerError,
        payloads::{CreateUserRequest, CreateUserResponse},
        response_errors::{CreateUserError, ListUsersError},
    },
    model::{NewUser, User},
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, FormOrJson};

#[instrument(skip(conn))]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    FormOrJson(req): FormOrJson<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ServerError<CreateUserError>> {
    // Empty usernames are refused by the store as a constraint violation
    let new_user = NewUser::new(req.username);
    let user = conn
        .interact(move |conn| User::create::<CreateUserError>(conn, new_user))
        .await??;

    info!(id = %user.id, username = %user.username, "Created user");
    Ok(Json(user.into()))
}

/// Every user as stored, revision metadata included
#[instrument(skip(conn))]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<User>>, ServerError<ListUsersError>> {
    let users = conn
        .interact(|conn| User::fetch_all::<ListUsersError>(conn))
        .await??;

    Ok(Json(users))
}
