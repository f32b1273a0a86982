use axum::extract::FromRef;
use deadpool_sqlite::{Config, Hook, Pool, Runtime};
use shared::api::error::{Nothing, ServerError};
use tracing::instrument;

use crate::{db, AppState};

/// Creates the connection pool. Every new connection gets the same pragmas
/// and tracing hooks as the one used for migrations
#[instrument]
pub fn create_pool(connection_string: &str) -> Result<Pool, anyhow::Error> {
    let pool = Config::new(connection_string)
        .builder(Runtime::Tokio1)?
        .post_create(Hook::async_fn(|object, _| {
            Box::pin(async move {
                object
                    .interact(db::configure_new_connection)
                    .await
                    .map_err(ServerError::<Nothing>::from)??;
                Ok(())
            })
        }))
        .build()?;

    Ok(pool)
}

impl FromRef<AppState> for Pool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
