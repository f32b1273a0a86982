use std::sync::Arc;

use axum::extract::FromRef;
use deadpool_sqlite::Pool;

mod args;
pub use args::*;

mod pool;
pub use pool::*;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: Pool,
    pub args: Arc<Cli>,
}

impl AppState {
    pub fn new(pool: Pool, args: Cli) -> Self {
        Self {
            pool,
            args: Arc::new(args),
        }
    }
}

impl FromRef<AppState> for Arc<Cli> {
    fn from_ref(state: &AppState) -> Self {
        state.args.clone()
    }
}
