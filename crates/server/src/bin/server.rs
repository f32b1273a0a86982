use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use clap::Parser;
use server::{app, create_pool, db, AppState, Cli};
use shared::*;
use tokio::net::TcpListener;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Loaded first since it may set RUST_LOG
    let env_file = load_dotenv()?;
    configure_tracing()?;
    if let Some(path) = env_file {
        info!(?path, "Loaded .env");
    }

    let args = Cli::parse();
    debug!(?args);

    // Run the migrations synchronously before creating the pool or launching the server
    let ran = db::run_migrations(&args.sqlite_connection_string)?;
    info!("Ran {ran} db migrations");

    let pool = create_pool(&args.sqlite_connection_string)?;

    let socket = SocketAddr::new(IpAddr::from_str(&args.bind_addr)?, args.port);
    let listener = TcpListener::bind(socket).await?;
    info!("listening on {}", listener.local_addr()?);

    let state = AppState::new(pool, args);

    axum::serve(listener, app(state)?).await?;

    Ok(())
}
