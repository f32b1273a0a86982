use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod db;

mod cli;
pub use cli::*;

mod state;
pub use state::*;

mod extract;
pub use extract::*;

pub mod routes;

/// Largest request body accepted by any route
pub const BODY_MAX_BYTES: usize = 16 * 1024;

/// Builds the full application: api routes, static assets for everything
/// else, and the cors, body limit and request tracing layers
pub fn app(state: AppState) -> Result<Router, anyhow::Error> {
    let cors = cors_layer(&state.args.cors_origin)?;

    Ok(routes::router()
        .fallback_service(ServeDir::new(&state.args.assets_dir))
        .layer(RequestBodyLimitLayer::new(BODY_MAX_BYTES))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state))
}

fn cors_layer(origin: &str) -> Result<CorsLayer, anyhow::Error> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(
            HeaderValue::from_str(origin).with_context(|| format!("cors origin {origin:?}"))?,
        )
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}
