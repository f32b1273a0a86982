#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use clap::Parser;
use rusqlite::Connection;
use serde_json::Value;
use server::{app, create_pool, db, AppState, Cli};
use shared::configure_tracing_once;
use tempfile::TempDir;
use tower::ServiceExt;

/// A fully wired app backed by a fresh database in a temp dir. The dir is
/// removed when this is dropped
pub struct TestApp {
    pub router: Router,
    pub db_path: String,
    _dir: TempDir,
}

pub fn test_app() -> TestApp {
    test_app_with_args(&[])
}

pub fn test_app_with_args(extra_args: &[&str]) -> TestApp {
    configure_tracing_once();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.sqlite").to_str().unwrap().to_owned();
    db::run_migrations(&db_path).unwrap();

    let assets_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");
    let mut args = vec![
        "server",
        "--sqlite-connection-string",
        db_path.as_str(),
        "--assets-dir",
        assets_dir,
    ];
    args.extend_from_slice(extra_args);
    let cli = Cli::parse_from(args);

    let pool = create_pool(&db_path).unwrap();
    let router = app(AppState::new(pool, cli)).unwrap();

    TestApp {
        router,
        db_path,
        _dir: dir,
    }
}

/// A plain connection to a freshly migrated database, configured the same way
/// as pooled connections
pub fn test_connection() -> (Connection, TempDir) {
    configure_tracing_once();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.sqlite");
    db::run_migrations(db_path.to_str().unwrap()).unwrap();

    let mut conn = Connection::open(&db_path).unwrap();
    db::configure_new_connection(&mut conn).unwrap();
    (conn, dir)
}

impl TestApp {
    /// Rows in the exercise table, read straight from the database file
    pub fn exercise_count(&self) -> i64 {
        let conn = Connection::open(&self.db_path).unwrap();
        conn.query_row("SELECT COUNT(*) FROM exercise", [], |row| row.get(0))
            .unwrap()
    }

    pub async fn send_raw(&self, req: Request<Body>) -> (StatusCode, String) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send_raw(req).await;
        let value = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("body {body:?} isn't json: {e}"));
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Creates a user and returns its id
    pub async fn create_user(&self, username: &str) -> String {
        let (status, body) = self
            .post_form("/api/users", &format!("username={username}"))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_owned()
    }

    pub async fn log_exercise(&self, id: &str, description: &str, duration: i64, date: &str) {
        let (status, body) = self
            .post_form(
                &format!("/api/users/{id}/exercises"),
                &format!("description={description}&duration={duration}&date={date}"),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }
}
