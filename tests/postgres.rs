//! Round trips against a real PostgreSQL database.
//!
//! These tests need a running server: set `TEST_DATABASE_URL` (or `DATABASE_URL`).
//! Without one they return early. The lifecycle test creates missing tables
//! with `apply_migrations`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use laris_assistant::db::RawValue;
use laris_assistant::mapping::map_entity;
use laris_assistant::model::Rating;
use laris_assistant::sql::QueryBuf;
use laris_assistant::{app, apply_migrations, AppConfig, AppState, Database, PgDatabase};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn connect() -> Option<Arc<PgDatabase>> {
    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database");
    Some(Arc::new(PgDatabase::new(pool)))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string())),
        None => builder.body(Body::empty()),
    };
    router.clone().oneshot(req.unwrap()).await.unwrap()
}

async fn body_json(res: Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn total_ratings(router: &Router) -> i64 {
    let res = send(router, Method::GET, "/api/public/movie-ratings", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    res.headers()["x-total-count"].to_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn rating_lifecycle() {
    let Some(db) = connect().await else {
        return;
    };
    apply_migrations(db.as_ref()).await.expect("create tables");
    let router = app(AppState::new(db, AppConfig::default()));

    let res = send(
        &router,
        Method::POST,
        "/api/public/movie-users",
        Some(json!({"firstName": "Ada", "lastName": "Lovelace"})),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let user_id = body_json(res).await["id"].as_i64().unwrap();

    let before = total_ratings(&router).await;

    // No movie: the NULL foreign key goes out as a typed parameter.
    let res = send(
        &router,
        Method::POST,
        "/api/public/movie-ratings",
        Some(json!({"rating": 3.5, "timestamp": 964982703, "users": {"id": user_id}})),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let rating_id = body_json(res).await["id"].as_i64().unwrap();
    assert_eq!(total_ratings(&router).await, before + 1);

    let item = format!("/api/public/movie-ratings/{}", rating_id);
    let res = send(&router, Method::GET, &item, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let stored = body_json(res).await;
    assert_eq!(stored["users"], json!({"id": user_id}));
    assert!(stored["movies"].is_null());

    let patch = json!({"id": rating_id, "rating": 4.5});
    let first = body_json(send(&router, Method::PATCH, &item, Some(patch.clone())).await).await;
    let second = body_json(send(&router, Method::PATCH, &item, Some(patch)).await).await;
    assert_eq!(first, second);
    let stored = body_json(send(&router, Method::GET, &item, None).await).await;
    assert_eq!(stored["rating"], 4.5);
    assert_eq!(stored["timestamp"], 964982703);
    assert_eq!(stored["users"], json!({"id": user_id}));

    let res = send(&router, Method::DELETE, &item, None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(total_ratings(&router).await, before);
    let res = send(&router, Method::GET, &item, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn undecodable_column_is_a_conversion_error() {
    let Some(db) = connect().await else {
        return;
    };
    let rows = db
        .fetch_all(&QueryBuf::statement(
            "SELECT 7::bigint AS e_id, 4.5::numeric AS e_rating, NULL::bigint AS e_timestamp",
        ))
        .await
        .unwrap();
    assert_eq!(rows[0].get("e_id"), Some(&RawValue::Int(7)));
    assert_eq!(rows[0].get("e_rating"), Some(&RawValue::Unsupported("numeric".into())));
    assert_eq!(rows[0].get("e_timestamp"), Some(&RawValue::Null));

    let err = map_entity::<Rating>(&rows[0], "e").unwrap_err();
    assert_eq!(err.column, "e_rating");
    assert_eq!(err.found, "unsupported numeric");
}
