use std::collections::BTreeMap;

use axum::extract::Request;
use axum::http::header::HOST;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::cors::cors;
use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/ping", get(ping))
        .route("/translate", post(handlers::translate))
        .fallback(not_found)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Echo back what the server saw of the request.
async fn ping(request: Request) -> Json<Value> {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in request.headers() {
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.to_string()))
        .unwrap_or_default();

    Json(json!({
        "message": "pong",
        "headers": headers,
        "host": host,
        "proto": format!("{:?}", request.version()),
    }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not Found"})))
}
