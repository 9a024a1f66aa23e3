use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Body served by `/truncated`: the start of an object that never closes.
pub const TRUNCATED_BODY: &str = r#"{"a":"#;

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body_len: usize,
}

pub fn app() -> Router {
    Router::new()
        .route("/object", get(object))
        .route("/array", get(array))
        .route("/scalar", get(scalar))
        .route("/truncated", get(truncated))
        .route("/empty", get(empty))
        .route("/echo", any(echo))
        .route("/redirect", get(redirect))
        .route("/status/{code}", get(status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn object() -> Json<Value> {
    Json(json!({ "a": 1 }))
}

async fn array() -> Json<Value> {
    Json(json!([1, 2, 3]))
}

async fn scalar() -> Json<Value> {
    Json(json!(42))
}

async fn truncated() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], TRUNCATED_BODY)
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

/// 302 to `/object` with an empty body.
async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/object")])
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(Echo {
        method: method.to_string(),
        content_type: header_text(header::CONTENT_TYPE),
        accept: header_text(header::ACCEPT),
        body_len: body.len(),
    })
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(json!({ "status": code }))))
}
