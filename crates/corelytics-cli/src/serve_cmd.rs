use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use corelytics_core::intent::IntentRequest;
use corelytics_core::{CoreError, Engine, ErrorKind, GeneratedEmail};

/// Slack between the generate deadline and the outer timeout layer.
const LAYER_GRACE: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    kind: &'static str,
    detail: String,
    /// Extra fields merged into the body next to `kind`.
    fields: serde_json::Map<String, serde_json::Value>,
}

impl AppError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: ErrorKind::Validation.as_str(),
            detail: detail.into(),
            fields: serde_json::Map::new(),
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self::timed_out(format!(
            "email generation did not finish within {}s",
            after.as_secs()
        ))
    }

    fn timed_out(detail: String) -> Self {
        Self {
            status: StatusCode::REQUEST_TIMEOUT,
            kind: "timeout",
            detail,
            fields: serde_json::Map::new(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Generation => StatusCode::BAD_GATEWAY,
            ErrorKind::Load => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let mut fields = serde_json::Map::new();
        if let CoreError::NotFound(nf) = &err {
            fields.insert("level".into(), serde_json::json!(nf.level));
            fields.insert("label".into(), serde_json::json!(nf.label));
            fields.insert("available".into(), serde_json::json!(nf.available));
        }
        Self {
            status,
            kind: kind.as_str(),
            detail: err.to_string(),
            fields,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.status.is_server_error() {
            tracing::error!(kind = self.kind, "request failed: {}", self.detail);
        } else {
            tracing::warn!(kind = self.kind, "request rejected: {}", self.detail);
        }
        let mut body = self.fields;
        body.insert("status".into(), "error".into());
        body.insert("kind".into(), self.kind.into());
        body.insert("detail".into(), self.detail.into());
        body.insert("status_code".into(), self.status.as_u16().into());
        (self.status, Json(serde_json::Value::Object(body))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the listing routes. Absent parameters reach the
/// engine as empty strings and are reported as validation errors.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathQuery {
    pub domain: String,
    pub recipient: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub data: Vec<String>,
    pub count: usize,
    #[serde(rename = "hasScenarios", skip_serializing_if = "Option::is_none")]
    pub has_scenarios: Option<bool>,
}

impl ListResponse {
    fn new(data: Vec<String>) -> Self {
        Self {
            status: "success",
            domain: None,
            recipient: None,
            category: None,
            count: data.len(),
            data,
            has_scenarios: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub result: GeneratedEmail,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    engine: Engine,
    generate_timeout: Duration,
}

pub fn build_router(engine: Engine, request_timeout: Duration) -> Router {
    let state = AppState {
        engine,
        generate_timeout: request_timeout,
    };
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/domains", get(list_domains))
        .route("/recipients", get(list_recipients))
        .route("/categories", get(list_categories))
        .route("/scenarios", get(list_scenarios))
        .route("/generate", post(generate))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout + LAYER_GRACE,
        ))
        .layer(middleware::map_response(timeout_error_body))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Give the bare 408 from [`TimeoutLayer`] the same JSON shape as handler
/// errors. Responses that already carry a body type pass through.
async fn timeout_error_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(CONTENT_TYPE)
    {
        return AppError::timed_out("request did not finish in time".to_string()).into_response();
    }
    response
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(
    engine: Engine,
    bind: &str,
    port: u16,
    request_timeout: Duration,
) -> Result<()> {
    let app = build_router(engine, request_timeout);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("corelytics serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("corelytics serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "Corelytics API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "domains": state.engine.domains().len(),
    }))
}

async fn list_domains(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse::new(state.engine.domains()))
}

async fn list_recipients(
    State(state): State<AppState>,
    Query(q): Query<PathQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let data = state.engine.recipients(&q.domain)?;
    Ok(Json(ListResponse {
        domain: Some(q.domain),
        ..ListResponse::new(data)
    }))
}

async fn list_categories(
    State(state): State<AppState>,
    Query(q): Query<PathQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let data = state.engine.categories(&q.domain, &q.recipient)?;
    Ok(Json(ListResponse {
        domain: Some(q.domain),
        recipient: Some(q.recipient),
        ..ListResponse::new(data)
    }))
}

async fn list_scenarios(
    State(state): State<AppState>,
    Query(q): Query<PathQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let listing = state
        .engine
        .scenarios(&q.domain, &q.recipient, &q.category)?;
    Ok(Json(ListResponse {
        domain: Some(q.domain),
        recipient: Some(q.recipient),
        category: Some(q.category),
        has_scenarios: Some(listing.has_scenarios),
        ..ListResponse::new(listing.scenarios)
    }))
}

async fn generate(
    State(state): State<AppState>,
    body: Result<Json<IntentRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::bad_request(e.body_text()))?;
    let result = tokio::time::timeout(state.generate_timeout, state.engine.generate(&request))
        .await
        .map_err(|_| AppError::timeout(state.generate_timeout))??;
    Ok(Json(GenerateResponse {
        status: "success",
        result,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
