//! HTTP API Server for CASPER Studio
//!
//! Provides REST endpoints for browsing solver result files and for running the
//! solver through its execution script.

use crate::{
    config::{StudioConfig, DEFAULT_APP},
    core::Mode,
    error::Error,
    execution::{RunOutcome, RunRequest, SolverInvocation, SolverRunner},
    storage::ResultStore,
};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

/// Query parameters of `GET /api/results/files`
#[derive(Debug, Deserialize)]
pub struct FilesQuery {
    pub app: Option<String>,
    pub mode: Option<String>,
}

/// Query parameters of `GET /api/results`
#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    pub app: Option<String>,
    pub mode: Option<String>,
    pub file: Option<String>,
}

/// Response for listing applications
#[derive(Debug, Serialize)]
pub struct AppsResponse {
    pub apps: Vec<String>,
}

/// Response for listing result files
#[derive(Debug, Serialize)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Shared application state
pub struct AppState {
    pub store: ResultStore,
    pub runner: SolverRunner,
}

/// Error returned by handlers; rendered as `{ "error": message }`.
pub struct ApiError(pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        let body = Json(ErrorResponse { error: self.0.to_string() });
        (status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

/// Create the HTTP server with all routes
pub fn create_server(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/apps", get(list_apps))
        .route("/api/results/files", get(list_result_files))
        .route("/api/results", get(get_result))
        .route("/api/run", post(run_casper))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the shared state for a configuration
pub fn build_state(config: &StudioConfig) -> crate::Result<Arc<AppState>> {
    Ok(Arc::new(AppState {
        store: ResultStore::from_config(config),
        runner: SolverRunner::new(config)?,
    }))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(SuccessResponse { message: "CASPER Studio backend is running".to_string() })
}

/// GET /api/apps - List application directories
async fn list_apps(State(state): State<Arc<AppState>>) -> Result<Json<AppsResponse>, ApiError> {
    let apps = state.store.list_apps().await?;
    Ok(Json(AppsResponse { apps }))
}

/// GET /api/results/files - List result files of one app and mode
async fn list_result_files(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FilesQuery>, QueryRejection>,
) -> Result<Json<FilesResponse>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let (Some(app), Some(mode)) = (non_empty(query.app), non_empty(query.mode)) else {
        return Err(Error::InvalidRequest("Missing required query params: app, mode".to_string()).into());
    };

    let files = state.store.list_result_files(&app, &mode).await?;
    Ok(Json(FilesResponse { files }))
}

/// GET /api/results - Raw JSON of a result file, the latest one unless `file` is given
async fn get_result(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ResultQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let app = non_empty(query.app).unwrap_or_else(|| DEFAULT_APP.to_string());
    let mode = non_empty(query.mode).unwrap_or_else(|| Mode::Naive.to_string());
    let file = non_empty(query.file);

    let json = state.store.read_result_json(&app, &mode, file.as_deref()).await?;
    Ok(Json(json))
}

/// POST /api/run - Run the solver and report its outcome
async fn run_casper(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response, ApiError> {
    let request = RunRequest::from_body(&body)?;
    let invocation = SolverInvocation::try_from(request)?;
    info!(app = %invocation.app, mode = %invocation.mode, "Run requested");

    let outcome: RunOutcome = state.runner.run(invocation.args()).await?;
    let status = if outcome.success { StatusCode::OK } else { StatusCode::INTERNAL_SERVER_ERROR };
    Ok((status, Json(outcome)).into_response())
}

fn invalid_query(rejection: QueryRejection) -> ApiError {
    ApiError(Error::InvalidRequest(rejection.body_text()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Start the HTTP server on the specified address
pub async fn start_server(addr: &str, config: &StudioConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_server(build_state(config)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("CASPER backend listening on http://{}", addr);
    info!(root = %config.root.display(), script = %config.execution_script.display(), "Serving CASPER checkout");
    println!();
    println!("Available endpoints:");
    println!("  GET    /api/apps                         - List applications");
    println!("  GET    /api/results/files?app=&mode=     - List result files");
    println!("  GET    /api/results?app=&mode=&file=     - Get a result document");
    println!("  POST   /api/run                          - Run the CASPER solver");
    println!("  GET    /health                           - Health check");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}
