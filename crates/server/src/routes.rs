pub mod docs;
pub mod tuan;

use axum::http::Uri;
use axum::{routing::get, Json, Router};
use configs::Environment;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

use common::types::Health;

use crate::errors::ApiError;
use crate::state::AppState;

/// Prefix every table entry is nested under.
pub const API_PREFIX: &str = "/v1";

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn not_found(uri: Uri) -> ApiError {
    debug!(%uri, "no route");
    ApiError::not_found("Not found")
}

/// One mounted resource: a path prefix and the sub-router served under it.
#[derive(Clone, Copy)]
pub struct RouteEntry {
    pub path: &'static str,
    pub router: fn() -> Router<AppState>,
}

/// Ordered resource table. `development` entries are mounted only when the
/// configured environment is development.
#[derive(Clone)]
pub struct RouteTable {
    pub default: Vec<RouteEntry>,
    pub development: Vec<RouteEntry>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            default: vec![RouteEntry { path: "/Tuan", router: tuan::router }],
            development: vec![RouteEntry { path: "/docs", router: docs::router }],
        }
    }
}

impl RouteTable {
    /// Append a resource mounted in every environment.
    pub fn with_entry(mut self, entry: RouteEntry) -> Self {
        self.default.push(entry);
        self
    }

    /// Entries that will be mounted for `env`, in mount order.
    pub fn entries(&self, env: Environment) -> Vec<RouteEntry> {
        let mut entries = self.default.clone();
        if env.is_development() {
            entries.extend(self.development.iter().copied());
        }
        entries
    }

    /// Nest every entry for `env` under one router.
    pub fn mount(&self, env: Environment) -> Router<AppState> {
        self.entries(env)
            .into_iter()
            .fold(Router::new(), |api, entry| api.nest(entry.path, (entry.router)()))
    }
}

/// Build the full application router: `/health`, the table under `/v1`
/// and a JSON 404 for everything else.
pub fn build_router(state: AppState, table: &RouteTable, cors: CorsLayer) -> Router {
    let api = table.mount(state.env);

    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
