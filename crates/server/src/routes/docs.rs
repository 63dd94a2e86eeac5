use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(openapi_json))
}

/// Generated OpenAPI document for the mounted resources.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
