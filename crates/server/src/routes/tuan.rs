use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use service::pagination::{Page, QueryOptions};
use service::tuan::domain::{CreateTuanInput, TuanFilter, TuanView, UpdateTuanInput};

use crate::errors::ApiError;
use crate::state::AppState;

/// Query string accepted by the list endpoint; unknown keys are ignored.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact name match
    pub name: Option<String>,
    /// Exact role match (`user` or `admin`); other values match nothing
    pub role: Option<String>,
    /// e.g. `name:desc,createdAt:asc`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl ListQuery {
    /// Split into the entity filter and the list options.
    pub fn into_parts(self) -> (TuanFilter, QueryOptions) {
        let filter = TuanFilter { name: self.name, role: self.role };
        let options = QueryOptions { sort_by: self.sort_by, limit: self.limit, page: self.page };
        (filter, options)
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:tuanId", get(get_one).patch(update).delete(remove))
}

#[utoipa::path(
    post,
    path = "/v1/Tuan",
    tag = "tuan",
    request_body = crate::openapi::CreateTuanDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TuanDoc),
        (status = 400, description = "Email already taken or invalid field", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTuanInput>, JsonRejection>,
) -> Result<(StatusCode, Json<TuanView>), ApiError> {
    let Json(input) = payload?;
    let created = state.tuans.create(input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/v1/Tuan",
    tag = "tuan",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of results", body = crate::openapi::TuanPageDoc),
        (status = 400, description = "Malformed query option", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page<TuanView>>, ApiError> {
    let Query(query) = query?;
    let (filter, options) = query.into_parts();
    let page = state.tuans.query_list(filter, options).await?;
    Ok(Json(page.map(TuanView::from)))
}

#[utoipa::path(
    get,
    path = "/v1/Tuan/{tuanId}",
    tag = "tuan",
    params(("tuanId" = Uuid, Path, description = "Tuan id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::TuanDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Tuan not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_one(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TuanView>, ApiError> {
    let Path(id) = id?;
    let found = state.tuans.get_by_id(id).await?.ok_or_else(|| ApiError::not_found("Tuan not found"))?;
    Ok(Json(found.into()))
}

#[utoipa::path(
    patch,
    path = "/v1/Tuan/{tuanId}",
    tag = "tuan",
    params(("tuanId" = Uuid, Path, description = "Tuan id")),
    request_body = crate::openapi::UpdateTuanDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TuanDoc),
        (status = 400, description = "Email already taken or invalid field", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Tuan not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateTuanInput>, JsonRejection>,
) -> Result<Json<TuanView>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let updated = state.tuans.update_by_id(id, input).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/v1/Tuan/{tuanId}",
    tag = "tuan",
    params(("tuanId" = Uuid, Path, description = "Tuan id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Tuan not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.tuans.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_splits_filter_and_options() {
        let q = ListQuery {
            name: Some("A".into()),
            role: Some("admin".into()),
            sort_by: Some("name:desc".into()),
            limit: Some(5),
            page: None,
        };
        let (filter, options) = q.into_parts();
        assert_eq!(filter, TuanFilter { name: Some("A".into()), role: Some("admin".into()) });
        assert_eq!(options.sort_by.as_deref(), Some("name:desc"));
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.page, None);
    }

    #[test]
    fn unknown_role_filter_passes_through_unchanged() {
        let q = ListQuery { role: Some("manager".into()), ..Default::default() };
        let (filter, _) = q.into_parts();
        assert_eq!(filter.role.as_deref(), Some("manager"));
    }
}
