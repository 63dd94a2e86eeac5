use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub code: u16, pub message: String }

/// Public Tuan representation; timestamps are not exposed.
#[derive(ToSchema, serde::Serialize)]
pub struct TuanDoc {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// `user` or `admin`
    pub role: String,
}

#[derive(ToSchema)]
pub struct CreateTuanDoc {
    pub name: String,
    pub email: String,
    /// defaults to `user`
    pub role: Option<String>,
}

/// At least one field is required.
#[derive(ToSchema)]
pub struct UpdateTuanDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(ToSchema, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TuanPageDoc {
    pub results: Vec<TuanDoc>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::tuan::create,
        crate::routes::tuan::list,
        crate::routes::tuan::get_one,
        crate::routes::tuan::update,
        crate::routes::tuan::remove,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            TuanDoc,
            CreateTuanDoc,
            UpdateTuanDoc,
            TuanPageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "tuan")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_tuan_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/Tuan"));
        assert!(doc.paths.paths.contains_key("/v1/Tuan/{tuanId}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
