use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{Site, SiteInput};

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::routes::AppState;

/// 列出全部站点（按插入顺序）
#[utoipa::path(
    get, path = "/sites", tag = "sites",
    responses(
        (status = 200, description = "All sites", body = [crate::openapi::SiteDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list_sites(State(state): State<AppState>) -> Result<Json<Vec<Site>>, JsonApiError> {
    state
        .sites
        .list()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "fetch sites"))
}

/// 创建站点，返回 201
#[utoipa::path(
    post, path = "/sites", tag = "sites",
    request_body = crate::openapi::SiteInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SiteDoc),
        (status = 400, description = "Missing fields or malformed body", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create_site(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SiteInput>,
) -> Result<(StatusCode, Json<Site>), JsonApiError> {
    state
        .sites
        .create(input)
        .await
        .map(|site| (StatusCode::CREATED, Json(site)))
        .map_err(|e| JsonApiError::from_service(e, "create site"))
}

/// 更新指定站点（id 保持不变）
#[utoipa::path(
    put, path = "/sites/{id}", tag = "sites",
    params(("id" = String, Path, description = "Site id")),
    request_body = crate::openapi::SiteInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SiteDoc),
        (status = 400, description = "Missing fields or malformed body", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update_site(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<SiteInput>,
) -> Result<Json<Site>, JsonApiError> {
    state
        .sites
        .update(&id, input)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "update site"))
}

/// 删除指定站点，成功返回 204 空响应
#[utoipa::path(
    delete, path = "/sites/{id}", tag = "sites",
    params(("id" = String, Path, description = "Site id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown id", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete_site(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state
        .sites
        .delete(&id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| JsonApiError::from_service(e, "delete site"))
}
