use std::sync::Arc;

use axum::{
    routing::{get, put},
    Json, Router,
};
use common::types::Health;
use service::{sites::SiteService, storage::SiteStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;

pub mod sites;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub sites: SiteService<dyn SiteStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SiteStore>) -> Self {
        Self { sites: SiteService::new(store) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/sites", get(sites::list_sites).post(sites::create_site))
        .route("/sites/:id", put(sites::update_site).delete(sites::delete_site))
}

/// Build the full application router.
/// Site routes are served both at the root and under `/api`.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json))
        .merge(site_routes())
        .nest("/api", site_routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
