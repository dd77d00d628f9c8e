use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteDoc {
    pub id: String,
    pub name: String,
    pub link: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteInputDoc {
    pub name: String,
    pub link: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc { pub error: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::sites::list_sites,
        crate::routes::sites::create_site,
        crate::routes::sites::update_site,
        crate::routes::sites::delete_site,
    ),
    components(
        schemas(
            HealthResponse,
            SiteDoc,
            SiteInputDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "sites")
    )
)]
pub struct ApiDoc;
