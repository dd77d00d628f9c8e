//! Request extractors with JSON error bodies.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::JsonApiError;

/// Like [`axum::Json`], but any rejection (bad content type, unparsable or
/// mistyped body) becomes a 400 [`JsonApiError`].
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "rejected request body");
                Err(JsonApiError::bad_request("Invalid JSON format in request body"))
            }
        }
    }
}
