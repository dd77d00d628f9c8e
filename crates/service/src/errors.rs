use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self { Self::NotFound(format!("{} with ID {} not found", entity, id)) }

    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }

    /// Errors caused by the caller's input rather than the server.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}
