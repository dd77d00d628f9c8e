use async_trait::async_trait;
use models::Site;
use tokio::sync::RwLock;

use super::SiteStore;
use crate::errors::ServiceError;

/// In-memory site collection, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Vec<Site>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_sites(sites: Vec<Site>) -> Self {
        Self { inner: RwLock::new(sites) }
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<Site>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save_all(&self, sites: &[Site]) -> Result<(), ServiceError> {
        *self.inner.write().await = sites.to_vec();
        Ok(())
    }
}
