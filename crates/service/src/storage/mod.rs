//! Storage abstractions for the site collection
//!
//! The collection is persisted as one unit: callers load all records, mutate
//! them in memory and hand the full sequence back.

use async_trait::async_trait;
use models::Site;

use crate::errors::ServiceError;

pub mod json_file_store;
pub mod memory_store;

/// Whole-collection persistence. Implementations hold no cache between calls.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Read the persisted collection. An absent backing store is an empty collection.
    async fn load_all(&self) -> Result<Vec<Site>, ServiceError>;
    /// Overwrite the persisted collection with `sites`.
    async fn save_all(&self, sites: &[Site]) -> Result<(), ServiceError>;
}
