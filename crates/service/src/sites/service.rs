use std::sync::Arc;

use models::{Site, SiteInput};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::storage::SiteStore;

/// Application service for the site collection.
///
/// Each operation loads the full collection, transforms it in memory and
/// saves it back. Input is validated before the store is touched.
pub struct SiteService<S: SiteStore + ?Sized> {
    store: Arc<S>,
}

impl<S: SiteStore + ?Sized> Clone for SiteService<S> {
    fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: SiteStore + ?Sized> SiteService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    pub async fn list(&self) -> Result<Vec<Site>, ServiceError> {
        self.store.load_all().await
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: SiteInput) -> Result<Site, ServiceError> {
        let fields = input.validate()?;
        let mut sites = self.store.load_all().await?;
        let site = Site::create(fields);
        sites.push(site.clone());
        self.store.save_all(&sites).await?;
        info!(id = %site.id, count = sites.len(), "site_created");
        Ok(site)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: SiteInput) -> Result<Site, ServiceError> {
        let fields = input.validate()?;
        let mut sites = self.store.load_all().await?;
        let Some(existing) = sites.iter_mut().find(|s| s.id == id) else {
            warn!(%id, "site_update_unknown_id");
            return Err(ServiceError::not_found("Site", id));
        };
        existing.replace_fields(fields);
        let updated = existing.clone();
        self.store.save_all(&sites).await?;
        info!(%id, "site_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let sites = self.store.load_all().await?;
        if !sites.iter().any(|s| s.id == id) {
            warn!(%id, "site_delete_unknown_id");
            return Err(ServiceError::not_found("Site", id));
        }
        let remaining: Vec<Site> = sites.into_iter().filter(|s| s.id != id).collect();
        self.store.save_all(&remaining).await?;
        info!(%id, count = remaining.len(), "site_deleted");
        Ok(())
    }
}
