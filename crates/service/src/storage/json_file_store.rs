use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use models::Site;
use tokio::fs;
use tracing::{debug, error};
use uuid::Uuid;

use super::SiteStore;
use crate::errors::ServiceError;

/// JSON file-backed site collection.
///
/// The file holds a pretty-printed JSON array of sites. Every call goes to
/// disk; there is no in-memory copy and no locking, so two concurrent
/// read-modify-write cycles can overwrite each other.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sites.json".to_string());
        self.file_path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
    }
}

#[async_trait]
impl SiteStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Site>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "sites file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                error!(path = %self.file_path.display(), error = %e, "error reading sites data");
                return Err(ServiceError::storage(format!("could not read sites data: {e}")));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "sites data is not a valid JSON array");
            ServiceError::storage(format!("could not parse sites data: {e}"))
        })
    }

    async fn save_all(&self, sites: &[Site]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(sites).map_err(ServiceError::storage)?;

        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }

        // 先写临时文件再 rename，避免读到半截文件
        let tmp = self.temp_path();
        if let Err(e) = fs::write(&tmp, &data).await {
            error!(path = %tmp.display(), error = %e, "error saving sites data");
            return Err(ServiceError::storage(format!("could not save sites data: {e}")));
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            error!(path = %self.file_path.display(), error = %e, "error replacing sites data");
            return Err(ServiceError::storage(format!("could not save sites data: {e}")));
        }
        debug!(path = %self.file_path.display(), count = sites.len(), "sites data saved");
        Ok(())
    }
}
