//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare storage
//! through `service::runtime` alone.

use std::path::Path;

/// Ensure the directory that will hold the sites file exists.
pub async fn ensure_env(data_file: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_file).await
}
