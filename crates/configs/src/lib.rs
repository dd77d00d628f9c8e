use std::{io::ErrorKind, path::PathBuf};

use anyhow::Result;
use anyhow::anyhow;
use serde::Deserialize;

pub const DEFAULT_DATA_FILE: &str = "data/sites.json";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_data_file() -> PathBuf { PathBuf::from(DEFAULT_DATA_FILE) }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// config.toml 优先；仅当文件不存在时退回环境变量
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_lookup(&config_path(), |k| std::env::var(k).ok())
    }

    /// Load `path`, or build from `lookup` when the file does not exist.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_lookup<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => Self::from_lookup(lookup),
            Err(e) => return Err(e.context(format!("failed to load config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `SITES_DATA_FILE`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(host) = lookup("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Some(file) = lookup("SITES_DATA_FILE") {
            cfg.storage.data_file = PathBuf::from(file);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) -> Result<()> {
        let raw = self.data_file.to_string_lossy().into_owned();
        if raw.trim().is_empty() {
            self.data_file = default_data_file();
        } else if raw.ends_with('/') || raw.ends_with('\\') {
            return Err(anyhow!("storage.data_file 必须是文件路径而不是目录: {}", raw));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_full_file() -> Result<()> {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [storage]
            data_file = "/var/lib/dashboard/sites.json"
            "#,
        )?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.data_file, PathBuf::from("/var/lib/dashboard/sites.json"));
        Ok(())
    }

    #[test]
    fn missing_sections_use_defaults() -> Result<()> {
        let mut cfg = parse("")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        Ok(())
    }

    #[test]
    fn normalize_fills_blanks_and_rejects_bad_values() {
        let mut cfg = parse("[server]\nhost = \" \"\nport = 8081\nworker_threads = 0\n[storage]\ndata_file = \"\"\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_file, PathBuf::from(DEFAULT_DATA_FILE));

        let mut zero_port = parse("[server]\nport = 0\n").unwrap();
        assert!(zero_port.normalize_and_validate().is_err());

        let mut dir = parse("[storage]\ndata_file = \"data/\"\n").unwrap();
        assert!(dir.normalize_and_validate().is_err());
    }

    fn tmp_config(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("configs_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_lookup() -> Result<()> {
        let path = std::env::temp_dir().join(format!("configs_missing_{}.toml", uuid::Uuid::new_v4()));
        let cfg = AppConfig::load_or_lookup(path.to_str().unwrap(), |k| {
            (k == "SITES_DATA_FILE").then(|| "/tmp/fallback.json".to_string())
        })?;
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.storage.data_file, PathBuf::from("/tmp/fallback.json"));
        Ok(())
    }

    #[test]
    fn broken_file_is_an_error_not_a_fallback() {
        let path = tmp_config("[server]\nport = \"not-a-port\"\n[storage]\ndata_file = \"/srv/prod/sites.json\"\n");
        let res = AppConfig::load_or_lookup(path.to_str().unwrap(), |_| None);
        let _ = std::fs::remove_file(&path);
        let err = res.unwrap_err();
        assert!(err.to_string().contains("failed to load config file"));
    }

    #[test]
    fn existing_file_wins_over_lookup() -> Result<()> {
        let path = tmp_config("[server]\nport = 9100\n[storage]\ndata_file = \"/srv/prod/sites.json\"\n");
        let res = AppConfig::load_or_lookup(path.to_str().unwrap(), |_| Some("3000".to_string()));
        let _ = std::fs::remove_file(&path);
        let cfg = res?;
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.storage.data_file, PathBuf::from("/srv/prod/sites.json"));
        Ok(())
    }

    #[test]
    fn env_lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "3000"),
            ("TOKIO_WORKER_THREADS", "not-a-number"),
            ("SITES_DATA_FILE", "/tmp/sites.json"),
        ]
        .into_iter()
        .collect();
        let cfg = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_file, PathBuf::from("/tmp/sites.json"));
    }
}
