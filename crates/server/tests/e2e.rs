use std::net::SocketAddr;
use std::path::PathBuf;

use common::client::{ClientError, SitesClient};
use configs::AppConfig;
use models::SiteInput;
use reqwest::StatusCode as HttpStatusCode;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_file: PathBuf,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestApp {
    /// Signal shutdown and wait until the server has drained.
    async fn stop(self) -> anyhow::Result<PathBuf> {
        let _ = self.shutdown.send(());
        self.handle.await??;
        Ok(self.data_file)
    }

    async fn cleanup(self) {
        let _ = self.shutdown.send(());
        let _ = self.handle.await;
        if let Some(dir) = self.data_file.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use isolated temp files for the sites store per test run
    let data_file = std::env::temp_dir()
        .join(format!("site_dashboard_e2e_{}", Uuid::new_v4()))
        .join("sites.json");
    let mut cfg = AppConfig::default();
    cfg.storage.data_file = data_file.clone();
    cfg.normalize_and_validate()?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (shutdown, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        server::startup::serve(listener, &cfg, async {
            let _ = rx.await;
        })
        .await
    });

    Ok(TestApp { base_url, data_file, shutdown, handle })
}

#[tokio::test]
async fn e2e_client_crud_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = SitesClient::new(&app.base_url);

    // first run: no file yet
    assert!(client.fetch_sites().await?.is_empty());

    let a = client.add_site(&SiteInput::new("Rust", "https://www.rust-lang.org", "language")).await?;
    let b = client
        .add_site(&SiteInput::new("Docs", "https://docs.rs", "crate docs").with_thumbnail("https://docs.rs/favicon.ico"))
        .await?;
    assert_ne!(a.id, b.id);

    let sites = client.fetch_sites().await?;
    assert_eq!(sites.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec![a.id.as_str(), b.id.as_str()]);

    let updated = client.update_site(&a.id, &SiteInput::new("Rust Lang", "https://www.rust-lang.org", "language")).await?;
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.name, "Rust Lang");

    client.delete_site(&b.id).await?;
    let sites = client.fetch_sites().await?;
    assert_eq!(sites, vec![updated.clone()]);

    // persisted as a pretty JSON array on disk
    let raw = tokio::fs::read_to_string(&app.data_file).await?;
    let on_disk: Vec<models::Site> = serde_json::from_str(&raw)?;
    assert_eq!(on_disk, vec![updated]);
    assert!(raw.contains("\n  {"));

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_client_surfaces_error_messages() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = SitesClient::new(&app.base_url);

    match client.delete_site("unknown").await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, HttpStatusCode::NOT_FOUND);
            assert_eq!(message, "Site with ID unknown not found");
        }
        other => panic!("expected 404, got {other:?}"),
    }

    match client.add_site(&SiteInput { name: None, ..SiteInput::new("", "https://x", "d") }).await {
        Err(ClientError::Status { status, .. }) => assert_eq!(status, HttpStatusCode::BAD_REQUEST),
        other => panic!("expected 400, got {other:?}"),
    }

    // nothing was written by the failed calls
    assert!(tokio::fs::metadata(&app.data_file).await.is_err());

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_shutdown_drains_and_keeps_data() -> anyhow::Result<()> {
    let app = start_server().await?;
    let base_url = app.base_url.clone();
    let client = SitesClient::new(&base_url);

    let created = client.add_site(&SiteInput::new("Rust", "https://www.rust-lang.org", "language")).await?;

    let data_file = app.stop().await?;

    // listener is gone once serve returns
    assert!(reqwest::get(format!("{base_url}/health")).await.is_err());

    let raw = tokio::fs::read_to_string(&data_file).await?;
    let on_disk: Vec<models::Site> = serde_json::from_str(&raw)?;
    assert_eq!(on_disk, vec![created]);

    if let Some(dir) = data_file.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
    Ok(())
}
