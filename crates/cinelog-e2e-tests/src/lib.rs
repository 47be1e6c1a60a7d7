pub mod rest;

use std::time::Duration;

use anyhow::{Result, anyhow};
use cinelog_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use reqwest::Url;
use tempfile::TempDir;
use tracing::debug;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

/// Keeps temporary data directory alive for the duration of test
pub struct ConfigGuard {
    data_dir: TempDir,
}

impl ConfigGuard {
    pub fn data_dir(&self) -> &std::path::Path {
        self.data_dir.path()
    }
}

pub fn test_config(test_name: &str, extra_args: &[&str]) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix(format!("{}_", test_name))?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let base_url = format!("http://127.0.0.1:{}", port);
    let mut args = vec![
        "cinelog-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
        "--base-url",
        &base_url,
    ];
    args.extend_from_slice(extra_args);
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    test_config(test_name, &[])
}

/// Starts server in background task and waits until it answers health check
pub async fn spawn_server(args: ServerConfig) -> Result<()> {
    let health_url = args.base_url.join("health")?;
    tokio::spawn(async move {
        if let Err(e) = cinelog_server::run(args).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let client = reqwest::Client::new();
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            Ok(response) => debug!("Server not ready: {}", response.status()),
            Err(e) => debug!("Server not ready: {e}"),
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    Err(anyhow!("Server did not start"))
}

pub async fn launch_env(args: ServerConfig) -> Result<(reqwest::Client, Url)> {
    let base_url = args.base_url.clone();
    spawn_server(args).await?;
    Ok((reqwest::Client::new(), base_url))
}

pub fn extend_url(base_url: &Url, path: &str) -> Url {
    base_url.join(path).unwrap_or_else(|_| base_url.clone())
}
