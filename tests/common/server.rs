//! Test server management.
//!
//! Spawns and manages faceit-tracker instances for integration testing.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// Storage backend for a spawned bot.
#[derive(Debug, Clone, Copy)]
pub enum Storage {
    Memory,
    Sqlite,
}

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    data_dir: TempDir,
}

/// Reserve a free local port.
fn free_port() -> anyhow::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

fn write_config(dir: &Path, port: u16, profile_api: &str, storage: Storage) -> anyhow::Result<PathBuf> {
    let storage_section = match storage {
        Storage::Memory => "backend = \"memory\"".to_string(),
        Storage::Sqlite => format!(
            "backend = \"sqlite\"\npath = \"{}\"",
            dir.join("tracker.db").display()
        ),
    };
    let config = format!(
        r#"
[bot]
name = "test-tracker"

[faceit]
base_url = "{profile_api}"
game = "cs2"
timeout_secs = 2

[http]
listen = "127.0.0.1:{port}"
metrics = true

[storage]
{storage_section}
"#
    );
    let path = dir.join("config.toml");
    std::fs::write(&path, config)?;
    Ok(path)
}

impl TestServer {
    /// Spawn the bot pointed at `profile_api`.
    pub async fn spawn(profile_api: &str, storage: Storage) -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        Self::spawn_in(data_dir, profile_api, storage).await
    }

    /// Spawn the bot using an existing data directory, e.g. to test restarts.
    pub async fn spawn_in(
        data_dir: TempDir,
        profile_api: &str,
        storage: Storage,
    ) -> anyhow::Result<Self> {
        let port = free_port()?;
        let config_path = write_config(data_dir.path(), port, profile_api, storage)?;

        let child = Command::new(env!("CARGO_BIN_EXE_faceit-tracker"))
            .arg(&config_path)
            .env("FACEIT_API_KEY", super::stub::API_KEY)
            .env("RUST_LOG", "warn")
            .spawn()?;

        let server = Self {
            child,
            port,
            data_dir,
        };

        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the health endpoint answers.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        let url = format!("{}/", self.base_url());
        for _ in 0..50 {
            if let Ok(resp) = reqwest::get(&url).await
                && resp.status().is_success()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Create a client for this server.
    pub fn client(&self) -> super::client::TestClient {
        super::client::TestClient::new(self.base_url())
    }

    /// Kill the process and hand back its data directory.
    pub fn stop(mut self) -> TempDir {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let dir = tempfile::tempdir().expect("placeholder tempdir");
        std::mem::replace(&mut self.data_dir, dir)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
