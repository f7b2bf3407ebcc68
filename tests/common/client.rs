//! Test client for the interaction endpoint.

use serde_json::json;

pub struct TestClient {
    http: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Send a command. Returns `None` when the bot answered 204.
    pub async fn command(&self, command: &str, args: &[&str]) -> anyhow::Result<Option<String>> {
        let resp = self
            .http
            .post(format!("{}/interactions", self.base_url))
            .json(&json!({ "command": command, "args": args, "user": "tester" }))
            .send()
            .await?
            .error_for_status()?;

        if resp.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body: serde_json::Value = resp.json().await?;
        match body["content"].as_str() {
            Some(content) => Ok(Some(content.to_string())),
            None => anyhow::bail!("reply without content: {body}"),
        }
    }

    /// Send a command that must be answered.
    pub async fn reply(&self, command: &str, args: &[&str]) -> String {
        self.command(command, args)
            .await
            .expect("request failed")
            .unwrap_or_else(|| panic!("no reply to {command}"))
    }

    pub async fn get_text(&self, path: &str) -> anyhow::Result<String> {
        Ok(self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?)
    }
}
