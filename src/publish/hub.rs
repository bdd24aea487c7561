//! Hugging Face Hub repository API client

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{header, Client, StatusCode};
use serde_json::json;

/// What `create_space` found on the Hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceStatus {
    Created,
    Existing,
}

/// Authenticated client for the Hub repository endpoints
pub struct HubClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl HubClient {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tourism/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Create the Space, or accept it if it already exists
    pub async fn create_space(
        &self,
        repo_id: &str,
        sdk: &str,
        private: bool,
    ) -> Result<SpaceStatus> {
        let (organization, name) = split_repo_id(repo_id)?;
        let body = json!({
            "type": "space",
            "name": name,
            "organization": organization,
            "sdk": sdk,
            "private": private,
        });

        let response = self
            .client
            .post(self.url("api/repos/create"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;

        match response.status() {
            StatusCode::CONFLICT => Ok(SpaceStatus::Existing),
            status if status.is_success() => Ok(SpaceStatus::Created),
            status => {
                let text = response.text().await.unwrap_or_default();
                bail!("Creating Space {} failed ({}): {}", repo_id, status, text.trim())
            }
        }
    }

    /// Upload one file as its own commit
    pub async fn upload_file(
        &self,
        repo_id: &str,
        revision: &str,
        path_in_repo: &str,
        content: &[u8],
    ) -> Result<()> {
        let header_line = json!({
            "key": "header",
            "value": {
                "summary": format!("Upload {} with tourism publish", path_in_repo),
                "description": "",
            },
        });
        let file_line = json!({
            "key": "file",
            "value": {
                "content": STANDARD.encode(content),
                "path": path_in_repo,
                "encoding": "base64",
            },
        });
        let body = format!("{}\n{}\n", header_line, file_line);

        let url = self.url(&format!("api/spaces/{}/commit/{}", repo_id, revision));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header(header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("Uploading {} failed ({}): {}", path_in_repo, status, text.trim());
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }
}

/// Split `namespace/name`
fn split_repo_id(repo_id: &str) -> Result<(&str, &str)> {
    match repo_id.split_once('/') {
        Some((org, name)) if !org.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((org, name))
        }
        _ => Err(anyhow!(
            "Space id must look like namespace/name, got {:?}",
            repo_id
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_repo_id() {
        assert_eq!(
            split_repo_id("cktai/tourism-wellness-predictor").unwrap(),
            ("cktai", "tourism-wellness-predictor")
        );
        assert!(split_repo_id("predictor").is_err());
        assert!(split_repo_id("/predictor").is_err());
        assert!(split_repo_id("a/b/c").is_err());
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let client = HubClient::new("http://localhost:9000/", "t").unwrap();
        assert_eq!(client.url("api/repos/create"), "http://localhost:9000/api/repos/create");
    }
}
