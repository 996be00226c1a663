use std::sync::Arc;

use crate::client::GitHubClient;
use crate::config::get_github_token;
use crate::error::{GitHubError, GitHubResult};

/// Central context for CLI operations, managing the token and client handle
pub struct CliContext {
    token: Option<String>,
    client: Option<Arc<GitHubClient>>,
}

impl CliContext {
    /// Load context from the environment and saved configuration
    pub fn load() -> GitHubResult<Self> {
        let token = get_github_token().ok();
        Ok(Self {
            token,
            client: None,
        })
    }

    /// Get or create an authenticated client (requires a token)
    pub fn verified_client(&mut self) -> GitHubResult<Arc<GitHubClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let token = self.token.as_ref().ok_or(GitHubError::TokenNotFound)?;
        let client = Arc::new(GitHubClient::new(token)?);
        self.client = Some(client.clone());
        Ok(client)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}
