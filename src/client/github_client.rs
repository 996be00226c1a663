use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::query::{items_query, items_variables};
use crate::constants::GITHUB_API_URL;
use crate::error::{GitHubError, GitHubResult};
use crate::models::graphql::ViewerData;
use crate::models::{LabeledItem, Page, RepositoryData, Viewer};

/// Thin GraphQL transport: one authenticated round trip per call, no retry.
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(token: &str) -> GitHubResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("ghlabel"));

        let bearer = HeaderValue::from_str(&format!("bearer {}", token))
            .map_err(|_| GitHubError::InvalidInput("token contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self { client })
    }

    async fn execute_query<T: for<'de> Deserialize<'de>>(
        &self,
        query: &str,
        variables: Value,
    ) -> GitHubResult<T> {
        let body = json!({ "query": query, "variables": variables });

        let response = self.client.post(GITHUB_API_URL).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(GitHubError::ApiError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let graphql_response: crate::models::GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = graphql_response.errors {
            let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            return Err(GitHubError::GraphQLError(messages.join(", ")));
        }

        graphql_response
            .data
            .ok_or_else(|| GitHubError::GraphQLError("No data returned from GraphQL query".to_string()))
    }

    /// Fetch one page of issues or pull requests, newest first.
    pub async fn items_page<T: LabeledItem>(
        &self,
        org: &str,
        repo: &str,
        after: Option<&str>,
        page_size: u32,
    ) -> GitHubResult<Page<T>> {
        let query = items_query(T::KIND, page_size);
        let variables = items_variables(org, repo, after);

        let data: RepositoryData<T> = self.execute_query(&query, variables).await?;

        data.repository
            .map(|r| r.items)
            .ok_or_else(|| GitHubError::GraphQLError(format!("Repository '{}/{}' not found", org, repo)))
    }

    /// Look up the login associated with the configured token.
    pub async fn viewer(&self) -> GitHubResult<Viewer> {
        let query = r#"
            query {
                viewer {
                    login
                }
            }
        "#;

        let data: ViewerData = self.execute_query(query, Value::Null).await?;
        Ok(data.viewer)
    }
}
