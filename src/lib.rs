// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod formatting;
pub mod logging;
pub mod models;

// Re-export commonly used items
pub use client::GitHubClient;
pub use config::{get_github_token, load_config, save_config, Config};
pub use error::{GitHubError, GitHubResult};
pub use fetch::{
    fetch_issues, fetch_pull_requests, paginate, LabelMatcher, RetryOutcome, RetryPolicy,
};
pub use models::*;
