pub mod github_client;
pub mod query;

pub use github_client::GitHubClient;
