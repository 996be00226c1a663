use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub token not found. Set GITHUB_TOKEN or run 'ghlabel auth' to configure.")]
    TokenNotFound,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("GraphQL error: {0}")]
    GraphQLError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl GitHubError {
    /// Whether this failure is worth retrying with the same request.
    ///
    /// Transient: connection, timeout, and body-transfer failures, plus
    /// non-success HTTP statuses. Everything else (bad credentials, schema
    /// mismatches, GraphQL-level errors) aborts immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            GitHubError::ApiError(_) => true,
            GitHubError::RequestError(e) => !e.is_decode(),
            _ => false,
        }
    }
}

pub type GitHubResult<T> = Result<T, GitHubError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> GitHubResult<T>;
    fn with_context<F>(self, f: F) -> GitHubResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> GitHubResult<T> {
        self.map_err(|e| GitHubError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> GitHubResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| GitHubError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> GitHubResult<T> {
        self.ok_or_else(|| GitHubError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> GitHubResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| GitHubError::Unknown(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_errors_are_transient() {
        let err = GitHubError::ApiError("HTTP error: 502 Bad Gateway".to_string());
        assert!(err.is_transient());
    }

    #[test]
    fn test_graphql_errors_are_fatal() {
        let err = GitHubError::GraphQLError("Could not resolve to a Repository".to_string());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_input_and_config_errors_are_fatal() {
        assert!(!GitHubError::InvalidInput("bad repo".to_string()).is_transient());
        assert!(!GitHubError::TokenNotFound.is_transient());
        assert!(!GitHubError::ConfigError("no home dir".to_string()).is_transient());
    }

    #[test]
    fn test_error_context_on_result() {
        let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let wrapped = result.context("Failed to read config file");
        match wrapped {
            Err(GitHubError::Unknown(msg)) => {
                assert!(msg.contains("Failed to read config file"));
                assert!(msg.contains("file not found"));
            }
            _ => panic!("Expected GitHubError::Unknown"),
        }
    }

    #[test]
    fn test_error_context_on_option() {
        let option: Option<String> = None;
        let result = option.context("token not found");

        match result {
            Err(GitHubError::Unknown(msg)) => assert_eq!(msg, "token not found"),
            _ => panic!("Expected GitHubError::Unknown"),
        }
    }
}
