use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_FILE;
use crate::error::{GitHubError, GitHubResult};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub token: Option<String>,
    pub default_repo: Option<String>,
}

fn config_path() -> GitHubResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GitHubError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home.join(CONFIG_FILE))
}

pub fn load_config() -> Config {
    match config_path() {
        Ok(path) if path.exists() => {
            let content = fs::read_to_string(&path).unwrap_or_default();
            serde_json::from_str(&content).unwrap_or_default()
        }
        _ => Config::default(),
    }
}

pub fn save_config(config: &Config) -> GitHubResult<()> {
    let path = config_path()?;
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Resolve the GitHub token: `GITHUB_TOKEN` wins over the config file.
pub fn get_github_token() -> GitHubResult<String> {
    if let Ok(token) = env::var("GITHUB_TOKEN") {
        return Ok(token);
    }

    let config = load_config();
    if let Some(token) = config.token {
        return Ok(token);
    }

    Err(GitHubError::TokenNotFound)
}
