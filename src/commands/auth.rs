use clap::ArgMatches;
use colored::*;

use crate::client::GitHubClient;
use crate::config::{load_config, save_config};
use crate::error::{ErrorContext, GitHubError};

pub async fn handle_auth(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    if matches.get_flag("show") {
        let config = load_config();
        match config.token {
            Some(token) => println!("Token: {}", mask_token(&token)),
            None => println!("No token configured. Set one with 'ghlabel auth --token <TOKEN>'."),
        }
        match config.default_repo {
            Some(repo) => println!("Default repository: {}", repo),
            None => println!("No default repository configured."),
        }
        return Ok(());
    }

    let mut config = load_config();
    let mut changed = false;

    if let Some(token) = matches.get_one::<String>("token") {
        // Confirm the token works before persisting it.
        let client = GitHubClient::new(token)?;
        let viewer = client.viewer().await?;
        println!(
            "{} Authenticated as {}",
            "✓".green(),
            viewer.login.bright_blue().bold()
        );
        config.token = Some(token.clone());
        changed = true;
    }

    if let Some(repo) = matches.get_one::<String>("default-repo") {
        if !repo.contains('/') {
            return Err(GitHubError::InvalidInput(format!(
                "Repository '{}' is not in the form 'org/repo'",
                repo
            ))
            .into());
        }
        config.default_repo = Some(repo.clone());
        changed = true;
    }

    if changed {
        save_config(&config).context("Failed to save configuration")?;
        println!("{} Configuration saved", "✓".green());
    } else {
        println!("Nothing to do. See 'ghlabel auth --help' for options.");
    }

    Ok(())
}

fn mask_token(token: &str) -> String {
    if token.len() <= 8 {
        return "*".repeat(token.len());
    }
    match (token.get(..4), token.get(token.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{}...{}", head, tail),
        _ => "*".repeat(8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_long() {
        assert_eq!(mask_token("ghp_abcdefghijklmnop"), "ghp_...mnop");
    }

    #[test]
    fn test_mask_token_short() {
        assert_eq!(mask_token("abc"), "***");
    }
}
