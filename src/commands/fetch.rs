use clap::ArgMatches;
use futures::{pin_mut, Stream, TryStreamExt};
use serde::Serialize;
use serde_json::json;

use crate::cli_context::CliContext;
use crate::config::load_config;
use crate::constants::{DEFAULT_PAGE_LIMIT, DEFAULT_RETRY_SCHEDULE};
use crate::error::{GitHubError, GitHubResult};
use crate::fetch::{fetch_issues, fetch_pull_requests, LabelMatcher};
use crate::formatting::{print_labeled_row, print_labeled_table, print_summary, LabeledRow};
use crate::models::{ItemKind, LabeledItem};

pub async fn handle_fetch(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = CliContext::load()?;
    let client = context.verified_client()?;

    let repo_arg = match matches.get_one::<String>("repo") {
        Some(value) => value.clone(),
        None => load_config().default_repo.ok_or_else(|| {
            GitHubError::InvalidInput(
                "No repository given and no default repository configured. \
                 Pass ORG/REPO or run 'ghlabel auth --default-repo ORG/REPO'."
                    .to_string(),
            )
        })?,
    };
    let (org, repo) = split_repo(&repo_arg)?;

    let matcher = if let Some(prefix) = matches.get_one::<String>("label-prefix") {
        LabelMatcher::prefix(prefix)
    } else if let Some(pattern) = matches.get_one::<String>("label-pattern") {
        LabelMatcher::pattern(pattern)?
    } else {
        return Err(GitHubError::InvalidInput(
            "Either --label-prefix or --label-pattern is required".to_string(),
        )
        .into());
    };

    let page_limit = match matches.get_one::<String>("page-limit") {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            GitHubError::InvalidInput(format!("Invalid page limit '{}'", raw))
        })?,
        None => DEFAULT_PAGE_LIMIT,
    };

    let schedule = match matches.get_one::<String>("retries") {
        Some(raw) => parse_schedule(raw)?,
        None => DEFAULT_RETRY_SCHEDULE.to_vec(),
    };

    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("simple");

    let want_issues = matches.get_flag("issues");
    let want_pulls = matches.get_flag("pulls");
    // Neither flag means both kinds.
    let (want_issues, want_pulls) = if want_issues || want_pulls {
        (want_issues, want_pulls)
    } else {
        (true, true)
    };

    if want_issues {
        let stream = fetch_issues(
            (*client).clone(),
            org,
            repo,
            |label: &str| matcher.matches(label),
            page_limit,
            schedule.clone(),
        );
        consume(stream, ItemKind::Issues, format).await?;
    }

    if want_pulls {
        let stream = fetch_pull_requests(
            (*client).clone(),
            org,
            repo,
            |label: &str| matcher.matches(label),
            page_limit,
            schedule.clone(),
        );
        consume(stream, ItemKind::PullRequests, format).await?;
    }

    Ok(())
}

async fn consume<T, S>(
    stream: S,
    kind: ItemKind,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>>
where
    T: LabeledItem + Serialize,
    S: Stream<Item = GitHubResult<(T, String)>>,
{
    pin_mut!(stream);

    let mut rows: Vec<LabeledRow> = Vec::new();
    let mut included = 0usize;

    while let Some((item, label)) = stream.try_next().await? {
        included += 1;
        match format {
            "json" => {
                // One JSON object per line so output can be piped into other tools.
                let record = json!({
                    "kind": kind.query_field(),
                    "label": label,
                    "item": item,
                });
                println!("{}", serde_json::to_string(&record)?);
            }
            "table" => rows.push(LabeledRow {
                number: item.number(),
                title: item.title().to_string(),
                label,
            }),
            _ => print_labeled_row(
                kind,
                &LabeledRow {
                    number: item.number(),
                    title: item.title().to_string(),
                    label,
                },
            ),
        }
    }

    if format == "table" {
        print_labeled_table(&rows);
    }

    if format == "json" {
        // Keep stdout machine-readable; summary goes to the side channel.
        eprintln!("Done {}: {} item(s) written", kind, included);
    } else {
        print_summary(kind, included);
    }

    Ok(())
}

fn split_repo(value: &str) -> GitHubResult<(&str, &str)> {
    match value.split_once('/') {
        Some((org, repo)) if !org.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((org, repo))
        }
        _ => Err(GitHubError::InvalidInput(format!(
            "Repository '{}' is not in the form 'org/repo'",
            value
        ))),
    }
}

fn parse_schedule(raw: &str) -> GitHubResult<Vec<u64>> {
    raw.split(',')
        .map(|part| {
            part.trim().parse::<u64>().map_err(|_| {
                GitHubError::InvalidInput(format!(
                    "Invalid retry schedule '{}': expected comma-separated whole seconds",
                    raw
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_repo_ok() {
        assert_eq!(split_repo("dotnet/runtime").unwrap(), ("dotnet", "runtime"));
    }

    #[test]
    fn test_split_repo_rejects_missing_slash() {
        assert!(split_repo("runtime").is_err());
    }

    #[test]
    fn test_split_repo_rejects_extra_segments() {
        assert!(split_repo("a/b/c").is_err());
        assert!(split_repo("/repo").is_err());
        assert!(split_repo("org/").is_err());
    }

    #[test]
    fn test_parse_schedule() {
        assert_eq!(parse_schedule("30,30,30").unwrap(), vec![30, 30, 30]);
        assert_eq!(parse_schedule("5, 10, 20").unwrap(), vec![5, 10, 20]);
        assert!(parse_schedule("5,x").is_err());
    }
}
