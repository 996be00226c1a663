use std::process;

use clap::{Arg, ArgAction, Command};

use ghlabel::commands::{handle_auth, handle_fetch, handle_whoami};
use ghlabel::logging::{get_log_file_path, init_logging, log_error};

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let app = Command::new("ghlabel")
        .about("ghlabel - Download labeled GitHub issues and pull requests")
        .version("0.3.0")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("auth")
                .about("Authenticate with GitHub")
                .arg(
                    Arg::new("token")
                        .long("token")
                        .value_name("TOKEN")
                        .help("Set your GitHub personal access token")
                        .required(false)
                )
                .arg(
                    Arg::new("default-repo")
                        .long("default-repo")
                        .value_name("ORG/REPO")
                        .help("Set the repository used when fetch is run without one")
                        .required(false)
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the current configuration (token is masked)")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("whoami")
                .about("Show the authenticated GitHub user")
        )
        .subcommand(
            Command::new("fetch")
                .about("Stream items that carry exactly one applicable label")
                .arg(
                    Arg::new("repo")
                        .value_name("ORG/REPO")
                        .help("Repository to download from (falls back to the configured default)")
                        .index(1)
                )
                .arg(
                    Arg::new("label-prefix")
                        .long("label-prefix")
                        .value_name("PREFIX")
                        .help("Case-insensitive prefix that marks a label as applicable")
                )
                .arg(
                    Arg::new("label-pattern")
                        .long("label-pattern")
                        .value_name("REGEX")
                        .help("Regex that marks a label as applicable")
                        .conflicts_with("label-prefix")
                )
                .arg(
                    Arg::new("issues")
                        .long("issues")
                        .help("Download issues (default: both kinds)")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("pulls")
                        .long("pulls")
                        .help("Download pull requests (default: both kinds)")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("page-limit")
                        .long("page-limit")
                        .value_name("N")
                        .help("Stop after this many pages per kind (default: 1000)")
                )
                .arg(
                    Arg::new("retries")
                        .long("retries")
                        .value_name("SECONDS,...")
                        .help("Retry delay schedule in seconds (default: 30,30,30)")
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .help("Output format: simple, table, json")
                        .default_value("simple")
                )
        );

    let matches = app.get_matches();

    let result = match matches.subcommand() {
        Some(("auth", sub_matches)) => handle_auth(sub_matches).await,
        Some(("whoami", sub_matches)) => handle_whoami(sub_matches).await,
        Some(("fetch", sub_matches)) => handle_fetch(sub_matches).await,
        _ => {
            eprintln!("Unknown command. Use 'ghlabel --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        log_error(&format!("{}", e));
        eprintln!("Error: {}", e);
        if let Some(path) = get_log_file_path() {
            eprintln!("Details logged to {}", path.display());
        }
        process::exit(1);
    }
}
