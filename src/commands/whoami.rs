use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;

pub async fn handle_whoami(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = CliContext::load()?;
    let client = context.verified_client()?;

    let viewer = client.viewer().await?;
    println!("Logged in as {}", viewer.login.bright_blue().bold());

    Ok(())
}
