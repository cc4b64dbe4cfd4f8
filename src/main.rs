mod age;
mod bsky;
mod cli;
mod config;
mod error;
mod format;
mod html;
mod logging;
mod milestone;
mod stats;

use std::process::ExitCode;

use anyhow::{Context, Result};
use bsky::BlueskyClient;
use chrono::Utc;
use clap::Parser;
use config::Config;
use stats::ProfileStats;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_cli(cli::Cli::parse());
    logging::init(&config.log_level);
    info!(mode = ?config.mode, service = %config.service_url, "starting");
    debug!(?config, "configuration loaded");

    let (page, code) = match &config.handle {
        Some(handle) => match lookup(&config, handle).await {
            Ok(stats) => (html::render_profile_page(&stats, config.theme), ExitCode::SUCCESS),
            Err(e) => {
                warn!(handle = %handle, error = %e, "profile lookup failed");
                (html::render_error_page(&e.to_string(), config.theme), ExitCode::FAILURE)
            }
        },
        None => {
            warn!("no handle given");
            (
                html::render_error_page("You need to specify a handle", config.theme),
                ExitCode::FAILURE,
            )
        }
    };

    html::write_page(&config.output, &page)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    info!(output = %config.output.display(), "page written");

    Ok(code)
}

async fn lookup(config: &Config, handle: &str) -> error::Result<ProfileStats> {
    let client = BlueskyClient::new(config)?;
    let profile = client.get_profile(handle).await?;
    debug!(did = %profile.did, "profile found");

    let stats = ProfileStats::compute(&profile, Utc::now())?;
    info!(
        handle = %stats.handle,
        age = %stats.age,
        posts = stats.post_count,
        next_milestone = stats.next_milestone,
        "stats computed"
    );

    Ok(stats)
}
