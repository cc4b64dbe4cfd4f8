use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_SERVICE, Mode};
use crate::html::Theme;

#[derive(Parser, Debug)]
#[command(name = "skyage")]
#[command(version)]
#[command(about = "Account age, anniversary and post milestones for a Bluesky profile")]
#[command(after_help = "\
Examples:
  skyage alice.bsky.social                 Write alice.bsky.social.html
  skyage alice.bsky.social --theme dark    Same page, dark palette
  skyage bob.test -o stats/bob.html        Choose the output file")]
pub struct Cli {
    /// Handle (or DID) of the profile to look up
    pub handle: Option<String>,

    /// Where to write the generated page
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Colour palette of the generated page
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Runtime mode; production also reads API credentials
    #[arg(long, value_enum, env = "SKYAGE_MODE", default_value_t = Mode::Development)]
    pub mode: Mode,

    /// AppView base URL
    #[arg(long, default_value = DEFAULT_SERVICE)]
    pub service: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "CONSUMER_KEY", hide_env_values = true, hide = true)]
    pub consumer_key: Option<String>,

    #[arg(long, env = "CONSUMER_SECRET", hide_env_values = true, hide = true)]
    pub consumer_secret: Option<String>,

    #[arg(long, env = "BEARER_TOKEN", hide_env_values = true, hide = true)]
    pub bearer_token: Option<String>,
}
