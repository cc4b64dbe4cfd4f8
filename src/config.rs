//! Runtime configuration
//!
//! Built once from the command line (and the environment variables clap is
//! told about) in `main`, then passed by reference. Nothing else in the crate
//! reads the process environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::cli::Cli;
use crate::html::Theme;

pub const DEFAULT_SERVICE: &str = "https://public.api.bsky.app";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Development,
    Production,
}

/// Credentials only carried in production mode.
#[derive(Clone, Default)]
pub struct Credentials {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("bearer_token", &redact(&self.bearer_token))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub handle: Option<String>,
    /// Base URL of the AppView answering `app.bsky.actor.getProfile`
    pub service_url: String,
    pub request_timeout: Duration,
    pub credentials: Option<Credentials>,
    pub output: PathBuf,
    pub theme: Theme,
    pub log_level: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let handle = cli
            .handle
            .map(|h| h.trim().trim_start_matches('@').to_string())
            .filter(|h| !h.is_empty());

        let credentials = match cli.mode {
            Mode::Production => Some(Credentials {
                consumer_key: cli.consumer_key,
                consumer_secret: cli.consumer_secret,
                bearer_token: cli.bearer_token,
            }),
            Mode::Development => None,
        };

        let output = cli
            .output
            .unwrap_or_else(|| default_output(handle.as_deref()));

        Self {
            mode: cli.mode,
            handle,
            service_url: cli.service.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(cli.timeout),
            credentials,
            output,
            theme: cli.theme,
            log_level: cli.log_level,
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.credentials
            .as_ref()
            .and_then(|c| c.bearer_token.as_deref())
    }
}

/// `<handle>.html` with anything outside `[A-Za-z0-9._-]` replaced, or
/// `error.html` when there is no handle to look up.
fn default_output(handle: Option<&str>) -> PathBuf {
    match handle {
        Some(handle) => {
            let name: String = handle
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            PathBuf::from(format!("{name}.html"))
        }
        None => PathBuf::from("error.html"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["skyage"];
        argv.extend_from_slice(args);
        Config::from_cli(Cli::parse_from(argv))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["alice.bsky.social", "--mode", "development"]);
        assert_eq!(config.handle.as_deref(), Some("alice.bsky.social"));
        assert_eq!(config.service_url, DEFAULT_SERVICE);
        assert_eq!(config.output, PathBuf::from("alice.bsky.social.html"));
        assert_eq!(config.theme, Theme::Light);
        assert!(config.credentials.is_none());
        assert!(config.bearer_token().is_none());
    }

    #[test]
    fn test_handle_is_normalised() {
        let config = parse(&["  @alice.bsky.social ", "--mode", "development"]);
        assert_eq!(config.handle.as_deref(), Some("alice.bsky.social"));
    }

    #[test]
    fn test_missing_handle_writes_error_page() {
        let config = parse(&["--mode", "development"]);
        assert!(config.handle.is_none());
        assert_eq!(config.output, PathBuf::from("error.html"));
    }

    #[test]
    fn test_output_name_is_sanitised() {
        assert_eq!(
            default_output(Some("../did:plc:abc")),
            PathBuf::from(".._did_plc_abc.html")
        );
    }

    #[test]
    fn test_production_carries_credentials() {
        let config = parse(&[
            "bob.test",
            "--mode",
            "production",
            "--bearer-token",
            "tok-9f3a",
            "--service",
            "https://example.test/",
        ]);
        assert_eq!(config.mode, Mode::Production);
        assert_eq!(config.bearer_token(), Some("tok-9f3a"));
        assert_eq!(config.service_url, "https://example.test");

        let debug = format!("{config:?}");
        assert!(!debug.contains("tok-9f3a"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_development_drops_credentials() {
        let config = parse(&["bob.test", "--mode", "development", "--bearer-token", "secret"]);
        assert!(config.bearer_token().is_none());
    }
}
