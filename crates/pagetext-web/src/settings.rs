//! Server settings resolved from CLI flags, environment and config file.
//!
//! Precedence is CLI flags > env vars > config file > defaults.

use std::time::Duration;

use pagetext_core::FetchConfig;
use pagetext_core::config_file::ConfigFile;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub fetch: FetchConfig,
}

impl Settings {
    /// Resolve settings. `env` looks up an environment variable by name so
    /// tests can supply their own.
    pub fn resolve(
        cli: Overrides,
        file: &ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let server = file.server.clone().unwrap_or_default();
        let fetch = file.fetch.clone().unwrap_or_default();

        let host = cli
            .host
            .or_else(|| env("PAGETEXT_HOST"))
            .or(server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli
            .port
            .or_else(|| env("PAGETEXT_PORT").and_then(|v| v.parse().ok()))
            .or(server.port)
            .unwrap_or(DEFAULT_PORT);
        let timeout = match cli
            .timeout_secs
            .or_else(|| env("PAGETEXT_TIMEOUT").and_then(|v| v.parse().ok()))
            .or(fetch.timeout_secs)
        {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(pagetext_core::DEFAULT_TIMEOUT),
        };
        let user_agent = fetch
            .user_agent
            .unwrap_or_else(pagetext_core::default_user_agent);

        Settings {
            host,
            port,
            fetch: FetchConfig {
                timeout,
                user_agent,
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
