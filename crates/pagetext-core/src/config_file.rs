use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub fetch: Option<FetchSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSection {
    /// Whole-request timeout; `0` disables it.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Platform config directory path: `<config_dir>/pagetext/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pagetext").join("config.toml"))
}

/// Load config by cascading CWD `.pagetext.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pagetext.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        server: Some(ServerConfig {
            host: overlay
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .or_else(|| base.server.as_ref().and_then(|s| s.host.clone())),
            port: overlay
                .server
                .as_ref()
                .and_then(|s| s.port)
                .or_else(|| base.server.as_ref().and_then(|s| s.port)),
        }),
        fetch: Some(FetchSection {
            timeout_secs: overlay
                .fetch
                .as_ref()
                .and_then(|f| f.timeout_secs)
                .or_else(|| base.fetch.as_ref().and_then(|f| f.timeout_secs)),
            user_agent: overlay
                .fetch
                .as_ref()
                .and_then(|f| f.user_agent.clone())
                .or_else(|| base.fetch.as_ref().and_then(|f| f.user_agent.clone())),
        }),
    }
}
