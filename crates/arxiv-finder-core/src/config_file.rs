use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub arxiv: Option<ArxivConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArxivConfig {
    pub api_url: Option<String>,
    pub max_results: Option<usize>,
    pub timeout_secs: Option<u64>,
}

/// Platform config directory path: `<config_dir>/arxiv-finder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("arxiv-finder").join("config.toml"))
}

/// Load config by cascading CWD `.arxiv-finder.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".arxiv-finder.toml"));

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
        arxiv: Some(ArxivConfig {
            api_url: overlay
                .arxiv
                .as_ref()
                .and_then(|a| a.api_url.clone())
                .or_else(|| base.arxiv.as_ref().and_then(|a| a.api_url.clone())),
            max_results: overlay
                .arxiv
                .as_ref()
                .and_then(|a| a.max_results)
                .or_else(|| base.arxiv.as_ref().and_then(|a| a.max_results)),
            timeout_secs: overlay
                .arxiv
                .as_ref()
                .and_then(|a| a.timeout_secs)
                .or_else(|| base.arxiv.as_ref().and_then(|a| a.timeout_secs)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_deserializes() {
        let toml_str = "[arxiv]\nmax_results = 5\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert!(parsed.server.is_none());
        let arxiv = parsed.arxiv.unwrap();
        assert_eq!(arxiv.max_results, Some(5));
        assert!(arxiv.api_url.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            server: Some(ServerConfig {
                host: Some("0.0.0.0".to_string()),
                port: Some(8000),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            server: Some(ServerConfig {
                port: Some(9000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).server.unwrap();
        assert_eq!(merged.port, Some(9000));
        assert_eq!(merged.host.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            arxiv: Some(ArxivConfig {
                timeout_secs: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.arxiv.unwrap().timeout_secs, Some(5));
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8080\n[arxiv]\napi_url = \"http://localhost/q\"").unwrap();

        let config = load_from_path(file.path()).unwrap();
        assert_eq!(config.server.unwrap().port, Some(8080));
        assert_eq!(config.arxiv.unwrap().api_url.as_deref(), Some("http://localhost/q"));
    }

    #[test]
    fn load_from_path_missing_or_invalid() {
        assert!(load_from_path(Path::new("/nonexistent/arxiv-finder.toml")).is_none());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(load_from_path(file.path()).is_none());
    }
}
