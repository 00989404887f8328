use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "https://sara-backend-gxr7.onrender.com";
const DEFAULT_CONFIG_PATH: &str = "config/saraos.toml";

/// Uplink settings resolved from the optional TOML file.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub endpoint: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    endpoint: Option<String>,
}

impl LinkConfig {
    /// Loads the config file. An explicit path must exist and parse; the
    /// default path falls back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return read_config(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        match read_config(default_path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("Configuration file not found; using defaults");
                Ok(Self::default())
            }
            Err(other) => Err(other),
        }
    }

    pub fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

fn read_config(path: &Path) -> Result<LinkConfig, ConfigError> {
    debug!(path = %path.display(), "Reading uplink configuration file");
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LinkConfig {
        endpoint: parsed.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static WORKDIR_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn returns_default_when_missing() {
        let _lock = WORKDIR_GUARD.lock().expect("lock guard");
        let original_dir = env::current_dir().expect("current dir");
        let temp = tempfile::tempdir().expect("tempdir");
        env::set_current_dir(temp.path()).expect("switch to temp dir");

        let config = LinkConfig::load(None).expect("load succeeds");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        env::set_current_dir(original_dir).expect("restore current dir");
    }

    #[test]
    fn reads_endpoint_override() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("saraos.toml");
        fs::write(&path, "endpoint = \"http://127.0.0.1:8000\"").expect("write");

        let config = LinkConfig::load(Some(&path)).expect("load config");
        assert_eq!(config.endpoint, "http://127.0.0.1:8000");
    }

    #[test]
    fn falls_back_to_default_endpoint_if_field_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("saraos.toml");
        fs::write(&path, "").expect("write");

        let config = LinkConfig::load(Some(&path)).expect("load");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");

        let err = LinkConfig::load(Some(&path)).expect_err("missing file errors");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_toml_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("saraos.toml");
        fs::write(&path, "endpoint = [not toml").expect("write");

        let err = LinkConfig::load(Some(&path)).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
