use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Default config file name, looked for in the working directory when no
/// `--config` path is given.
const CONFIG_FILE: &str = "roster.toml";

/// On-disk configuration.
///
/// ```toml
/// endpoint = "https://www.fictionalapi.xyz/endpoint"
/// timeout_secs = 10
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RosterConfig {
    /// Collection endpoint base URL.
    pub endpoint: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl RosterConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `roster.toml` from the working directory if present; a missing
    /// file is just the default config, a malformed one is an error.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = env::current_dir()
            .map(|dir| dir.join(CONFIG_FILE))
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE));
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RosterConfig};
    use std::io::Write;

    #[test]
    fn parses_both_fields() {
        let config: RosterConfig = toml::from_str(
            r#"
            endpoint = "https://example.test/endpoint"
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://example.test/endpoint")
        );
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn all_fields_are_optional() {
        let config: RosterConfig = toml::from_str("").unwrap();
        assert!(config.endpoint.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn load_reports_parse_errors_with_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = [not toml").unwrap();

        let err = RosterConfig::load(file.path()).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn load_reports_missing_files_as_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = RosterConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
