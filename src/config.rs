//! Configuration loading and call-time credential resolution.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ReviveError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Gemini API key, preferring the environment variable.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY").ok().or_else(|| self.keys.gemini.clone())
    }
}

/// Resolves the transform service credential at call time.
///
/// The transformer queries this immediately before each outbound call rather
/// than caching a key at startup, so a rotated credential takes effect on the
/// next call without a restart.
pub trait CredentialProvider: Send + Sync {
    /// Resolve the current API key.
    ///
    /// # Errors
    ///
    /// Returns [`ReviveError::MissingApiKey`] if no key is available.
    fn api_key(&self) -> Result<String, ReviveError>;
}

/// Credential provider backed by the environment and the config file.
///
/// Re-reads both sources on every call.
#[derive(Debug)]
pub struct ConfigCredentials {
    config_path: PathBuf,
}

impl ConfigCredentials {
    /// Create a provider that re-reads the config file at the given path.
    #[must_use]
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }
}

impl CredentialProvider for ConfigCredentials {
    fn api_key(&self) -> Result<String, ReviveError> {
        let config = Config::load(&self.config_path).map_err(ReviveError::Config)?;
        config.gemini_key().ok_or(ReviveError::MissingApiKey {
            provider: "Gemini".into(),
            env_var: "GEMINI_API_KEY".into(),
        })
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `REVIVER_CONFIG` environment variable
/// 3. `~/.config/reviver/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("REVIVER_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/reviver/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/reviver/config.toml")
    } else {
        PathBuf::from("reviver.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_key() {
        let config = Config::default();
        assert!(config.keys.gemini.is_none());
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert!(config.keys.gemini.is_none());
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("reviver_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
gemini = "test-gemini-key"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.gemini.as_deref(), Some("test-gemini-key"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("reviver_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn credentials_see_config_changes_between_calls() {
        let dir = std::env::temp_dir().join("reviver_cred_rotate_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[keys]\ngemini = \"key-one\"\n").unwrap();

        std::env::remove_var("GEMINI_API_KEY");
        let provider = ConfigCredentials::new(path.clone());
        assert_eq!(provider.api_key().unwrap(), "key-one");

        // Rotate the key on disk; the same provider must pick it up.
        std::fs::write(&path, "[keys]\ngemini = \"key-two\"\n").unwrap();
        assert_eq!(provider.api_key().unwrap(), "key-two");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn credentials_missing_key_errors() {
        std::env::remove_var("GEMINI_API_KEY");
        let provider = ConfigCredentials::new(PathBuf::from("/nonexistent/config.toml"));
        assert!(matches!(provider.api_key(), Err(ReviveError::MissingApiKey { .. })));
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
