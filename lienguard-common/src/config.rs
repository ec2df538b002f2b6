//! Settings loading and resolution
//!
//! Values resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file location.
pub const CONFIG_ENV_VAR: &str = "LIENGUARD_CONFIG";
/// Environment variable overriding the URL cache file location.
pub const CACHE_FILE_ENV_VAR: &str = "LIENGUARD_CACHE_FILE";

const DEFAULT_CACHE_FILE: &str = "project_links.csv";
const DEFAULT_RESOLVER_BASE_URL: &str = "https://hts-texas.koretrax.com";

/// Raw TOML settings file shape. All fields optional; unset fields fall back
/// to compiled defaults at resolution time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    pub url_cache_file: Option<PathBuf>,
    pub resolver_base_url: Option<String>,
    pub notify_endpoint: Option<String>,
    pub test_recipient: Option<String>,
}

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Persisted URL cache (two-column CSV: Project Number, URL)
    pub url_cache_file: PathBuf,
    /// Base URL of the project-tracking site used for share-link resolution
    pub resolver_base_url: String,
    /// Webhook endpoint receiving per-leader notification payloads
    pub notify_endpoint: Option<String>,
    /// Recipient substituted for every leader while not live
    pub test_recipient: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url_cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            resolver_base_url: DEFAULT_RESOLVER_BASE_URL.to_string(),
            notify_endpoint: None,
            test_recipient: None,
        }
    }
}

impl Settings {
    /// Resolve settings from an optional explicit config path.
    ///
    /// The config file is located via CLI argument, then `LIENGUARD_CONFIG`,
    /// then the platform config directory. A missing file yields defaults; an
    /// unreadable or unparsable file is a configuration error.
    pub fn resolve(cli_config: Option<&Path>) -> Result<Self> {
        let file = match locate_config_file(cli_config) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                load_settings_file(&path)?
            }
            None => SettingsFile::default(),
        };

        let mut settings = Settings {
            url_cache_file: file
                .url_cache_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE)),
            resolver_base_url: file
                .resolver_base_url
                .unwrap_or_else(|| DEFAULT_RESOLVER_BASE_URL.to_string()),
            notify_endpoint: file.notify_endpoint,
            test_recipient: file.test_recipient,
        };

        // Env override beats the TOML value but not an explicit CLI flag
        // (callers apply CLI overrides after resolution).
        if let Ok(path) = std::env::var(CACHE_FILE_ENV_VAR) {
            settings.url_cache_file = PathBuf::from(path);
        }

        Ok(settings)
    }
}

fn locate_config_file(cli_config: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_config {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let default_path = dirs::config_dir().map(|d| d.join("lienguard").join("config.toml"))?;
    if default_path.exists() {
        Some(default_path)
    } else {
        None
    }
}

fn load_settings_file(path: &Path) -> Result<SettingsFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_config_present() {
        let settings = Settings::default();
        assert_eq!(settings.url_cache_file, PathBuf::from("project_links.csv"));
        assert!(settings.notify_endpoint.is_none());
    }

    #[test]
    fn explicit_config_file_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "url_cache_file = \"/tmp/links.csv\"\ntest_recipient = \"ops@example.com\""
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::resolve(Some(file.path())).unwrap();
        assert_eq!(settings.url_cache_file, PathBuf::from("/tmp/links.csv"));
        assert_eq!(settings.test_recipient.as_deref(), Some("ops@example.com"));
        // Unset values fall back to defaults
        assert_eq!(settings.resolver_base_url, DEFAULT_RESOLVER_BASE_URL);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "url_cache_file = [not toml").unwrap();
        file.flush().unwrap();

        let err = Settings::resolve(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
