use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

/// Contents of ~/.techscout/settings.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub poll_interval: Duration,
}

impl Settings {
    /// Load from ~/.techscout/settings.json. Returns None if file missing or invalid.
    pub fn load() -> Option<Self> {
        let path = techscout_config_path("settings.json").ok()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring invalid settings: {e}");
                None
            }
        }
    }
}

impl ApiConfig {
    /// Settings file first, then env, then defaults.
    pub fn load() -> Self {
        Self::resolve(Settings::load().unwrap_or_default(), |key| std::env::var(key).ok())
    }

    /// Merge a settings file with an environment lookup. Non-empty settings win.
    pub fn resolve(settings: Settings, env: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = if !settings.base_url.is_empty() {
            settings.base_url
        } else {
            env("TECHSCOUT_BASE_URL")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        };

        let poll_secs = settings
            .poll_interval_secs
            .or_else(|| {
                env("TECHSCOUT_POLL_INTERVAL_SECS").and_then(|value| value.parse::<u64>().ok())
            })
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        Self {
            base_url,
            poll_interval: Duration::from_secs(poll_secs),
        }
    }
}

pub fn techscout_config_path(filename: &str) -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("could not determine home directory"))?;
    Ok(home.join(".techscout").join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_configured() {
        let config = ApiConfig::resolve(Settings::default(), env_of(&[]));
        assert_eq!(config.base_url, "http://127.0.0.1:3001");
        assert_eq!(config.poll_interval, Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
    }

    #[test]
    fn env_fills_gaps_in_settings() {
        let config = ApiConfig::resolve(
            Settings::default(),
            env_of(&[
                ("TECHSCOUT_BASE_URL", "http://research.local"),
                ("TECHSCOUT_POLL_INTERVAL_SECS", "10"),
            ]),
        );
        assert_eq!(config.base_url, "http://research.local");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn settings_win_over_env() {
        let settings = Settings {
            base_url: "http://from-file".to_string(),
            poll_interval_secs: Some(1),
        };
        let config = ApiConfig::resolve(
            settings,
            env_of(&[("TECHSCOUT_BASE_URL", "http://from-env")]),
        );
        assert_eq!(config.base_url, "http://from-file");
        assert_eq!(config.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn zero_or_garbage_interval_falls_back() {
        let config = ApiConfig::resolve(
            Settings::default(),
            env_of(&[("TECHSCOUT_POLL_INTERVAL_SECS", "soon")]),
        );
        assert_eq!(config.poll_interval, Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));

        let settings = Settings {
            poll_interval_secs: Some(0),
            ..Settings::default()
        };
        let config = ApiConfig::resolve(settings, env_of(&[]));
        assert_eq!(config.poll_interval, Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
    }

    #[test]
    fn load_from_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"base_url": "http://x:8080"}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.base_url, "http://x:8080");
        assert_eq!(settings.poll_interval_secs, None);
    }

    #[test]
    fn load_from_ignores_invalid_or_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert!(Settings::load_from(&path).is_none());

        std::fs::write(&path, "not json").unwrap();
        assert!(Settings::load_from(&path).is_none());
    }
}
