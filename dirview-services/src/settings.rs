// SPDX-License-Identifier: LGPL-3.0-only
use anyhow::Result;
use serde::Deserialize;
use smol::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use xdg::BaseDirectories;

/// Key controlling whether dot-files are listed.
pub const SHOW_HIDDEN_FILES: &str = "show-hidden-files";
/// Key controlling whether directories are grouped before files.
pub const SHOW_DIRS_FIRST: &str = "show-dirs-first";

const XDG_PREFIX: &str = "dirview";
const CHANGE_BUFFER: usize = 16;

/// A key-value configuration source.
pub trait ConfigSource {
    /// Look up a boolean setting by key.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Look up a boolean setting, falling back to `default` when unset.
    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }
}

/// The main configuration structure for the application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,
    /// Directory listing settings
    #[serde(default)]
    pub listing: ListingSettings,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    pub debug: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ListingSettings {
    pub show_hidden_files: Option<bool>,
    pub show_dirs_first: Option<bool>,
}

impl Config {
    fn defaults() -> Self {
        Self {
            general: GeneralSettings {
                debug: Some(false),
                log_level: None,
            },
            listing: ListingSettings {
                show_hidden_files: Some(false),
                show_dirs_first: Some(false),
            },
            other: HashMap::new(),
        }
    }
}

/// Registry for managing application settings.
///
/// Interior mutability lets one registry be shared (`Arc`) between the
/// code that edits settings and the models reading them. Every change made
/// through [set_bool](Self::set_bool) or a (re)load is announced on a
/// broadcast channel as the changed key.
pub struct SettingsRegistry {
    config: RwLock<Config>,
    changes: broadcast::Sender<String>,
}

impl SettingsRegistry {
    /// Create a registry holding only the built-in defaults.
    pub fn with_defaults() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            config: RwLock::new(Config::defaults()),
            changes,
        }
    }

    /// Create a new SettingsRegistry and load configuration from standard locations.
    pub async fn new() -> Result<Self> {
        let registry = Self::with_defaults();
        registry.load().await?;
        Ok(registry)
    }

    /// Create a registry from defaults overlaid with a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let registry = Self::with_defaults();
        let loaded: Config = toml::from_str(content)?;
        registry.merge(loaded);
        Ok(registry)
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/dirview/config.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/dirview/config.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/dirview/config.toml (XDG_CONFIG_HOME)
    pub async fn load(&self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;

        let previous = self.get();
        for path in Self::config_paths(&xdg_dirs, "config.toml") {
            self.load_file(&path).await;
        }
        self.announce_changes(&previous);
        Ok(())
    }

    fn config_paths(xdg_dirs: &BaseDirectories, filename: &str) -> Vec<PathBuf> {
        // 1. System data directories
        let mut paths: Vec<PathBuf> = xdg_dirs.find_data_files(filename).rev().collect();

        // 2. System config directories
        paths.extend(xdg_dirs.find_config_files(filename).rev());

        // 3. User config directory
        let user_config_path = xdg_dirs.get_config_home().join(filename);
        if user_config_path.exists() {
            paths.push(user_config_path);
        }
        paths
    }

    async fn load_file(&self, path: &Path) {
        log::info!("Loading config from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(loaded_config) => {
                    self.merge(loaded_config);
                },
                Err(e) => {
                    log::error!("Failed to parse config file {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
            },
        }
    }

    /// Merge a loaded config into the current config.
    ///
    /// Returns the listing keys whose value changed; callers decide whether to announce them.
    fn merge(&self, other: Config) -> Vec<&'static str> {
        let mut changed = Vec::new();
        {
            let mut config = self.write();

            // General
            if let Some(debug) = other.general.debug {
                config.general.debug = Some(debug);
            }
            if other.general.log_level.is_some() {
                config.general.log_level = other.general.log_level;
            }

            // Listing
            if let Some(v) = other.listing.show_hidden_files {
                if config.listing.show_hidden_files != Some(v) {
                    config.listing.show_hidden_files = Some(v);
                    changed.push(SHOW_HIDDEN_FILES);
                }
            }
            if let Some(v) = other.listing.show_dirs_first {
                if config.listing.show_dirs_first != Some(v) {
                    config.listing.show_dirs_first = Some(v);
                    changed.push(SHOW_DIRS_FIRST);
                }
            }

            // Other
            config.other.extend(other.other);
        }

        changed
    }

    /// Get a snapshot of the current configuration.
    pub fn get(&self) -> Config {
        self.read().clone()
    }

    /// Set a boolean listing setting. Unknown keys are ignored.
    ///
    /// Subscribers are notified only when the value actually changes.
    pub fn set_bool(&self, key: &str, value: bool) {
        let changed = {
            let mut config = self.write();
            let slot = match key {
                SHOW_HIDDEN_FILES => &mut config.listing.show_hidden_files,
                SHOW_DIRS_FIRST => &mut config.listing.show_dirs_first,
                _ => {
                    log::warn!("Ignoring unknown setting {:?}", key);
                    return;
                },
            };
            let changed = *slot != Some(value);
            *slot = Some(value);
            changed
        };

        if changed {
            self.notify(key);
        }
    }

    /// Subscribe to change notifications. Each message is the changed key.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }

    /// Load configuration from multiple custom paths asynchronously.
    pub async fn load_from_paths_async(&self, paths: Vec<PathBuf>) -> Vec<anyhow::Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = async {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to read config file {:?}: {}", path, e))?;

                let loaded_config: Config = toml::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse config file {:?}: {}", path, e))?;

                for key in self.merge(loaded_config) {
                    self.notify(key);
                }
                Ok(())
            }
            .await;

            results.push(result);
        }

        results
    }

    /// Reload configuration asynchronously (re-runs the full load process).
    ///
    /// Each listing key whose final value differs from before is announced once.
    pub async fn reload_async(&self) -> anyhow::Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
        self.reload_from_paths(Self::config_paths(&xdg_dirs, "config.toml")).await;
        Ok(())
    }

    async fn reload_from_paths(&self, paths: Vec<PathBuf>) {
        let previous = std::mem::replace(&mut *self.write(), Config::defaults());
        for path in paths {
            self.load_file(&path).await;
        }
        self.announce_changes(&previous);
    }

    /// Announce the listing keys whose value differs from `previous`.
    fn announce_changes(&self, previous: &Config) {
        let current = self.get();
        if previous.listing.show_hidden_files != current.listing.show_hidden_files {
            self.notify(SHOW_HIDDEN_FILES);
        }
        if previous.listing.show_dirs_first != current.listing.show_dirs_first {
            self.notify(SHOW_DIRS_FIRST);
        }
    }

    fn notify(&self, key: &str) {
        // No receivers is fine.
        let _ = self.changes.send(key.to_string());
    }

    fn read(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Config> {
        self.config.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ConfigSource for SettingsRegistry {
    fn get_bool(&self, key: &str) -> Option<bool> {
        let config = self.read();
        match key {
            SHOW_HIDDEN_FILES => config.listing.show_hidden_files,
            SHOW_DIRS_FIRST => config.listing.show_dirs_first,
            "debug" => config.general.debug,
            _ => None,
        }
    }
}

impl ConfigSource for HashMap<String, bool> {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).copied()
    }
}
