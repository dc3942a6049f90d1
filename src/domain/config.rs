use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for a nomination store.
///
/// Lives at `.unimatch/config.toml` under the store root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The well-known key the store document is saved under.
    ///
    /// With the file backend this is the file stem, so the document lives at
    /// `<root>/<store_key>.json`.
    store_key: String,

    /// Whether an empty store is populated with the demonstration
    /// participants when it is opened.
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_key: default_store_key(),
            seed_demo: false,
        }
    }
}

impl Config {
    /// The location of the configuration file under `root`.
    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        root.join(".unimatch").join("config.toml")
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration for the store rooted at `root`, falling back
    /// to the defaults if it is missing or invalid.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        Self::load(&Self::path(root)).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e}"))?;
        }
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The key the store document is saved under.
    #[must_use]
    pub fn store_key(&self) -> &str {
        &self.store_key
    }

    /// Sets the store key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or would escape the store root.
    pub fn set_store_key(&mut self, key: &str) -> Result<(), String> {
        let key = key.trim();
        if key.is_empty() {
            return Err("store key must not be blank".to_string());
        }
        if key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(format!("store key '{key}' must be a plain name"));
        }
        self.store_key = key.to_string();
        Ok(())
    }

    /// The path of the store document under `root`.
    #[must_use]
    pub fn store_path(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.json", self.store_key))
    }
}

fn default_store_key() -> String {
    "unimatch_db_v1".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_store_key")]
        store_key: String,

        #[serde(default)]
        seed_demo: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                store_key,
                seed_demo,
            } => Self {
                store_key,
                seed_demo,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            store_key: config.store_key,
            seed_demo: config.seed_demo,
        }
    }
}
