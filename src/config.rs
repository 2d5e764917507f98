//! Application configuration, read once at startup from the platform config
//! directory.
//!
//! The admin passcode is a UI convenience for hiding the editing surface,
//! not a security boundary; it is compared client-side and stored in plain
//! text like the rest of the config.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the portfolio API; `/updateBlock/<id>` is appended.
    pub api_base_url: String,
    pub admin_passcode: String,
    pub seed_blocks: usize,
    pub seed_media_per_block: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            admin_passcode: "1234".to_string(),
            seed_blocks: 6,
            seed_media_per_block: 10,
        }
    }
}

impl Config {
    /// Loads `config.json`; a missing file yields the defaults silently,
    /// an unreadable or unparsable one yields the defaults with a warning.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("ignoring unparsable {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("cannot read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    fn path() -> Option<PathBuf> {
        ProjectDirs::from("com", "artfolio", "Artfolio")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_seeded_gallery_shape() {
        let config = Config::default();
        assert_eq!(config.seed_blocks, 6);
        assert_eq!(config.seed_media_per_block, 10);
        assert_eq!(config.admin_passcode, "1234");
    }

    #[test]
    fn unreadable_paths_fall_back_to_defaults() {
        // A missing file and a non-file path both yield defaults.
        let config = Config::load_from(Path::new("/nonexistent/config.json"));
        assert_eq!(config.seed_blocks, 6);

        let config = Config::load_from(Path::new("/"));
        assert_eq!(config.admin_passcode, "1234");
    }

    #[test]
    fn partial_config_files_fall_back_per_field() {
        let config: Config = serde_json::from_str(r#"{"adminPasscode":"0000"}"#)
            .unwrap_or_else(|_| Config::default());
        // Unknown casing is simply ignored; defaults hold.
        assert_eq!(config.admin_passcode, "1234");

        let config: Config = serde_json::from_str(r#"{"admin_passcode":"0000"}"#).unwrap();
        assert_eq!(config.admin_passcode, "0000");
        assert_eq!(config.seed_blocks, 6);
    }
}
