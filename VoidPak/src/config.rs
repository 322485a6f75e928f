//! Settings file (voidpak.toml)
//!
//! ```toml
//! [layout]
//! header_offset = 0
//! magic = 72566098
//! resource_table_offset = 6
//! resource_count = 2
//! entry_table_offset = 64
//! entry_count = 10
//!
//! [export]
//! export_folder = "exported_files"
//! game_name = "Dishonored2"
//! model_format = "cast"
//!
//! [catalog]
//! duplicate_policy = "replace"
//! reject_mode = "either"
//! ```
//!
//! Every section and field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::DuplicatePolicy;
use crate::container::ContainerLayout;
use crate::error::Result;
use crate::export::ExportSettings;
use crate::search::RejectMode;

/// Catalog behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub duplicate_policy: DuplicatePolicy,
    /// Applied to queries built from the command line
    pub reject_mode: RejectMode,
}

/// The full settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub layout: ContainerLayout,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl Settings {
    /// Platform config location, e.g. `~/.config/voidpak/voidpak.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("voidpak").join("voidpak.toml"))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Load from an explicit path, else from [`Self::default_path`] if that
    /// file exists, else defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                tracing::debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ModelFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings {
            layout: ContainerLayout::new()
                .with_magic(0x0453_4552)
                .with_resources(6, 2)
                .with_entries(64, 10),
            export: ExportSettings {
                global_images: true,
                model_format: ModelFormat::SeModel,
                ..ExportSettings::default()
            },
            catalog: CatalogSettings {
                duplicate_policy: DuplicatePolicy::Replace,
                reject_mode: RejectMode::Either,
            },
        };

        let text = settings.to_toml_string().unwrap();
        let parsed = Settings::from_toml_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed = Settings::from_toml_str(
            r#"
            [layout]
            entry_count = 3

            [catalog]
            reject_mode = "either"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.layout.entry_count, 3);
        assert_eq!(parsed.layout.magic, None);
        assert_eq!(parsed.export, ExportSettings::default());
        assert_eq!(parsed.catalog.reject_mode, RejectMode::Either);
        assert_eq!(parsed.catalog.duplicate_policy, DuplicatePolicy::Reject);

        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Settings::from_toml_str("[layout]\nentry_count = \"many\"").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("voidpak.toml");

        let mut settings = Settings::default();
        settings.export.game_name = "Deathloop".to_string();
        settings.save(&path).unwrap();

        let loaded = Settings::load_or_default(Some(&path)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load_or_default(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
