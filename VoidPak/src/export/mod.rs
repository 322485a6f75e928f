//! Export planning
//!
//! Decides where exported models, animations and images go and which file
//! extension they get. Writing the files themselves is delegated to a
//! [`Translator`] implementation supplied by the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::asset::{AnimationClip, PreviewModel};
use crate::error::Result;

/// Output format for models
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    XModel,
    SeModel,
    #[default]
    Cast,
}

impl ModelFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ModelFormat::XModel => ".xmodel_export",
            ModelFormat::SeModel => ".semodel",
            ModelFormat::Cast => ".cast",
        }
    }
}

/// Output format for animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationFormat {
    #[default]
    Cast,
    SeAnim,
    XAnim,
}

impl AnimationFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            AnimationFormat::Cast => ".cast",
            AnimationFormat::SeAnim => ".seanim",
            AnimationFormat::XAnim => ".xanim_export",
        }
    }
}

/// Output format for images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Tga,
    Tiff,
    Dds,
    #[default]
    Png,
}

impl ImageFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Tga => ".tga",
            ImageFormat::Tiff => ".tiff",
            ImageFormat::Dds => ".dds",
            ImageFormat::Png => ".png",
        }
    }
}

fn default_export_folder() -> PathBuf {
    PathBuf::from("exported_files")
}

fn default_game_name() -> String {
    "Dishonored2".to_string()
}

/// Export destination and format settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_folder")]
    pub export_folder: PathBuf,
    #[serde(default = "default_game_name")]
    pub game_name: String,
    /// Share one `_Images` folder between all models
    #[serde(default)]
    pub global_images: bool,
    #[serde(default)]
    pub model_format: ModelFormat,
    #[serde(default)]
    pub animation_format: AnimationFormat,
    #[serde(default)]
    pub image_format: ImageFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            export_folder: default_export_folder(),
            game_name: default_game_name(),
            global_images: false,
            model_format: ModelFormat::default(),
            animation_format: AnimationFormat::default(),
            image_format: ImageFormat::default(),
        }
    }
}

impl ExportSettings {
    /// `<export_folder>/<game_name>/Models/<name>`
    #[must_use]
    pub fn model_directory(&self, name: &str) -> PathBuf {
        self.export_folder
            .join(&self.game_name)
            .join("Models")
            .join(name)
    }

    /// Image folder for a model directory
    #[must_use]
    pub fn images_directory(&self, model_dir: &Path) -> PathBuf {
        if self.global_images {
            model_dir
                .parent()
                .map_or_else(|| PathBuf::from("_Images"), |parent| parent.join("_Images"))
        } else {
            model_dir.join("_Images")
        }
    }

    /// Image folder as referenced from inside a model file
    #[must_use]
    pub fn image_relative_path(&self) -> &'static str {
        if self.global_images {
            "../_Images/"
        } else {
            "_Images/"
        }
    }

    /// Path for an image named `name` in `dir`
    #[must_use]
    pub fn image_output_path(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}{}", self.image_format.extension()))
    }
}

/// Writer for exported models and animations
pub trait Translator {
    fn save_model(&self, path: &Path, model: &PreviewModel) -> Result<()>;

    fn save_animation(&self, path: &Path, animation: &AnimationClip) -> Result<()>;
}

/// Export a model under `<model_directory(name)>`.
///
/// The model and image directories are created even when `model` is `None`.
/// Returns the written model path.
pub fn export_model(
    model: Option<&PreviewModel>,
    name: &str,
    settings: &ExportSettings,
    translator: &dyn Translator,
) -> Result<Option<PathBuf>> {
    let dir = settings.model_directory(name);
    let images = settings.images_directory(&dir);
    std::fs::create_dir_all(&dir)?;
    std::fs::create_dir_all(&images)?;

    let Some(model) = model else {
        tracing::debug!("No model built for {}, skipping save", name);
        return Ok(None);
    };

    let path = dir.join(format!("{}{}", model.name, settings.model_format.extension()));
    translator.save_model(&path, model)?;
    tracing::info!("Exported model {} to {}", model.name, path.display());
    Ok(Some(path))
}

/// Export an animation into `output_dir` as `<name><ext>`.
pub fn export_animation(
    animation: &AnimationClip,
    output_dir: &Path,
    name: &str,
    settings: &ExportSettings,
    translator: &dyn Translator,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{name}{}", settings.animation_format.extension()));
    translator.save_animation(&path, animation)?;
    tracing::info!("Exported animation {} to {}", name, path.display());
    Ok(path)
}
