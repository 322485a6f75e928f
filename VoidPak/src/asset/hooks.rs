//! Per-asset load and preview strategies
//!
//! Loading an asset's payload, building a renderable preview and building a
//! thumbnail depend on the asset kind and on the archive it came from. Each
//! asset holds an optional shared [`AssetHandler`] that a loader attaches when
//! it creates the asset, so behaviour varies per instance without a subtype
//! per asset kind.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::Asset;
use crate::error::Result;
use crate::export::ExportSettings;
use crate::formats::{MaterialRecord, MeshRecord, SkeletonRecord, TransformRecord};

/// State passed to every hook call
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    /// Bytes of the archive the asset was scanned from
    pub archive: &'a [u8],
    /// Where and how exported files are written
    pub export: &'a ExportSettings,
}

impl<'a> HookContext<'a> {
    #[must_use]
    pub fn new(archive: &'a [u8], export: &'a ExportSettings) -> Self {
        Self { archive, export }
    }
}

/// In-memory model handed to previewers and to the export translator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewModel {
    pub name: String,
    pub meshes: Vec<MeshRecord>,
    pub materials: Vec<MaterialRecord>,
    pub skeleton: Option<SkeletonRecord>,
    pub bones: Vec<TransformRecord>,
}

impl PreviewModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sum of the vertex counts of every mesh
    #[must_use]
    pub fn vertex_count(&self) -> u64 {
        self.meshes.iter().map(|m| u64::from(m.vertex_count)).sum()
    }
}

/// Keyed bone transforms handed to the export translator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub frame_rate: f32,
    /// One entry per frame, each holding a transform per bone
    pub frames: Vec<Vec<TransformRecord>>,
}

/// Load and preview behaviour for one kind of asset
///
/// Every method has a no-op default so handlers only implement what their
/// asset kind supports.
pub trait AssetHandler: Send + Sync {
    /// Materialize the asset payload from the archive.
    ///
    /// Implementations may store the payload with [`Asset::set_payload`] and may
    /// set the status themselves; see [`Asset::load`] for the default status
    /// transitions.
    fn load(&self, asset: &Asset, ctx: &HookContext<'_>) -> Result<()> {
        let _ = (asset, ctx);
        Ok(())
    }

    /// Build a renderable preview. `None` if unsupported.
    fn build_preview(&self, asset: &Asset, ctx: &HookContext<'_>) -> Option<PreviewModel> {
        let _ = (asset, ctx);
        None
    }

    /// Build a preview thumbnail. `None` if unsupported.
    fn build_preview_texture(&self, asset: &Asset, ctx: &HookContext<'_>) -> Option<RgbaImage> {
        let _ = (asset, ctx);
        None
    }
}
