//! # `VoidPak`
//!
//! A pure-Rust library for Void engine resource containers (Dishonored 2,
//! Deathloop and friends).
//!
//! ## What's Inside
//!
//! - **Containers** - resource path tables, entry tables and the flags-encoded
//!   resource index
//! - **Records** - packed little-endian header, mesh, material, skeleton,
//!   parent and transform records
//! - **Assets** - the catalog entity, its status/type lifecycle and load hooks
//! - **Search** - four-clause queries with hashed-name fallback
//! - **Export planning** - output directories and format extensions
//!
//! ## Quick Start
//!
//! ```no_run
//! use voidpak::prelude::*;
//!
//! let settings = Settings::load_or_default(None)?;
//! let bytes = std::fs::read("base/master.index")?;
//! let container = scan(&bytes, "base", "base/master.index", 0, &settings.layout)?;
//!
//! let catalog = AssetCatalog::open(&container, settings.catalog.duplicate_policy)?;
//! for asset in catalog.filter(&SearchQuery::parse("soldier type:model")) {
//!     println!("{} -> {}", asset.name(), asset.information());
//! }
//! # Ok::<(), voidpak::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `voidpak` command-line binary

pub mod asset;
pub mod catalog;
pub mod config;
pub mod container;
pub mod error;
pub mod export;
pub mod formats;
pub mod search;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::asset::{
        AnimationClip, ArchiveEntry, Asset, AssetChange, AssetHandler, AssetStatus, AssetType,
        HookContext, PreviewModel,
    };
    pub use crate::catalog::{AssetCatalog, AssetSummary, DuplicatePolicy};
    pub use crate::config::Settings;
    pub use crate::container::{ContainerLayout, ResourceContainer, scan};
    pub use crate::export::{ExportSettings, Translator};
    pub use crate::formats::{
        MaterialRecord, MeshRecord, ParentsRecord, Record, ResourceHeader, SkeletonRecord,
        TransformRecord,
    };
    pub use crate::search::{RejectMode, SearchQuery, Searchable};
    pub use crate::utils::hash::fnv1a_64_str;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
