//! Asset classification enums and the archive entry extension

use serde::{Deserialize, Serialize};

/// Kind of asset. Declared order is the catalog's type-grouping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum AssetType {
    Animation,
    Image,
    Model,
    Sound,
    RawFile,
    Material,
    Unknown,
}

impl AssetType {
    /// All types in declared order
    pub const ALL: [AssetType; 7] = [
        AssetType::Animation,
        AssetType::Image,
        AssetType::Model,
        AssetType::Sound,
        AssetType::RawFile,
        AssetType::Material,
        AssetType::Unknown,
    ];

    /// Lower-case name, as matched by search queries
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Animation => "animation",
            AssetType::Image => "image",
            AssetType::Model => "model",
            AssetType::Sound => "sound",
            AssetType::RawFile => "rawfile",
            AssetType::Material => "material",
            AssetType::Unknown => "unknown",
        }
    }

    /// Classify an entry-table type tag
    #[must_use]
    pub fn from_entry_type(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        if tag.contains("anim") {
            AssetType::Animation
        } else if tag.contains("image") || tag.contains("texture") {
            AssetType::Image
        } else if tag.contains("model") || tag.contains("mesh") {
            AssetType::Model
        } else if tag.contains("sound") || tag.contains("wwise") || tag.contains("audio") {
            AssetType::Sound
        } else if tag.contains("material") {
            AssetType::Material
        } else if tag.contains("file") || tag.contains("raw") || tag.contains("text") {
            AssetType::RawFile
        } else {
            AssetType::Unknown
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .unwrap_or(AssetType::Unknown)
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Load/export lifecycle state. Only collaborators move an asset between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AssetStatus {
    Loaded,
    Exported,
    NotLoaded,
    Placeholder,
    Processing,
    Error,
}

impl AssetStatus {
    const ALL: [AssetStatus; 6] = [
        AssetStatus::Loaded,
        AssetStatus::Exported,
        AssetStatus::NotLoaded,
        AssetStatus::Placeholder,
        AssetStatus::Processing,
        AssetStatus::Error,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Loaded => "loaded",
            AssetStatus::Exported => "exported",
            AssetStatus::NotLoaded => "not loaded",
            AssetStatus::Placeholder => "placeholder",
            AssetStatus::Processing => "processing",
            AssetStatus::Error => "error",
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .unwrap_or(AssetStatus::Error)
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Fields carried by assets that come from a container's entry table.
///
/// `dummy`, `unk`, `flag3` and `flag2` are kept so an entry can be written back
/// unchanged; nothing here interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Index of the owning container
    pub container: i32,
    /// Index within the container's entry table
    pub entry: i32,
    /// Resource identifier
    pub id: u32,
    /// Entry-table type tag
    pub entry_type: String,
    /// Target path hint
    pub destination: String,
    /// Offset into the packed resource blob
    pub resource_position: u64,
    pub compressed_size: i32,
    /// Flags-encoded index into the container's resource list
    pub resource_flags: u16,
    pub dummy: i32,
    pub unk: i32,
    pub flag3: i32,
    pub flag2: i16,
}
