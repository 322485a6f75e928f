//! Where a container's tables live

use serde::{Deserialize, Serialize};

/// Byte offsets and table counts for one container format
///
/// The header, resource table and entry table positions are not stored in the
/// container itself, so the loader supplies them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerLayout {
    /// Offset of the header record
    pub header_offset: usize,
    /// Expected header magic; `None` skips the check
    pub magic: Option<i32>,
    /// Offset of the first resource path string
    pub resource_table_offset: usize,
    pub resource_count: usize,
    /// Offset of the first entry record
    pub entry_table_offset: usize,
    pub entry_count: usize,
}

impl ContainerLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_magic(mut self, magic: i32) -> Self {
        self.magic = Some(magic);
        self
    }

    #[must_use]
    pub fn with_resources(mut self, offset: usize, count: usize) -> Self {
        self.resource_table_offset = offset;
        self.resource_count = count;
        self
    }

    #[must_use]
    pub fn with_entries(mut self, offset: usize, count: usize) -> Self {
        self.entry_table_offset = offset;
        self.entry_count = count;
        self
    }
}
