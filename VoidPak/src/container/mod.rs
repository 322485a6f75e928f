//! Resource containers
//!
//! A container pairs an ordered list of resource paths (the packed blobs the
//! entries live in) with an ordered list of entries. Entries point at their
//! resource through a 16-bit flags value, see
//! [`ResourceContainer::resolve_resource_path`].

mod layout;
mod scanner;

use std::sync::Arc;

use crate::asset::Asset;

pub use layout::ContainerLayout;
pub use scanner::{EntryRecord, scan, write_string};

/// Flag bit selecting the last resource in the list
pub const LAST_RESOURCE_FLAG: u16 = 0x8000;

/// Resource paths and entries read from one container
///
/// Both lists only grow, and only while the container is being built.
#[derive(Debug, Clone, Default)]
pub struct ResourceContainer {
    directory: String,
    path: String,
    resources: Vec<String>,
    entries: Vec<Arc<Asset>>,
}

impl ResourceContainer {
    #[must_use]
    pub fn new(directory: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            path: path.into(),
            resources: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn entries(&self) -> &[Arc<Asset>] {
        &self.entries
    }

    pub fn push_resource(&mut self, resource: impl Into<String>) {
        self.resources.push(resource.into());
    }

    pub fn push_entry(&mut self, entry: impl Into<Arc<Asset>>) {
        self.entries.push(entry.into());
    }

    /// Index into `resources` encoded by `flags`
    ///
    /// With the high bit set the last resource is selected whatever the other
    /// bits say. Otherwise the low two bits are dropped and the rest is the
    /// index. `None` only when the list is empty and the high bit is set.
    #[must_use]
    pub fn resource_index(&self, flags: u16) -> Option<usize> {
        if flags & LAST_RESOURCE_FLAG != 0 {
            self.resources.len().checked_sub(1)
        } else {
            Some(usize::from(flags >> 2))
        }
    }

    /// Resolve `flags` to a resource path.
    ///
    /// Out-of-range indices resolve to an empty string.
    #[must_use]
    pub fn resolve_resource_path(&self, flags: u16) -> &str {
        self.resource_index(flags)
            .and_then(|index| self.resources.get(index))
            .map_or("", String::as_str)
    }
}
