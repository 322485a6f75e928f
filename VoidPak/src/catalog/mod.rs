//! Asset catalog
//!
//! The catalog owns every asset of an opened archive, keyed by name in
//! insertion order. It is created when an archive is opened and emptied by
//! [`AssetCatalog::close`]. Readers work on snapshots taken under a short read
//! lock, so filtering never blocks an append for longer than the copy.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::asset::{ArchiveEntry, Asset, AssetStatus, AssetType};
use crate::container::ResourceContainer;
use crate::error::{Error, Result};
use crate::search::SearchQuery;

/// What `insert` does when the name is already taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with [`Error::DuplicateAssetIdentity`] and leave the catalog as is.
    #[default]
    Reject,
    /// Swap in the new asset, keeping the original position.
    Replace,
}

/// One row of a catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub name: String,
    pub asset_type: AssetType,
    pub status: AssetStatus,
    pub size: i64,
    pub streamed: bool,
    pub information: String,
    /// Bytes of loaded payload, absent when nothing is loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded_bytes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveEntry>,
}

impl From<&Asset> for AssetSummary {
    fn from(asset: &Asset) -> Self {
        Self {
            name: asset.name().to_string(),
            asset_type: asset.asset_type(),
            status: asset.status(),
            size: asset.asset_size(),
            streamed: asset.is_streamed(),
            information: asset.information().to_string(),
            loaded_bytes: asset.payload_len(),
            archive: asset.archive_entry().cloned(),
        }
    }
}

/// Name-keyed collection of shared assets
#[derive(Debug, Default)]
pub struct AssetCatalog {
    assets: RwLock<IndexMap<String, Arc<Asset>>>,
    policy: DuplicatePolicy,
}

impl AssetCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            assets: RwLock::new(IndexMap::new()),
            policy,
        }
    }

    /// Open a catalog over every entry of a scanned container.
    pub fn open(container: &ResourceContainer, policy: DuplicatePolicy) -> Result<Self> {
        let catalog = Self::with_policy(policy);
        let added = catalog.extend_from_container(container)?;
        tracing::info!("Opened catalog for {} with {} assets", container.path(), added);
        Ok(catalog)
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Arc<Asset>>> {
        self.assets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Arc<Asset>>> {
        self.assets.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Population ====================

    /// Add an asset under its name.
    pub fn insert(&self, asset: Asset) -> Result<Arc<Asset>> {
        self.insert_shared(Arc::new(asset))
    }

    /// Add an already shared asset under its name.
    pub fn insert_shared(&self, asset: Arc<Asset>) -> Result<Arc<Asset>> {
        let mut assets = self.write();
        if let Some(existing) = assets.get_mut(asset.name()) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(Error::DuplicateAssetIdentity(asset.name().to_string()));
                }
                DuplicatePolicy::Replace => {
                    tracing::warn!("Replacing duplicate asset {}", asset.name());
                    *existing = Arc::clone(&asset);
                    return Ok(asset);
                }
            }
        }
        assets.insert(asset.name().to_string(), Arc::clone(&asset));
        Ok(asset)
    }

    /// Add every entry of `container`, returning how many were added.
    ///
    /// Under [`DuplicatePolicy::Reject`] the first clash stops the import;
    /// entries added before it stay in the catalog.
    pub fn extend_from_container(&self, container: &ResourceContainer) -> Result<usize> {
        let mut added = 0;
        for entry in container.entries() {
            self.insert_shared(Arc::clone(entry))?;
            added += 1;
        }
        tracing::debug!("Added {} entries from {}", added, container.path());
        Ok(added)
    }

    // ==================== Lookup ====================

    pub fn get(&self, name: &str) -> Option<Arc<Asset>> {
        self.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Remove an asset, keeping the order of the others.
    pub fn remove(&self, name: &str) -> Option<Arc<Asset>> {
        self.write().shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Every asset in catalog order
    pub fn snapshot(&self) -> Vec<Arc<Asset>> {
        self.read().values().cloned().collect()
    }

    // ==================== Queries ====================

    /// Assets matching `query`, in catalog order.
    pub fn filter(&self, query: &SearchQuery) -> Vec<Arc<Asset>> {
        let snapshot = self.snapshot();
        if query.is_empty() {
            return snapshot;
        }
        snapshot
            .into_par_iter()
            .filter(|asset| query.matches(asset.as_ref()))
            .collect()
    }

    /// Every asset ordered by type; equal types keep catalog order.
    pub fn sorted_by_type(&self) -> Vec<Arc<Asset>> {
        let mut assets = self.snapshot();
        assets.sort_by(|a, b| a.cmp_by_type(b));
        assets
    }

    pub fn of_type(&self, asset_type: AssetType) -> Vec<Arc<Asset>> {
        self.read()
            .values()
            .filter(|asset| asset.asset_type() == asset_type)
            .cloned()
            .collect()
    }

    /// Number of assets per type, in type order
    pub fn type_counts(&self) -> BTreeMap<AssetType, usize> {
        let mut counts = BTreeMap::new();
        for asset in self.read().values() {
            *counts.entry(asset.asset_type()).or_insert(0) += 1;
        }
        counts
    }

    // ==================== Lifecycle ====================

    /// Release every payload and empty the catalog.
    pub fn close(&self) {
        let mut assets = self.write();
        for asset in assets.values() {
            asset.clear_data();
        }
        let count = assets.len();
        assets.clear();
        tracing::info!("Closed catalog ({} assets released)", count);
    }

    // ==================== Listing ====================

    pub fn listing(&self) -> Vec<AssetSummary> {
        self.read()
            .values()
            .map(|asset| AssetSummary::from(asset.as_ref()))
            .collect()
    }

    /// Write the listing as pretty JSON.
    pub fn write_listing(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.listing())?;
        std::fs::write(path, json)?;
        tracing::info!("Wrote catalog listing to {}", path.display());
        Ok(())
    }
}
