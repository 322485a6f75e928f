//! Catalog assets
//!
//! An [`Asset`] is one addressable item of a loaded archive. Identity is the
//! name alone: two assets with the same name are the same asset no matter what
//! their other fields say. Assets scanned from a container's entry table carry
//! an [`ArchiveEntry`] extension with the raw entry fields.
//!
//! Type and status are the only fields that change after an asset is shared.
//! They live in atomics so a load/export worker can update them while another
//! thread filters the catalog.

mod events;
mod hooks;
mod types;

use std::cmp::Ordering as CmpOrdering;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use image::RgbaImage;

use crate::error::Result;

pub use events::{AssetChange, ChangeListener, SubscriptionId};
pub use hooks::{AnimationClip, AssetHandler, HookContext, PreviewModel};
pub use types::{ArchiveEntry, AssetStatus, AssetType};

/// Name given to assets created without one
pub const PLACEHOLDER_NAME: &str = "Asset";

/// A generic catalog asset
pub struct Asset {
    name: String,
    pointer: u64,
    file_entry: bool,
    information: String,
    size: i64,
    streamed: bool,
    kind: AtomicU8,
    status: AtomicU8,
    archive: Option<ArchiveEntry>,
    handler: Option<Arc<dyn AssetHandler>>,
    listeners: RwLock<Vec<(SubscriptionId, ChangeListener)>>,
    payload: Mutex<Option<Vec<u8>>>,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            pointer: 0,
            file_entry: false,
            information: String::new(),
            size: -1,
            streamed: false,
            kind: AtomicU8::new(AssetType::Unknown as u8),
            status: AtomicU8::new(AssetStatus::NotLoaded as u8),
            archive: None,
            handler: None,
            listeners: RwLock::new(Vec::new()),
            payload: Mutex::new(None),
        }
    }
}

impl Asset {
    /// Create an asset with the given name and default fields.
    ///
    /// An empty name falls back to [`PLACEHOLDER_NAME`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let mut asset = Self::default();
        asset.set_name(name);
        asset
    }

    /// Create an asset backed by a container entry.
    #[must_use]
    pub fn from_archive_entry(name: impl Into<String>, entry: ArchiveEntry) -> Self {
        let mut asset = Self::new(name);
        asset.pointer = entry.resource_position;
        asset.archive = Some(entry);
        asset
    }

    // ==================== Builders ====================

    #[must_use]
    pub fn with_type(self, asset_type: AssetType) -> Self {
        self.kind.store(asset_type as u8, Ordering::Release);
        self
    }

    #[must_use]
    pub fn with_status(self, status: AssetStatus) -> Self {
        self.status.store(status as u8, Ordering::Release);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: u64) -> Self {
        self.pointer = pointer;
        self
    }

    #[must_use]
    pub fn with_information(mut self, information: impl Into<String>) -> Self {
        self.information = information.into();
        self
    }

    #[must_use]
    pub fn with_streamed(mut self, streamed: bool) -> Self {
        self.streamed = streamed;
        self
    }

    #[must_use]
    pub fn with_file_entry(mut self, file_entry: bool) -> Self {
        self.file_entry = file_entry;
        self
    }

    /// Attach the load/preview strategy for this asset.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn AssetHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    // ==================== Plain fields ====================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = if name.is_empty() {
            PLACEHOLDER_NAME.to_string()
        } else {
            name
        };
    }

    /// Locator into the source archive, 0 when unset
    pub fn asset_pointer(&self) -> u64 {
        self.pointer
    }

    pub fn set_asset_pointer(&mut self, pointer: u64) {
        self.pointer = pointer;
    }

    /// Whether this is a raw filesystem entry rather than a packed resource
    pub fn is_file_entry(&self) -> bool {
        self.file_entry
    }

    pub fn set_file_entry(&mut self, file_entry: bool) {
        self.file_entry = file_entry;
    }

    pub fn information(&self) -> &str {
        &self.information
    }

    pub fn set_information(&mut self, information: impl Into<String>) {
        self.information = information.into();
    }

    /// Size in bytes, -1 when unknown
    pub fn asset_size(&self) -> i64 {
        self.size
    }

    pub fn set_asset_size(&mut self, size: i64) {
        self.size = size;
    }

    pub fn is_streamed(&self) -> bool {
        self.streamed
    }

    pub fn set_streamed(&mut self, streamed: bool) {
        self.streamed = streamed;
    }

    /// Entry-table fields, present for container-sourced assets
    pub fn archive_entry(&self) -> Option<&ArchiveEntry> {
        self.archive.as_ref()
    }

    pub fn handler(&self) -> Option<&Arc<dyn AssetHandler>> {
        self.handler.as_ref()
    }

    // ==================== Observable fields ====================

    pub fn asset_type(&self) -> AssetType {
        AssetType::from_u8(self.kind.load(Ordering::Acquire))
    }

    /// Change the type, notifying subscribers if it differs from the current one.
    pub fn set_type(&self, asset_type: AssetType) {
        let old = self.kind.swap(asset_type as u8, Ordering::AcqRel);
        if old != asset_type as u8 {
            self.notify(AssetChange::Type {
                old: AssetType::from_u8(old),
                new: asset_type,
            });
        }
    }

    pub fn status(&self) -> AssetStatus {
        AssetStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Change the status, notifying subscribers if it differs from the current one.
    pub fn set_status(&self, status: AssetStatus) {
        let old = self.status.swap(status as u8, Ordering::AcqRel);
        if old != status as u8 {
            self.notify(AssetChange::Status {
                old: AssetStatus::from_u8(old),
                new: status,
            });
        }
    }

    /// Move from `from` to `to` only if the status is still `from`.
    fn transition_status(&self, from: AssetStatus, to: AssetStatus) -> bool {
        let swapped = self
            .status
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if swapped && from != to {
            self.notify(AssetChange::Status { old: from, new: to });
        }
        swapped
    }

    /// Register a listener for type/status changes.
    pub fn subscribe(&self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn notify(&self, change: AssetChange) {
        // Listeners run outside the lock so they may subscribe or unsubscribe.
        let listeners: Vec<ChangeListener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(self, &change);
        }
    }

    // ==================== Hooks ====================

    /// Run the attached load strategy.
    ///
    /// Marks the asset `Processing`, runs the handler, then marks it `Loaded`
    /// unless the handler already moved it elsewhere. A failing handler leaves
    /// the asset in `Error`. Without a handler this does nothing.
    pub fn load(&self, ctx: &HookContext<'_>) -> Result<()> {
        let Some(handler) = self.handler.clone() else {
            return Ok(());
        };

        self.set_status(AssetStatus::Processing);
        match handler.load(self, ctx) {
            Ok(()) => {
                self.transition_status(AssetStatus::Processing, AssetStatus::Loaded);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", self.name, e);
                self.set_status(AssetStatus::Error);
                Err(e)
            }
        }
    }

    /// Build a renderable preview through the attached handler.
    pub fn build_preview(&self, ctx: &HookContext<'_>) -> Option<PreviewModel> {
        self.handler.as_ref()?.build_preview(self, ctx)
    }

    /// Build a preview thumbnail through the attached handler.
    pub fn build_preview_texture(&self, ctx: &HookContext<'_>) -> Option<RgbaImage> {
        self.handler.as_ref()?.build_preview_texture(self, ctx)
    }

    // ==================== Payload ====================

    /// Store loaded asset data, replacing any previous payload.
    pub fn set_payload(&self, data: Vec<u8>) {
        *self.payload.lock().unwrap_or_else(PoisonError::into_inner) = Some(data);
    }

    pub fn has_payload(&self) -> bool {
        self.payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Length of the loaded payload, if any
    pub fn payload_len(&self) -> Option<usize> {
        self.payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Vec::len)
    }

    /// Release loaded asset data. Safe to call repeatedly.
    pub fn clear_data(&self) {
        self.payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    // ==================== Ordering ====================

    /// Compare by type only.
    ///
    /// Assets of the same type compare equal here, so a stable sort keeps their
    /// relative order.
    pub fn cmp_by_type(&self, other: &Asset) -> CmpOrdering {
        self.asset_type().cmp(&other.asset_type())
    }
}

impl Clone for Asset {
    /// Copy every value field. Subscribers and loaded payload stay with the
    /// original; the handler is shared.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            pointer: self.pointer,
            file_entry: self.file_entry,
            information: self.information.clone(),
            size: self.size,
            streamed: self.streamed,
            kind: AtomicU8::new(self.kind.load(Ordering::Acquire)),
            status: AtomicU8::new(self.status.load(Ordering::Acquire)),
            archive: self.archive.clone(),
            handler: self.handler.clone(),
            listeners: RwLock::new(Vec::new()),
            payload: Mutex::new(None),
        }
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Asset {}

impl Hash for Asset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::fmt::Debug for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Asset")
            .field("name", &self.name)
            .field("asset_type", &self.asset_type())
            .field("status", &self.status())
            .field("asset_pointer", &self.pointer)
            .field("asset_size", &self.size)
            .field("file_entry", &self.file_entry)
            .field("streamed", &self.streamed)
            .field("information", &self.information)
            .field("archive", &self.archive)
            .field("has_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}
