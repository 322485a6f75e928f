//! Field change notifications for assets
//!
//! Observers (a catalog view, a UI adapter) subscribe per asset and receive an
//! [`AssetChange`] whenever the asset's type or status actually changes. The
//! asset itself carries no presentation state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Asset;
use super::types::{AssetStatus, AssetType};

/// A change to one observable asset field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetChange {
    Type { old: AssetType, new: AssetType },
    Status { old: AssetStatus, new: AssetStatus },
}

/// Callback invoked after a field changed
pub type ChangeListener = Arc<dyn Fn(&Asset, &AssetChange) + Send + Sync>;

/// Handle returned by [`Asset::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

impl SubscriptionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }
}
