// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch asset-preload aggregation
//!
//! A [`PreloadBatch`] is created per preload task, hands the driver a
//! work list of `(key, src)` pairs, and aggregates the settlements back
//! into a single boolean outcome. The outcome is produced exactly once,
//! through whichever path wins: empty valid set, all loads settled, or
//! the timeout. Keys are minted locally from an [`IdGen`], so no global
//! registry of in-flight loads exists.

use crate::id::IdGen;
use serde::Serialize;

/// One source entry handed to a preload task: a bare URL, or an entry
/// whose source may be absent (and is then skipped without counting).
#[derive(Debug, Clone, Default)]
pub struct AssetSpec {
    pub src: Option<String>,
}

impl AssetSpec {
    pub fn url(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
        }
    }
}

impl From<&str> for AssetSpec {
    fn from(src: &str) -> Self {
        Self::url(src)
    }
}

impl From<String> for AssetSpec {
    fn from(src: String) -> Self {
        Self::url(src)
    }
}

/// Load state of one normalized descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Pending,
    Loading,
    Loaded,
    Error,
}

/// A normalized descriptor with a batch-local key
#[derive(Debug, Clone)]
pub struct AssetDescriptor {
    pub key: String,
    pub src: String,
    pub status: AssetStatus,
}

/// Work item handed to the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadItem {
    pub key: String,
    pub src: String,
}

/// Final outcome of a batch, kept for caller inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreloadOutcome {
    /// Logical AND over every settlement
    pub success: bool,
    pub timed_out: bool,
}

/// Transient aggregator over one batch of parallel loads
#[derive(Debug, Clone)]
pub struct PreloadBatch {
    items: Vec<AssetDescriptor>,
    pending: usize,
    success: bool,
    timed_out: bool,
    delivered: bool,
}

impl PreloadBatch {
    /// Normalize the specs into descriptors, skipping entries without a
    /// usable source. An all-invalid (or empty) batch delivers `true`
    /// without any driver involvement.
    pub fn new<S: Into<AssetSpec>>(specs: impl IntoIterator<Item = S>, ids: &impl IdGen) -> Self {
        let items: Vec<AssetDescriptor> = specs
            .into_iter()
            .map(Into::into)
            .filter_map(|spec| {
                let src = spec.src.filter(|s| !s.is_empty())?;
                Some(AssetDescriptor {
                    key: ids.next(),
                    src,
                    status: AssetStatus::Pending,
                })
            })
            .collect();
        let pending = items.len();
        Self {
            items,
            pending,
            success: true,
            timed_out: false,
            delivered: pending == 0,
        }
    }

    /// Mark every descriptor loading and return the driver's work list.
    pub fn begin(&mut self) -> Vec<PreloadItem> {
        self.items
            .iter_mut()
            .map(|item| {
                item.status = AssetStatus::Loading;
                PreloadItem {
                    key: item.key.clone(),
                    src: item.src.clone(),
                }
            })
            .collect()
    }

    /// Record one load settlement.
    ///
    /// Returns `Some(overall)` exactly when this settlement completes the
    /// batch and nothing has been delivered yet. Unknown keys and repeat
    /// settlements are ignored; settlements arriving after a timeout
    /// still move the descriptor to a terminal status.
    pub fn settle(&mut self, key: &str, ok: bool) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.key == key)?;
        if matches!(item.status, AssetStatus::Loaded | AssetStatus::Error) {
            return None;
        }
        item.status = if ok {
            AssetStatus::Loaded
        } else {
            AssetStatus::Error
        };
        self.success = self.success && ok;
        self.pending -= 1;

        if self.pending == 0 && !self.delivered {
            self.delivered = true;
            return Some(self.success);
        }
        None
    }

    /// The timeout fired. Returns `Some(false)` on the first call before
    /// completion; anything later is swallowed by the delivered guard.
    pub fn timed_out(&mut self) -> Option<bool> {
        if self.delivered {
            return None;
        }
        self.delivered = true;
        self.timed_out = true;
        self.success = false;
        Some(false)
    }

    /// Outcome once delivered (empty batches deliver immediately).
    pub fn outcome(&self) -> Option<PreloadOutcome> {
        self.delivered.then_some(PreloadOutcome {
            success: self.success,
            timed_out: self.timed_out,
        })
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn descriptors(&self) -> &[AssetDescriptor] {
        &self.items
    }
}

#[cfg(test)]
#[path = "preload_tests.rs"]
mod tests;
