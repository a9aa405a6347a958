// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asset-load primitive
//!
//! Given a source locator, a loader signals success or failure exactly
//! once. Load failures reach the sequence as data (a failed settlement),
//! never as control flow.

#[cfg(any(test, feature = "test-support"))]
mod fake;
mod fs;

use async_trait::async_trait;
use thiserror::Error;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeAssetLoader, LoadCall};
pub use fs::FsAssetLoader;

/// Errors from a single asset load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads one asset from a source locator
#[async_trait]
pub trait AssetLoader: Send + Sync {
    async fn load(&self, src: &str) -> Result<(), LoadError>;
}

/// Loader that treats every source as instantly available
#[derive(Clone, Default)]
pub struct NoOpAssetLoader;

#[async_trait]
impl AssetLoader for NoOpAssetLoader {
    async fn load(&self, _src: &str) -> Result<(), LoadError> {
        Ok(())
    }
}
