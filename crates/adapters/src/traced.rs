// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::loader::{AssetLoader, LoadError};
use async_trait::async_trait;

/// Wrapper that adds tracing to any AssetLoader
#[derive(Clone)]
pub struct TracedAssetLoader<L> {
    inner: L,
}

impl<L> TracedAssetLoader<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<L: AssetLoader> AssetLoader for TracedAssetLoader<L> {
    async fn load(&self, src: &str) -> Result<(), LoadError> {
        let span = tracing::info_span!("asset.load", src);
        let _guard = span.enter();

        tracing::debug!("loading");

        let start = std::time::Instant::now();
        let result = self.inner.load(src).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "loaded"),
            // A failed load is data to the sequence, not an abort
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "load failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
