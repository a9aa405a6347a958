// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-backed asset loader

use super::{AssetLoader, LoadError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Resolves sources as files under a root directory.
///
/// A `file:` prefix is stripped; sources reaching outside the root are
/// rejected rather than resolved.
#[derive(Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, src: &str) -> Result<PathBuf, LoadError> {
        let src = src.strip_prefix("file:").unwrap_or(src);
        if src.contains("://") {
            return Err(LoadError::UnsupportedSource(src.to_string()));
        }
        let relative = Path::new(src.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(LoadError::UnsupportedSource(src.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetLoader for FsAssetLoader {
    async fn load(&self, src: &str) -> Result<(), LoadError> {
        let path = self.resolve(src)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(LoadError::NotFound(src.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::NotFound(src.to_string()))
            }
            Err(e) => Err(LoadError::Io(e)),
        }
    }
}
