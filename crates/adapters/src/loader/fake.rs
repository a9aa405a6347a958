// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake asset loader for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AssetLoader, LoadError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCall {
    pub src: String,
}

#[derive(Clone)]
struct Plan {
    ok: bool,
    delay: Option<Duration>,
}

/// Fake asset loader with per-source preset outcomes.
///
/// Unplanned sources load successfully without delay.
#[derive(Clone, Default)]
pub struct FakeAssetLoader {
    plans: Arc<Mutex<HashMap<String, Plan>>>,
    calls: Arc<Mutex<Vec<LoadCall>>>,
}

impl FakeAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a source fail to load
    pub fn fail(&self, src: &str) {
        self.plan(src, Plan { ok: false, delay: None });
    }

    /// Delay a source's (successful) load
    pub fn delay(&self, src: &str, delay: Duration) {
        self.plan(
            src,
            Plan {
                ok: true,
                delay: Some(delay),
            },
        );
    }

    /// Get all recorded load requests
    pub fn calls(&self) -> Vec<LoadCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn plan(&self, src: &str, plan: Plan) {
        self.plans
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(src.to_string(), plan);
    }
}

#[async_trait]
impl AssetLoader for FakeAssetLoader {
    async fn load(&self, src: &str) -> Result<(), LoadError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(LoadCall {
                src: src.to_string(),
            });
        let plan = self
            .plans
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(src)
            .cloned();
        let Some(plan) = plan else {
            return Ok(());
        };
        if let Some(delay) = plan.delay {
            tokio::time::sleep(delay).await;
        }
        if plan.ok {
            Ok(())
        } else {
            Err(LoadError::NotFound(src.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
