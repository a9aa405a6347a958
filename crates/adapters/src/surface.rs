// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Surface implementations
//!
//! `NoOpSurface` discards every mutation, for sequences whose frame
//! tasks exist only for their timing side effects. `FakeSurface`
//! records each call so tests can assert on the exact mutation order.

use reel_core::Surface;

/// Surface that ignores every mutation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSurface;

impl Surface for NoOpSurface {
    fn set_backdrop(&mut self, _url: &str) {}
    fn set_offset(&mut self, _x: f64, _y: f64) {}
    fn set_image(&mut self, _url: &str) {}
}

/// One recorded surface mutation
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Backdrop(String),
    Offset(f64, f64),
    Image(String),
}

/// Surface that records mutations for later inspection
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone)]
pub struct FakeSurface {
    calls: std::sync::Arc<std::sync::Mutex<Vec<SurfaceCall>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn push(&self, call: SurfaceCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Surface for FakeSurface {
    fn set_backdrop(&mut self, url: &str) {
        self.push(SurfaceCall::Backdrop(url.to_string()));
    }

    fn set_offset(&mut self, x: f64, y: f64) {
        self.push(SurfaceCall::Offset(x, y));
    }

    fn set_image(&mut self, url: &str) {
        self.push(SurfaceCall::Image(url.to_string()));
    }
}
