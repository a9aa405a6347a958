// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the sequence driver's external I/O: the asset-load
//! primitive, the native frame-tick primitive, and surfaces.

pub mod frames;
pub mod loader;
pub mod surface;
pub mod traced;

pub use frames::{FrameSource, TimerFrameSource};
pub use loader::{AssetLoader, FsAssetLoader, LoadError, NoOpAssetLoader};
pub use surface::NoOpSurface;
pub use traced::TracedAssetLoader;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use frames::ManualFrameSource;
#[cfg(any(test, feature = "test-support"))]
pub use loader::{FakeAssetLoader, LoadCall};
#[cfg(any(test, feature = "test-support"))]
pub use surface::{FakeSurface, SurfaceCall};
