// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Visual-state collaborator boundary
//!
//! Frame tasks drive whatever is on the other side of this trait; the
//! core only invokes it with computed values and defines nothing about
//! how the mutations are applied.

use std::sync::{Arc, Mutex};

/// The three capabilities a frame task may exercise
pub trait Surface: Send {
    /// Set a background-image-like property from a URL
    fn set_backdrop(&mut self, url: &str);
    /// Set a 2D offset
    fn set_offset(&mut self, x: f64, y: f64);
    /// Set an image source from a URL
    fn set_image(&mut self, url: &str);
}

/// Shared handle to a surface, cloneable into task closures
pub type SurfaceHandle = Arc<Mutex<dyn Surface>>;

/// Wrap a surface for use by frame tasks
pub fn surface_handle(surface: impl Surface + 'static) -> SurfaceHandle {
    Arc::new(Mutex::new(surface))
}
