//! Behavioral specifications for reel.
//!
//! These tests are end-to-end: full sequences driven through the engine's
//! `Player` against fake adapters, verifying what reaches the surface and
//! in what order.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/playback.rs"]
mod playback;
#[path = "specs/preload.rs"]
mod preload;
