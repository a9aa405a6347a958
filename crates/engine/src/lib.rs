// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tokio driver for reel sequences
//!
//! The core emits [`reel_core::Directive`]s; this crate owns the timers,
//! the frame subscription, and the asset loads they demand.

mod config;
mod error;
mod player;

pub use config::PlayerConfig;
pub use error::PlayerError;
pub use player::{Player, RunReport};
