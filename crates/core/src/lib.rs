// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! reel-core: frame-synchronized task sequencing
//!
//! This crate provides:
//! - Pure, clock-driven state machines for the tick timeline and the
//!   task sequence controller
//! - The preload batch aggregator for gating a task on parallel loads
//! - The `Surface` trait marking the boundary to the visual collaborator
//!
//! Nothing here performs I/O. The state machines consume `Instant`s and
//! emit [`Directive`]s; a driver (see `reel-engine`) owns timers, frame
//! subscriptions, and asset loads.

pub mod clock;
pub mod id;

pub mod preload;
pub mod sequence;
pub mod surface;
pub mod task;
pub mod timeline;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use preload::{AssetSpec, AssetStatus, PreloadBatch, PreloadItem, PreloadOutcome};
pub use sequence::{Directive, Sequence, SequenceState};
pub use surface::{surface_handle, Surface, SurfaceHandle};
pub use task::{StepOutcome, Task, TaskBody, TaskKind, TickContext};
pub use timeline::{Timeline, TimelineState, DEFAULT_INTERVAL};
