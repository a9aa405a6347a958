// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task model for the sequence controller
//!
//! A task is one unit of scheduled work. Sync steps run to completion in
//! a single invocation; Async steps are re-invoked on every qualifying
//! tick until they report something other than [`StepOutcome::Pending`].
//!
//! Control flow is expressed as a tagged outcome interpreted by the
//! controller: actions never touch the cursor themselves, and they
//! receive an explicit [`TickContext`] instead of capturing controller
//! internals.

use crate::preload::PreloadBatch;
use std::time::Duration;

/// What a step reports after one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Move on to the next task
    Advance,
    /// Re-run the previous task
    Rewind,
    /// Not finished; invoke again on the next tick (Async steps only)
    Pending,
}

/// Whether a step completes in one invocation or spans ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Sync,
    Async,
}

/// Execution context handed to every step invocation
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Run time of the current timeline segment (zero for Sync steps)
    pub elapsed: Duration,
    /// Configured tick interval of the sequence
    pub interval: Duration,
    /// Index of the task being executed
    pub cursor: usize,
    /// Number of tasks in the queue
    pub queue_len: usize,
}

/// A step action, driven by the controller
pub type StepFn = Box<dyn FnMut(&TickContext) -> StepOutcome + Send>;

/// The body of a queued task
pub enum TaskBody {
    /// A user-supplied step, Sync or Async
    Step { kind: TaskKind, action: StepFn },
    /// Rewind to the previous task; `None` rewinds forever, a finite
    /// counter is consumed one visit at a time
    Repeat { remaining: Option<u32> },
    /// Gate on a batch of parallel asset loads
    Preload {
        batch: PreloadBatch,
        timeout: Option<Duration>,
    },
}

impl std::fmt::Debug for TaskBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskBody::Step { kind, .. } => f.debug_struct("Step").field("kind", kind).finish(),
            TaskBody::Repeat { remaining } => {
                f.debug_struct("Repeat").field("remaining", remaining).finish()
            }
            TaskBody::Preload { batch, timeout } => f
                .debug_struct("Preload")
                .field("pending", &batch.pending())
                .field("timeout", timeout)
                .finish(),
        }
    }
}

/// One queued unit of work
#[derive(Debug)]
pub struct Task {
    pub body: TaskBody,
    /// Delay between this task completing and the next one starting.
    /// The only field that may change after append (via `wait`).
    pub wait_after: Option<Duration>,
}

impl Task {
    pub fn new(body: TaskBody) -> Self {
        Self {
            body,
            wait_after: None,
        }
    }

    pub fn sync_step(action: StepFn) -> Self {
        Self::new(TaskBody::Step {
            kind: TaskKind::Sync,
            action,
        })
    }

    pub fn async_step(action: StepFn) -> Self {
        Self::new(TaskBody::Step {
            kind: TaskKind::Async,
            action,
        })
    }
}
