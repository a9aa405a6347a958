// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequence controller: an ordered task queue driven by timeline ticks
//!
//! The controller owns the task list, an execution cursor, a lifecycle
//! state, and a [`Timeline`]. It is a pure state machine: every
//! lifecycle call takes `now` and returns the [`Directive`]s the driver
//! must act on (subscribe to frames, sleep, run a preload batch). Sync
//! tasks are consumed in an explicit loop, so long synchronous chains
//! never grow the call stack.
//!
//! Rewinding (`repeat`) is an outcome interpreted here, not a callback
//! mutating the cursor; a cycle that never suspends on a frame or a
//! wait is the caller's own infinite loop, exactly as ordered.

use crate::id::{IdGen, UuidIdGen};
use crate::preload::{AssetSpec, PreloadBatch, PreloadItem, PreloadOutcome};
use crate::surface::SurfaceHandle;
use crate::task::{StepOutcome, Task, TaskBody, TaskKind, TickContext};
use crate::timeline::{Timeline, DEFAULT_INTERVAL};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Lifecycle state of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// Configuring, or disposed
    Idle,
    Running,
    Paused,
}

/// What the driver must do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Begin feeding native frames to `on_frame`
    RequestFrames,
    /// Stop the frame subscription
    CancelFrames,
    /// Run the batch: load each item, report via `settle_asset`, and
    /// honor the timeout via `preload_timed_out`
    Preload {
        items: Vec<PreloadItem>,
        timeout: Option<Duration>,
    },
    /// Sleep, then call `resume_after_wait`
    Wait { after: Duration },
    /// The queue ran to completion (or was disposed)
    Disposed,
}

/// What the controller is currently suspended on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InFlight {
    None,
    Frames,
    Preload,
}

/// Frame-synchronized task queue controller
pub struct Sequence<I: IdGen = UuidIdGen> {
    tasks: Vec<Task>,
    cursor: usize,
    state: SequenceState,
    timeline: Timeline,
    interval: Duration,
    ids: I,
    in_flight: InFlight,
    /// A wait timer is outstanding
    waiting: bool,
    /// A completion arrived while paused; continue on resume
    resume_pending: bool,
    last_preload: Option<PreloadOutcome>,
}

impl Sequence<UuidIdGen> {
    pub fn new() -> Self {
        Self::with_id_gen(UuidIdGen)
    }
}

impl Default for Sequence<UuidIdGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdGen> Sequence<I> {
    pub fn with_id_gen(ids: I) -> Self {
        Self {
            tasks: Vec::new(),
            cursor: 0,
            state: SequenceState::Idle,
            timeline: Timeline::new(),
            interval: DEFAULT_INTERVAL,
            ids,
            in_flight: InFlight::None,
            waiting: false,
            resume_pending: false,
            last_preload: None,
        }
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Outcome of the most recently completed preload batch
    pub fn last_preload(&self) -> Option<PreloadOutcome> {
        self.last_preload
    }

    // --- queue building ----------------------------------------------------

    /// Append a task gating on a batch of parallel asset loads.
    ///
    /// Load failures never block progression; they only poison the
    /// batch outcome recorded in [`Sequence::last_preload`].
    pub fn preload<S: Into<AssetSpec>>(
        &mut self,
        assets: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.preload_with_timeout(assets, None)
    }

    /// Like [`Sequence::preload`], racing the batch against a timeout.
    pub fn preload_with_timeout<S: Into<AssetSpec>>(
        &mut self,
        assets: impl IntoIterator<Item = S>,
        timeout: impl Into<Option<Duration>>,
    ) -> &mut Self {
        let batch = PreloadBatch::new(assets, &self.ids);
        self.append(Task::new(TaskBody::Preload {
            batch,
            timeout: timeout.into(),
        }))
    }

    /// Append an async task that sweeps a surface through keyframe
    /// offsets, one per tick, applying the backdrop URL when given.
    ///
    /// An empty keyframe list degrades to a no-op sync task.
    pub fn keyframes(
        &mut self,
        surface: SurfaceHandle,
        positions: Vec<(f64, f64)>,
        backdrop: Option<String>,
    ) -> &mut Self {
        if positions.is_empty() {
            return self.append(Task::sync_step(Box::new(|_| StepOutcome::Advance)));
        }
        let len = positions.len();
        self.append(Task::async_step(Box::new(move |ctx| {
            let frame = frame_index(ctx, len);
            if frame == 0 {
                return StepOutcome::Pending;
            }
            let mut surface = surface.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(url) = backdrop.as_deref() {
                surface.set_backdrop(url);
            }
            let (x, y) = positions[frame - 1];
            surface.set_offset(x, y);
            if frame == len {
                StepOutcome::Advance
            } else {
                StepOutcome::Pending
            }
        })))
    }

    /// Append an async task that steps a surface through image sources,
    /// one per tick. Empty lists degrade to a no-op sync task.
    pub fn frame_images(&mut self, surface: SurfaceHandle, urls: Vec<String>) -> &mut Self {
        if urls.is_empty() {
            return self.append(Task::sync_step(Box::new(|_| StepOutcome::Advance)));
        }
        let len = urls.len();
        self.append(Task::async_step(Box::new(move |ctx| {
            let frame = frame_index(ctx, len);
            if frame == 0 {
                return StepOutcome::Pending;
            }
            let mut surface = surface.lock().unwrap_or_else(|e| e.into_inner());
            surface.set_image(&urls[frame - 1]);
            if frame == len {
                StepOutcome::Advance
            } else {
                StepOutcome::Pending
            }
        })))
    }

    /// Append a raw per-tick task. The action sees elapsed time each
    /// tick and decides when the task is over.
    pub fn on_frames(
        &mut self,
        action: impl FnMut(&TickContext) -> StepOutcome + Send + 'static,
    ) -> &mut Self {
        self.append(Task::async_step(Box::new(action)))
    }

    /// Append a sync task invoking the callback once the previous task
    /// has completed.
    pub fn then(&mut self, mut callback: impl FnMut(&TickContext) + Send + 'static) -> &mut Self {
        self.append(Task::sync_step(Box::new(move |ctx| {
            callback(ctx);
            StepOutcome::Advance
        })))
    }

    /// Set the delay between the most recently appended task completing
    /// and the next task starting. No-op on an empty queue.
    pub fn wait(&mut self, after: Duration) -> &mut Self {
        if self.state != SequenceState::Idle {
            warn!("wait ignored while sequence is executing");
            return self;
        }
        if let Some(task) = self.tasks.last_mut() {
            task.wait_after = Some(after);
        }
        self
    }

    /// Append a task that rewinds to the previous task `times` times,
    /// then falls through to a normal advance.
    pub fn repeat(&mut self, times: u32) -> &mut Self {
        self.append(Task::new(TaskBody::Repeat {
            remaining: Some(times),
        }))
    }

    /// Append a task that rewinds to the previous task unconditionally.
    /// The cycle needs a frame or wait suspension point to ever yield.
    pub fn repeat_forever(&mut self) -> &mut Self {
        self.append(Task::new(TaskBody::Repeat { remaining: None }))
    }

    fn append(&mut self, task: Task) -> &mut Self {
        if self.state != SequenceState::Idle {
            warn!("task append ignored while sequence is executing");
            return self;
        }
        self.tasks.push(task);
        self
    }

    // --- lifecycle ---------------------------------------------------------

    /// Begin (or re-begin) execution from the cursor.
    ///
    /// No-op when already running or when the queue is empty. A zero or
    /// omitted interval falls back to [`DEFAULT_INTERVAL`].
    pub fn start(&mut self, interval: Option<Duration>, now: Instant) -> Vec<Directive> {
        let mut out = Vec::new();
        if self.state == SequenceState::Running {
            debug!("start ignored: already running");
            return out;
        }
        if self.tasks.is_empty() {
            debug!("start ignored: queue is empty");
            return out;
        }
        self.interval = match interval {
            Some(d) if !d.is_zero() => d,
            _ => DEFAULT_INTERVAL,
        };
        self.state = SequenceState::Running;
        self.timeline.reset();
        self.in_flight = InFlight::None;
        self.waiting = false;
        self.resume_pending = false;
        debug!(cursor = self.cursor, interval_ms = self.interval.as_millis() as u64, "sequence started");
        self.run_loop(now, &mut out);
        out
    }

    /// Feed one native frame. Ticks faster than the interval are
    /// swallowed; a qualifying tick runs the in-flight async task.
    pub fn on_frame(&mut self, now: Instant) -> Vec<Directive> {
        let mut out = Vec::new();
        if self.state != SequenceState::Running || self.in_flight != InFlight::Frames {
            return out;
        }
        let Some(elapsed) = self.timeline.on_frame(now) else {
            return out;
        };
        let Some(wait_after) = self.tasks.get(self.cursor).map(|t| t.wait_after) else {
            return out;
        };
        let ctx = TickContext {
            elapsed,
            interval: self.interval,
            cursor: self.cursor,
            queue_len: self.tasks.len(),
        };
        let outcome = match &mut self.tasks[self.cursor].body {
            TaskBody::Step {
                kind: TaskKind::Async,
                action,
            } => action(&ctx),
            _ => {
                warn!(cursor = self.cursor, "tick delivered to a non-frame task");
                return out;
            }
        };
        if outcome == StepOutcome::Pending {
            return out;
        }
        // Task over: end its tick subscription before moving on.
        self.timeline.stop(now);
        self.in_flight = InFlight::None;
        out.push(Directive::CancelFrames);
        if !self.step_cursor(outcome, wait_after, &mut out) {
            self.run_loop(now, &mut out);
        }
        out
    }

    /// Report one asset load settlement for the in-flight batch.
    pub fn settle_asset(&mut self, key: &str, ok: bool, now: Instant) -> Vec<Directive> {
        let mut out = Vec::new();
        if self.in_flight != InFlight::Preload {
            debug!(key, "load settled with no batch in flight");
            return out;
        }
        let Some(task) = self.tasks.get_mut(self.cursor) else {
            return out;
        };
        let TaskBody::Preload { batch, .. } = &mut task.body else {
            return out;
        };
        if batch.settle(key, ok).is_none() {
            return out;
        }
        let outcome = batch.outcome();
        self.finish_preload(outcome, now, &mut out);
        out
    }

    /// The batch timeout fired before every load settled.
    pub fn preload_timed_out(&mut self, now: Instant) -> Vec<Directive> {
        let mut out = Vec::new();
        if self.in_flight != InFlight::Preload {
            return out;
        }
        let Some(task) = self.tasks.get_mut(self.cursor) else {
            return out;
        };
        let TaskBody::Preload { batch, .. } = &mut task.body else {
            return out;
        };
        if batch.timed_out().is_none() {
            return out;
        }
        let outcome = batch.outcome();
        self.finish_preload(outcome, now, &mut out);
        out
    }

    /// The one-shot wait timer fired; continue with the next task.
    pub fn resume_after_wait(&mut self, now: Instant) -> Vec<Directive> {
        let mut out = Vec::new();
        if !self.waiting {
            return out;
        }
        self.waiting = false;
        match self.state {
            SequenceState::Running => self.run_loop(now, &mut out),
            SequenceState::Paused => self.resume_pending = true,
            SequenceState::Idle => {}
        }
        out
    }

    /// Suspend execution. Only an in-flight async task is meaningfully
    /// suspended; its elapsed clock is captured for resume.
    pub fn pause(&mut self, now: Instant) -> Vec<Directive> {
        let mut out = Vec::new();
        if self.state != SequenceState::Running {
            return out;
        }
        self.state = SequenceState::Paused;
        debug!(cursor = self.cursor, "sequence paused");
        if self.in_flight == InFlight::Frames {
            self.timeline.stop(now);
            out.push(Directive::CancelFrames);
        }
        out
    }

    /// Resume a paused sequence; an in-flight async task's elapsed
    /// clock continues from its pre-pause value.
    pub fn resume(&mut self, now: Instant) -> Vec<Directive> {
        let mut out = Vec::new();
        if self.state != SequenceState::Paused {
            return out;
        }
        self.state = SequenceState::Running;
        debug!(cursor = self.cursor, "sequence resumed");
        match self.in_flight {
            InFlight::Frames => {
                self.timeline.restart(now);
                out.push(Directive::RequestFrames);
            }
            InFlight::Preload => {
                // Loads kept settling while paused; if the batch already
                // delivered, the continuation was parked for us.
                if self.resume_pending {
                    self.resume_pending = false;
                    self.run_loop(now, &mut out);
                }
            }
            InFlight::None => {
                if self.resume_pending {
                    self.resume_pending = false;
                    self.run_loop(now, &mut out);
                }
            }
        }
        out
    }

    /// Release everything: clear the queue, stop the timeline, return
    /// to `Idle`. Idempotent; a no-op before the first start.
    pub fn dispose(&mut self) -> Vec<Directive> {
        let mut out = Vec::new();
        if self.state == SequenceState::Idle {
            return out;
        }
        self.dispose_into(&mut out);
        out
    }

    // --- execution ---------------------------------------------------------

    /// Consume tasks until execution suspends (frames, preload, wait),
    /// the state leaves `Running`, or the queue is exhausted.
    fn run_loop(&mut self, now: Instant, out: &mut Vec<Directive>) {
        while self.state == SequenceState::Running {
            if self.cursor >= self.tasks.len() {
                self.dispose_into(out);
                return;
            }
            let ctx = TickContext {
                elapsed: Duration::ZERO,
                interval: self.interval,
                cursor: self.cursor,
                queue_len: self.tasks.len(),
            };
            let wait_after = self.tasks[self.cursor].wait_after;
            let mut delivered = None;
            let outcome = match &mut self.tasks[self.cursor].body {
                TaskBody::Step {
                    kind: TaskKind::Async,
                    ..
                } => {
                    self.timeline.start(Some(self.interval), now);
                    self.in_flight = InFlight::Frames;
                    out.push(Directive::RequestFrames);
                    return;
                }
                TaskBody::Step {
                    kind: TaskKind::Sync,
                    action,
                } => action(&ctx),
                TaskBody::Repeat { remaining } => match remaining {
                    None => StepOutcome::Rewind,
                    Some(0) => StepOutcome::Advance,
                    Some(n) => {
                        *n -= 1;
                        StepOutcome::Rewind
                    }
                },
                TaskBody::Preload { batch, timeout } => {
                    if batch.is_delivered() {
                        // Empty valid set, or a rewound visit to an
                        // already-settled batch: complete synchronously.
                        delivered = batch.outcome();
                        StepOutcome::Advance
                    } else {
                        let items = batch.begin();
                        let timeout = *timeout;
                        self.in_flight = InFlight::Preload;
                        out.push(Directive::Preload { items, timeout });
                        return;
                    }
                }
            };
            if let Some(result) = delivered {
                self.note_preload(result);
            }
            if self.step_cursor(outcome, wait_after, out) {
                return;
            }
        }
    }

    /// Apply a completion outcome to the cursor; returns true when
    /// execution suspended on a wait timer. Rewinds bypass `wait_after`
    /// entirely; the delay belongs to the advance path, so a repeating
    /// task's wait fires once on exit, not once per rewound pass.
    fn step_cursor(
        &mut self,
        outcome: StepOutcome,
        wait_after: Option<Duration>,
        out: &mut Vec<Directive>,
    ) -> bool {
        match outcome {
            StepOutcome::Advance => self.cursor += 1,
            StepOutcome::Rewind if self.cursor > 0 => {
                self.cursor -= 1;
                return false;
            }
            StepOutcome::Rewind => {
                warn!("rewind with no previous task; advancing");
                self.cursor += 1;
            }
            StepOutcome::Pending => {
                warn!(cursor = self.cursor, "sync task reported pending; advancing");
                self.cursor += 1;
            }
        }
        if let Some(after) = wait_after {
            self.waiting = true;
            out.push(Directive::Wait { after });
            return true;
        }
        false
    }

    /// The in-flight batch delivered its outcome.
    fn finish_preload(
        &mut self,
        outcome: Option<PreloadOutcome>,
        now: Instant,
        out: &mut Vec<Directive>,
    ) {
        if let Some(result) = outcome {
            self.note_preload(result);
        }
        self.in_flight = InFlight::None;
        let wait_after = self.tasks.get(self.cursor).and_then(|t| t.wait_after);
        if self.step_cursor(StepOutcome::Advance, wait_after, out) {
            return;
        }
        match self.state {
            SequenceState::Running => self.run_loop(now, out),
            SequenceState::Paused => self.resume_pending = true,
            SequenceState::Idle => {}
        }
    }

    fn note_preload(&mut self, result: PreloadOutcome) {
        if result.success {
            debug!("preload batch complete");
        } else {
            warn!(timed_out = result.timed_out, "preload batch failed");
        }
        self.last_preload = Some(result);
    }

    fn dispose_into(&mut self, out: &mut Vec<Directive>) {
        debug!(cursor = self.cursor, "sequence disposed");
        if self.in_flight == InFlight::Frames {
            out.push(Directive::CancelFrames);
        }
        self.tasks.clear();
        self.cursor = 0;
        self.state = SequenceState::Idle;
        self.timeline.reset();
        self.in_flight = InFlight::None;
        self.waiting = false;
        self.resume_pending = false;
        out.push(Directive::Disposed);
    }
}

/// Frame index for a tick: floor(elapsed / interval), clamped to `len`.
/// Divides exact nanoseconds; truncating to whole milliseconds first
/// would drift at fractional intervals like the 60 Hz default.
fn frame_index(ctx: &TickContext, len: usize) -> usize {
    let interval = ctx.interval.as_nanos().max(1);
    ((ctx.elapsed.as_nanos() / interval) as usize).min(len)
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
