// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-interval tick timeline over a faster native frame signal
//!
//! The timeline turns a stream of native frame timestamps into a
//! rate-limited tick stream: [`Timeline::on_frame`] fires at most once
//! per configured interval and reports elapsed time since the current
//! run segment started. Frames arriving faster than the interval are
//! coalesced, never queued.
//!
//! The platform subscription itself (request/cancel of native frames)
//! belongs to the driver; this machine only decides when a tick fires.

use std::time::{Duration, Instant};

/// Default tick interval: one tick per frame at 60 Hz.
pub const DEFAULT_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Lifecycle state of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    /// Never started, or reset
    Initial,
    /// Ticks are firing
    Running,
    /// Suspended; elapsed progress is retained for `restart`
    Stopped,
}

/// Rate-limiting tick emitter with stop/restart bookkeeping
#[derive(Debug, Clone)]
pub struct Timeline {
    state: TimelineState,
    interval: Option<Duration>,
    started_at: Option<Instant>,
    last_fired: Option<Instant>,
    /// Elapsed run time captured at the most recent stop
    recorded: Option<Duration>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            state: TimelineState::Initial,
            interval: None,
            started_at: None,
            last_fired: None,
            recorded: None,
        }
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Begin a fresh run segment at `now`.
    ///
    /// No-op when already running. A zero or omitted interval falls back
    /// to [`DEFAULT_INTERVAL`].
    pub fn start(&mut self, interval: Option<Duration>, now: Instant) {
        if self.state == TimelineState::Running {
            return;
        }
        let interval = match interval {
            Some(d) if !d.is_zero() => d,
            _ => DEFAULT_INTERVAL,
        };
        self.interval = Some(interval);
        self.begin_segment(now, now);
    }

    /// Feed one native frame timestamp; returns the elapsed run time when
    /// a rate-limited tick fires.
    pub fn on_frame(&mut self, now: Instant) -> Option<Duration> {
        if self.state != TimelineState::Running {
            return None;
        }
        let interval = self.interval?;
        let started_at = self.started_at?;
        let since_last = self
            .last_fired
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or(interval);
        if since_last < interval {
            return None;
        }
        self.last_fired = Some(now);
        Some(now.saturating_duration_since(started_at))
    }

    /// Suspend the timeline, capturing elapsed progress.
    pub fn stop(&mut self, now: Instant) {
        if self.state != TimelineState::Running {
            return;
        }
        self.state = TimelineState::Stopped;
        if let Some(started_at) = self.started_at {
            self.recorded = Some(now.saturating_duration_since(started_at));
        }
    }

    /// Resume a stopped timeline with elapsed time continuing from the
    /// value captured at stop.
    ///
    /// No-op unless stopped with a recorded duration and interval.
    pub fn restart(&mut self, now: Instant) {
        if self.state != TimelineState::Stopped {
            return;
        }
        let (Some(recorded), Some(_)) = (self.recorded, self.interval) else {
            return;
        };
        // Synthetic start keeps the elapsed argument monotonic across
        // the stop/restart cycle.
        self.begin_segment(now - recorded, now);
    }

    /// Drop all bookkeeping and return to `Initial`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn begin_segment(&mut self, started_at: Instant, now: Instant) {
        self.state = TimelineState::Running;
        self.started_at = Some(started_at);
        self.last_fired = Some(now);
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
