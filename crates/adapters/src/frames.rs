// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Native frame-tick primitive
//!
//! A [`FrameSource`] yields one native frame signal per call; the
//! driver re-awaits immediately so the stream continues regardless of
//! handler cost. The sequence's timeline rate-limits on top of this, so
//! the source period is the *native* rate, not the tick interval.

use async_trait::async_trait;
use std::time::Duration;

#[cfg(any(test, feature = "test-support"))]
use std::sync::Arc;
#[cfg(any(test, feature = "test-support"))]
use tokio::sync::Notify;

/// Yields the next native frame signal
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn next_frame(&self);
}

/// Timer-backed frame source, the fallback when no platform frame
/// callback exists. Defaults to a 60 Hz native rate.
#[derive(Clone)]
pub struct TimerFrameSource {
    period: Duration,
}

impl TimerFrameSource {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for TimerFrameSource {
    fn default() -> Self {
        Self::new(Duration::from_nanos(16_666_667))
    }
}

#[async_trait]
impl FrameSource for TimerFrameSource {
    async fn next_frame(&self) {
        tokio::time::sleep(self.period).await;
    }
}

/// Frame source fired on demand from a test body
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Default)]
pub struct ManualFrameSource {
    notify: Arc<Notify>,
}

#[cfg(any(test, feature = "test-support"))]
impl ManualFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release one pending (or the next) `next_frame` await
    pub fn fire(&self) {
        self.notify.notify_one();
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl FrameSource for ManualFrameSource {
    async fn next_frame(&self) {
        self.notify.notified().await;
    }
}
