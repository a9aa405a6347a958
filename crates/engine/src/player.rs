// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequence driver
//!
//! The [`Player`] owns the I/O a [`Sequence`] asks for: it sleeps for
//! `Wait` directives, awaits the frame source while a frame subscription
//! is active, and runs preload batches as concurrent loads raced against
//! their timeout. The sequence itself never blocks; every call into it
//! passes the current clock reading and returns more directives.

use crate::config::PlayerConfig;
use reel_core::{Clock, Directive, IdGen, PreloadItem, PreloadOutcome, Sequence, SystemClock};
use reel_adapters::{AssetLoader, FrameSource, TimerFrameSource};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::debug;

/// What a finished run looked like
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// The queue ran (or was disposed) to completion
    pub completed: bool,
    /// Outcome of the last preload batch that delivered, if any
    pub preload: Option<PreloadOutcome>,
}

/// Drives a sequence to completion over tokio
pub struct Player<L, F, C = SystemClock> {
    loader: Arc<L>,
    frames: F,
    clock: C,
    config: PlayerConfig,
}

impl<L, F> Player<L, F, SystemClock> {
    pub fn new(loader: L, frames: F, config: PlayerConfig) -> Self {
        Self::with_clock(loader, frames, SystemClock, config)
    }
}

impl<L> Player<L, TimerFrameSource, SystemClock> {
    /// Driver backed by the timer frame source at the configured native
    /// frame period.
    pub fn with_timer_frames(loader: L, config: PlayerConfig) -> Self {
        let frames = TimerFrameSource::new(config.frame_period);
        Self::new(loader, frames, config)
    }
}

impl<L, F, C> Player<L, F, C> {
    pub fn with_clock(loader: L, frames: F, clock: C, config: PlayerConfig) -> Self {
        Self {
            loader: Arc::new(loader),
            frames,
            clock,
            config,
        }
    }
}

impl<L, F, C> Player<L, F, C>
where
    L: AssetLoader + 'static,
    F: FrameSource,
    C: Clock,
{
    /// Run the sequence until it disposes.
    ///
    /// A sequence with no tasks returns immediately with
    /// `completed == false`, matching the controller's no-op start.
    pub async fn run<I: IdGen>(&self, mut sequence: Sequence<I>) -> RunReport {
        let mut queue: VecDeque<Directive> = sequence
            .start(Some(self.config.tick_interval), self.clock.now())
            .into();
        let mut frames_active = false;
        let mut completed = false;

        loop {
            while let Some(directive) = queue.pop_front() {
                match directive {
                    Directive::RequestFrames => frames_active = true,
                    Directive::CancelFrames => frames_active = false,
                    Directive::Wait { after } => {
                        debug!(after_ms = after.as_millis() as u64, "waiting");
                        tokio::time::sleep(after).await;
                        queue.extend(sequence.resume_after_wait(self.clock.now()));
                    }
                    Directive::Preload { items, timeout } => {
                        let produced = self.run_preload(&mut sequence, items, timeout).await;
                        queue.extend(produced);
                    }
                    Directive::Disposed => completed = true,
                }
            }
            if completed || !frames_active {
                break;
            }
            self.frames.next_frame().await;
            queue.extend(sequence.on_frame(self.clock.now()));
        }

        RunReport {
            completed,
            preload: sequence.last_preload(),
        }
    }

    /// Run one preload batch: every load in parallel, raced against the
    /// timeout. Dropping the join set at timeout cancels stragglers; the
    /// batch's delivered guard swallows anything that settles later.
    async fn run_preload<I: IdGen>(
        &self,
        sequence: &mut Sequence<I>,
        items: Vec<PreloadItem>,
        timeout: Option<Duration>,
    ) -> Vec<Directive> {
        let mut loads: JoinSet<(String, bool)> = JoinSet::new();
        for item in items {
            let loader = Arc::clone(&self.loader);
            loads.spawn(async move {
                let ok = loader.load(&item.src).await.is_ok();
                (item.key, ok)
            });
        }

        let timeout = timeout.or(self.config.preload_timeout);
        let mut deadline: Pin<Box<dyn Future<Output = ()> + Send>> = match timeout {
            Some(after) => Box::pin(tokio::time::sleep(after)),
            None => Box::pin(std::future::pending()),
        };

        let mut out = Vec::new();
        loop {
            tokio::select! {
                () = &mut deadline => {
                    debug!("preload batch timed out");
                    out.extend(sequence.preload_timed_out(self.clock.now()));
                    break;
                }
                settled = loads.join_next() => match settled {
                    Some(Ok((key, ok))) => {
                        out.extend(sequence.settle_asset(&key, ok, self.clock.now()));
                    }
                    Some(Err(err)) if err.is_panic() => {
                        std::panic::resume_unwind(err.into_panic());
                    }
                    Some(Err(_)) => {}
                    None => break,
                },
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod tests;
