//! Shared helpers for the behavioral specs

pub use reel_adapters::{
    AssetLoader, FakeAssetLoader, FakeSurface, ManualFrameSource, NoOpAssetLoader, SurfaceCall,
};
pub use reel_core::{surface_handle, FakeClock, Sequence, SequentialIdGen};
pub use reel_engine::{Player, PlayerConfig, RunReport};
pub use std::sync::{Arc, Mutex};
pub use std::time::Duration;

pub const TICK: Duration = Duration::from_millis(20);

pub fn sequence() -> Sequence<SequentialIdGen> {
    Sequence::with_id_gen(SequentialIdGen::default())
}

pub fn config() -> PlayerConfig {
    PlayerConfig {
        tick_interval: TICK,
        ..PlayerConfig::default()
    }
}

pub fn journal() -> Arc<Mutex<Vec<&'static str>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Arc<Mutex<Vec<&'static str>>>) -> Vec<&'static str> {
    journal.lock().unwrap().clone()
}

/// Run a sequence through the player, advancing a fake clock by one tick
/// per native frame. Suitable for sequences without `wait` gaps; those
/// are exercised under a paused tokio runtime instead.
pub async fn drive<L: AssetLoader + 'static>(
    loader: L,
    seq: Sequence<SequentialIdGen>,
) -> RunReport {
    let clock = FakeClock::new();
    let frames = ManualFrameSource::new();
    let player = Player::with_clock(loader, frames.clone(), clock.clone(), config());
    let run = tokio::spawn(async move { player.run(seq).await });

    for _ in 0..1000 {
        if run.is_finished() {
            break;
        }
        tokio::task::yield_now().await;
        clock.advance(TICK);
        frames.fire();
    }
    run.await.unwrap()
}
