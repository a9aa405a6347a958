//! Playback specs
//!
//! Verify sequences reach the surface in order, with waits and repeats
//! honored.

use crate::prelude::*;

#[tokio::test]
async fn runs_tasks_in_order_and_reports_completion() {
    let log = journal();
    let mut seq = sequence();
    for name in ["open", "middle", "close"] {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push(name));
    }

    let player = Player::new(NoOpAssetLoader, ManualFrameSource::new(), config());
    let report = player.run(seq).await;

    assert!(report.completed);
    assert_eq!(entries(&log), vec!["open", "middle", "close"]);
}

#[tokio::test(start_paused = true)]
async fn wait_inserts_a_gap_between_tasks() {
    let log = journal();
    let mut seq = sequence();
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("shown"));
    }
    seq.wait(Duration::from_millis(500));
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("hidden"));
    }

    let started = tokio::time::Instant::now();
    let player = Player::new(NoOpAssetLoader, ManualFrameSource::new(), config());
    let report = player.run(seq).await;

    assert!(report.completed);
    assert_eq!(entries(&log), vec!["shown", "hidden"]);
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[tokio::test]
async fn keyframes_sweep_offsets_across_ticks() {
    let surface = FakeSurface::new();
    let mut seq = sequence();
    seq.keyframes(
        surface_handle(surface.clone()),
        vec![(0.0, 0.0), (-120.0, 0.0), (-240.0, 0.0)],
        Some("sprites.png".to_string()),
    );

    let report = drive(NoOpAssetLoader, seq).await;

    assert!(report.completed);
    let offsets: Vec<SurfaceCall> = surface
        .calls()
        .into_iter()
        .filter(|c| matches!(c, SurfaceCall::Offset(..)))
        .collect();
    assert_eq!(
        offsets,
        vec![
            SurfaceCall::Offset(0.0, 0.0),
            SurfaceCall::Offset(-120.0, 0.0),
            SurfaceCall::Offset(-240.0, 0.0),
        ]
    );
    assert!(surface
        .calls()
        .contains(&SurfaceCall::Backdrop("sprites.png".into())));
}

#[tokio::test]
async fn frame_images_step_through_sources() {
    let surface = FakeSurface::new();
    let mut seq = sequence();
    seq.frame_images(
        surface_handle(surface.clone()),
        vec!["walk-1.png".into(), "walk-2.png".into()],
    );

    let report = drive(NoOpAssetLoader, seq).await;

    assert!(report.completed);
    assert_eq!(
        surface.calls(),
        vec![
            SurfaceCall::Image("walk-1.png".into()),
            SurfaceCall::Image("walk-2.png".into()),
        ]
    );
}

#[tokio::test]
async fn repeat_replays_the_previous_task() {
    let log = journal();
    let mut seq = sequence();
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("looped"));
    }
    seq.repeat(2);
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("end"));
    }

    let player = Player::new(NoOpAssetLoader, ManualFrameSource::new(), config());
    let report = player.run(seq).await;

    assert!(report.completed);
    assert_eq!(entries(&log), vec!["looped", "looped", "looped", "end"]);
}

#[tokio::test]
async fn full_show_mixes_animation_and_callbacks() {
    let surface = FakeSurface::new();
    let log = journal();
    let mut seq = sequence();
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("curtain-up"));
    }
    seq.keyframes(
        surface_handle(surface.clone()),
        vec![(10.0, 0.0), (20.0, 0.0)],
        None,
    );
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("curtain-down"));
    }

    let report = drive(NoOpAssetLoader, seq).await;

    assert!(report.completed);
    assert_eq!(entries(&log), vec!["curtain-up", "curtain-down"]);
    assert_eq!(
        surface.calls(),
        vec![
            SurfaceCall::Offset(10.0, 0.0),
            SurfaceCall::Offset(20.0, 0.0),
        ]
    );
}
