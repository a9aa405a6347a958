//! Preload specs
//!
//! Verify asset batches gate the show, deliver exactly once, and never
//! block progression on failure.

use crate::prelude::*;

#[tokio::test]
async fn show_waits_for_assets_before_starting() {
    let loader = FakeAssetLoader::new();
    let log = journal();
    let mut seq = sequence();
    seq.preload(["img/stage.png", "img/hero.png"]);
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("shown"));
    }

    let player = Player::new(loader.clone(), ManualFrameSource::new(), config());
    let report = player.run(seq).await;

    assert!(report.completed);
    assert_eq!(entries(&log), vec!["shown"]);
    assert_eq!(loader.calls().len(), 2);
    let outcome = report.preload.unwrap();
    assert!(outcome.success);
    assert!(!outcome.timed_out);
}

#[tokio::test]
async fn missing_asset_does_not_block_the_show() {
    let loader = FakeAssetLoader::new();
    loader.fail("img/lost.png");
    let log = journal();
    let mut seq = sequence();
    seq.preload(["img/lost.png", "img/found.png"]);
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("shown"));
    }

    let player = Player::new(loader, ManualFrameSource::new(), config());
    let report = player.run(seq).await;

    assert!(report.completed);
    assert_eq!(entries(&log), vec!["shown"]);
    assert!(!report.preload.unwrap().success);
}

#[tokio::test(start_paused = true)]
async fn slow_asset_gives_up_at_the_deadline() {
    let loader = FakeAssetLoader::new();
    loader.delay("img/huge.png", Duration::from_secs(30));
    let log = journal();
    let mut seq = sequence();
    seq.preload_with_timeout(["img/huge.png"], Duration::from_secs(2));
    {
        let log = Arc::clone(&log);
        seq.then(move |_| log.lock().unwrap().push("shown"));
    }

    let started = tokio::time::Instant::now();
    let player = Player::new(loader, ManualFrameSource::new(), config());
    let report = player.run(seq).await;

    assert!(report.completed);
    assert_eq!(entries(&log), vec!["shown"]);
    let outcome = report.preload.unwrap();
    assert!(!outcome.success);
    assert!(outcome.timed_out);
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[tokio::test]
async fn empty_batch_is_instant_success() {
    let mut seq = sequence();
    seq.preload(Vec::<&str>::new());

    let player = Player::new(NoOpAssetLoader, ManualFrameSource::new(), config());
    let report = player.run(seq).await;

    assert!(report.completed);
    let outcome = report.preload.unwrap();
    assert!(outcome.success);
    assert!(!outcome.timed_out);
}

#[tokio::test]
async fn preload_feeds_a_following_animation() {
    let loader = FakeAssetLoader::new();
    let surface = FakeSurface::new();
    let mut seq = sequence();
    seq.preload(["img/walk-1.png", "img/walk-2.png"]);
    seq.frame_images(
        surface_handle(surface.clone()),
        vec!["img/walk-1.png".into(), "img/walk-2.png".into()],
    );

    let report = drive(loader.clone(), seq).await;

    assert!(report.completed);
    assert_eq!(loader.calls().len(), 2);
    assert_eq!(
        surface.calls(),
        vec![
            SurfaceCall::Image("img/walk-1.png".into()),
            SurfaceCall::Image("img/walk-2.png".into()),
        ]
    );
}
