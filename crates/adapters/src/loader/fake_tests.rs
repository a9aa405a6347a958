// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn unplanned_sources_load_successfully() {
    let loader = FakeAssetLoader::new();
    assert!(loader.load("a.png").await.is_ok());
    assert_eq!(loader.calls(), vec![LoadCall { src: "a.png".into() }]);
}

#[tokio::test]
async fn planned_failures_fail() {
    let loader = FakeAssetLoader::new();
    loader.fail("broken.png");

    assert!(loader.load("broken.png").await.is_err());
    assert!(loader.load("fine.png").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn delayed_sources_settle_after_their_delay() {
    let loader = FakeAssetLoader::new();
    loader.delay("slow.png", Duration::from_millis(200));

    let started = tokio::time::Instant::now();
    loader.load("slow.png").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(200));
}
