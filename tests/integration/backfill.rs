use std::sync::Arc;

use logplay::{BackfillArgs, LogSource, MultiSourcePlayer};

use super::common;

fn drive_player() -> (Arc<logplay::MemoryLogSource>, Arc<logplay::MemoryLogSource>, MultiSourcePlayer) {
    let first = Arc::new(common::drive_first_leg());
    let second = Arc::new(common::drive_second_leg());
    let player = MultiSourcePlayer::new(vec![
        first.clone() as Arc<dyn LogSource>,
        second.clone() as Arc<dyn LogSource>,
    ])
    .expect("two sources");
    (first, second, player)
}

#[tokio::test]
async fn seek_time_routes_to_the_next_starting_leg() {
    common::init_tracing();
    let (first, second, mut player) = drive_player();
    player.initialize().await.unwrap();

    // Legs span [0, 10] and [11, 20]. The second leg's span starts after
    // t=5, so it is the routed source; the first leg is never consulted,
    // and the /gps state recorded at t=5 in the first leg is not found.
    let args = BackfillArgs::new(["/gps"], common::session_time(5));
    let results = player.backfill(args.clone()).await.unwrap();

    assert!(results.is_empty());
    assert!(first.backfill_calls().is_empty());
    assert_eq!(second.backfill_calls(), vec![args]);
}

#[tokio::test]
async fn seek_time_past_every_leg_falls_back_to_the_first() {
    common::init_tracing();
    let (first, second, mut player) = drive_player();
    player.initialize().await.unwrap();

    // No leg starts after t=99, so routing falls back to source 0.
    let args = BackfillArgs::new(["/imu", "/gps"], common::session_time(99));
    let results = player.backfill(args).await.unwrap();

    assert_eq!(results.len(), 2);
    for event in &results {
        // State comes from the first leg only, even though the second
        // leg holds the truly latest messages.
        assert!(event.log_time <= common::session_time(10));
    }
    assert_eq!(first.backfill_calls().len(), 1);
    assert!(second.backfill_calls().is_empty());
}

#[tokio::test]
async fn routed_leg_reports_latest_state_at_or_before_the_seek() {
    common::init_tracing();
    let (_, second, mut player) = drive_player();
    player.initialize().await.unwrap();

    // The second leg starts at t=11, which is after t=10, so it is the
    // routed source for a seek to t=10.
    let args = BackfillArgs::new(["/imu", "/diagnostics"], common::session_time(10));
    let results = player.backfill(args).await.unwrap();

    // The second leg has no message at or before t=10 for either topic.
    assert!(results.is_empty());
    assert_eq!(second.backfill_calls().len(), 1);

    // Seeking to t=14 lands on source 0 (no start after 14), which only
    // knows /imu up to t=10 and has no /diagnostics at all.
    let results = player
        .backfill(BackfillArgs::new(["/imu", "/diagnostics"], common::session_time(14)))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].topic, "/imu");
    assert_eq!(results[0].log_time, common::session_time(10));
}
