//! Cluster layer gating: fingerprint equality means zero layer churn.

use crate::test_harness::fixtures::asset;
use crate::test_harness::TestView;

#[test]
fn identical_static_set_in_any_order_skips_rebuild() {
    let mut view = TestView::new();
    let a = asset(1, None, 32.70, 74.80);
    let b = asset(2, None, 32.71, 74.81);

    view.feed.push_station_assets(vec![a.clone(), b.clone()]);
    assert!(view.tick_until(|v| v.cluster_badge_counts() == [2]));
    let rebuilds = view.cluster_rebuilds();

    // Same set, reversed order: a fresh snapshot write, but no layer churn.
    view.feed.push_station_assets(vec![b, a]);
    assert!(view.tick_until(|v| v.feed.pending_station_responses() == 0));
    view.tick(10);

    assert_eq!(view.cluster_rebuilds(), rebuilds);
    assert_eq!(view.cluster_badge_counts(), [2]);
}

#[test]
fn position_change_triggers_exactly_one_rebuild() {
    let mut view = TestView::new();
    view.feed
        .push_station_assets(vec![asset(1, None, 32.70, 74.80)]);
    assert!(view.tick_until(|v| v.static_marker_ids() == [1]));
    let rebuilds = view.cluster_rebuilds();

    view.feed
        .push_station_assets(vec![asset(1, None, 32.75, 74.85)]);
    assert!(view.tick_until(|v| v.cluster_rebuilds() == rebuilds + 1));
    view.tick(5);
    assert_eq!(view.cluster_rebuilds(), rebuilds + 1);
}

#[test]
fn zoom_change_redraws_cluster_geometry() {
    let mut view = TestView::new();
    view.feed.push_station_assets(vec![
        asset(1, None, 32.70, 74.80),
        asset(2, None, 32.71, 74.81),
    ]);
    // Collapsed into one badge at the default zoom 8.
    assert!(view.tick_until(|v| v.cluster_badge_counts() == [2]));
    assert!(view.static_marker_ids().is_empty());

    // Close in: the badge dissolves into individual markers.
    view.set_zoom(16.0);
    view.tick(2);
    assert!(view.cluster_badge_counts().is_empty());
    assert_eq!(view.static_marker_ids(), vec![1, 2]);

    // And back out: markers collapse again.
    view.set_zoom(8.0);
    view.tick(2);
    assert_eq!(view.cluster_badge_counts(), [2]);
}

#[test]
fn moving_assets_never_enter_clusters() {
    use crate::test_harness::fixtures::convoy;

    let mut view = TestView::new();
    view.feed.push_convoy(convoy(
        1,
        None,
        vec![
            asset(10, Some(1), 32.70, 74.80),
            asset(11, Some(1), 32.7001, 74.8001),
        ],
    ));
    assert!(view.tick_until(|v| v.moving_marker_count() == 2));

    // Two convoy assets sit within cluster radius of each other, but the
    // cluster layer ignores them entirely.
    assert!(view.cluster_badge_counts().is_empty());
    assert!(view.static_marker_ids().is_empty());
}
