//! Zoom-dependent checkpoint visibility, and the no-flicker guarantee that
//! markers survive zoom sweeps as the same entities.

use crate::test_harness::fixtures::checkpoint;
use crate::test_harness::TestView;
use crate::view_config::ViewConfig;

fn view_at_zoom(zoom: f64) -> TestView {
    let config = ViewConfig {
        zoom,
        ..TestView::test_config()
    };
    TestView::with_config(config)
}

#[test]
fn airbases_appear_at_wider_zoom_than_generic_checkpoints() {
    let mut view = view_at_zoom(7.0);
    view.feed.push_checkpoints(vec![
        checkpoint(1, "AIRBASE", 32.69, 74.84),
        checkpoint(2, "TCP", 32.76, 74.93),
    ]);
    assert!(view.tick_until(|v| v.checkpoint_markers().len() == 2));

    // Zoom 7: airbase (threshold 6) on, generic checkpoint (threshold 10) off.
    assert!(view.checkpoint_visible(1));
    assert!(!view.checkpoint_visible(2));

    // Zoom 11: both on.
    view.set_zoom(11.0);
    view.tick(1);
    assert!(view.checkpoint_visible(1));
    assert!(view.checkpoint_visible(2));
}

#[test]
fn zoom_sweep_toggles_without_recreating_markers() {
    let mut view = view_at_zoom(11.0);
    view.feed
        .push_checkpoints(vec![checkpoint(2, "TCP", 32.76, 74.93)]);
    assert!(view.tick_until(|v| v.checkpoint_visible(2)));
    let before = view.checkpoint_markers();

    view.set_zoom(5.0);
    view.tick(1);
    assert!(!view.checkpoint_visible(2));

    view.set_zoom(12.0);
    view.tick(1);
    assert!(view.checkpoint_visible(2));

    // Same entity across the whole sweep: hidden and shown, never rebuilt.
    let after = view.checkpoint_markers();
    assert_eq!(before[0].0, after[0].0);
}

#[test]
fn below_every_threshold_nothing_is_visible() {
    let mut view = view_at_zoom(4.0);
    view.feed.push_checkpoints(vec![
        checkpoint(1, "AIRBASE", 32.69, 74.84),
        checkpoint(2, "Toll Gate", 32.76, 74.93),
    ]);
    assert!(view.tick_until(|v| v.checkpoint_markers().len() == 2));
    assert!(!view.checkpoint_visible(1));
    assert!(!view.checkpoint_visible(2));
}

#[test]
fn removed_checkpoints_despawn_survivors_stay() {
    let mut view = view_at_zoom(11.0);
    view.feed.push_checkpoints(vec![
        checkpoint(1, "TCP", 32.69, 74.84),
        checkpoint(2, "TCP", 32.76, 74.93),
    ]);
    assert!(view.tick_until(|v| v.checkpoint_markers().len() == 2));
    let survivor = view.checkpoint_markers()[0].0;

    view.feed
        .push_checkpoints(vec![checkpoint(1, "TCP", 32.69, 74.84)]);
    assert!(view.tick_until(|v| v.checkpoint_markers().len() == 1));
    assert_eq!(view.checkpoint_markers()[0].0, survivor);
}
