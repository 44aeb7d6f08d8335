//! # TestView — headless integration test harness for the live map engine
//!
//! Wraps `bevy::app::App` + [`TrackingPlugin`] with a scripted feed and
//! zero-length poll intervals, so tests can enqueue snapshots, tick the
//! schedule, and assert on the resulting layer entities without a window or
//! renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::draft::{EndpointKind, HandleDragEnded};
use crate::feed::FeedHandle;
use crate::geo::LatLng;
use crate::poller::ViewTeardown;
use crate::selection::{MapClicked, MarkerClicked};
use crate::view_config::ViewConfig;
use crate::viewport::MapViewport;
use crate::TrackingPlugin;

pub mod fixtures;
mod queries;
mod scripted_feed;

pub use scripted_feed::ScriptedFeed;

/// A headless Bevy App wrapping [`TrackingPlugin`] for integration testing.
pub struct TestView {
    pub app: App,
    pub feed: ScriptedFeed,
}

impl TestView {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A view scoped to convoy 1 with instant poll timers and an empty
    /// scripted feed. Polls fail transiently until something is enqueued.
    pub fn new() -> Self {
        Self::with_config(Self::test_config())
    }

    pub fn with_config(config: ViewConfig) -> Self {
        let feed = ScriptedFeed::new();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.insert_resource(FeedHandle::new(feed.clone()));
        app.add_plugins(TrackingPlugin);
        Self { app, feed }
    }

    /// Instant timers so every tick can dispatch a poll.
    pub fn test_config() -> ViewConfig {
        ViewConfig {
            convoy_poll: std::time::Duration::ZERO,
            checkpoint_poll: std::time::Duration::ZERO,
            station_poll: std::time::Duration::ZERO,
            ..ViewConfig::for_convoy(1)
        }
    }

    // -----------------------------------------------------------------------
    // Schedule driving
    // -----------------------------------------------------------------------

    /// Run N update cycles. A `yield_now()` between cycles lets the
    /// `AsyncComputeTaskPool` threads make progress on in-flight fetches even
    /// when the test drives the schedule in a tight loop.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
            std::thread::yield_now();
        }
    }

    /// Tick until `pred` holds, up to a generous bound. Returns whether the
    /// predicate was ever satisfied.
    pub fn tick_until(&mut self, mut pred: impl FnMut(&mut Self) -> bool) -> bool {
        for _ in 0..100 {
            self.tick(1);
            if pred(self) {
                return true;
            }
        }
        false
    }

    // -----------------------------------------------------------------------
    // Interaction
    // -----------------------------------------------------------------------

    pub fn click_asset(&mut self, asset_id: i64) {
        self.app
            .world_mut()
            .send_event(MarkerClicked { asset_id });
        self.tick(1);
    }

    pub fn click_empty_map(&mut self) {
        self.app.world_mut().send_event(MapClicked);
        self.tick(1);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.app
            .world_mut()
            .resource_mut::<MapViewport>()
            .set_zoom(zoom);
        self.tick(1);
    }

    pub fn end_handle_drag(&mut self, kind: EndpointKind, lat: f64, lng: f64) {
        self.app.world_mut().send_event(HandleDragEnded {
            kind,
            raw: LatLng::new(lat, lng),
        });
        self.tick(1);
    }

    pub fn teardown(&mut self) {
        self.app.world_mut().send_event(ViewTeardown);
        self.tick(1);
    }
}

impl Default for TestView {
    fn default() -> Self {
        Self::new()
    }
}
