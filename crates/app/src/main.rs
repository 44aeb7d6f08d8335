use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use tracking::feed::FeedHandle;
use tracking::view_config::ViewConfig;

mod demo_feed;

use demo_feed::SimulatedFeed;

fn main() {
    // The view is scoped to one convoy, passed in explicitly rather than
    // read from ambient state.
    let convoy_id = std::env::var("CONVOY_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);
    let seed = std::env::var("FEED_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1947);

    let mut config = ViewConfig::for_convoy(convoy_id);
    config.initial_route_id = Some(9);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Convoy Command".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
            unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
        })
        .insert_resource(config)
        .insert_resource(FeedHandle::new(SimulatedFeed::new(seed)))
        .add_plugins((
            tracking::TrackingPlugin,
            rendering::RenderingPlugin,
            ui::UiPlugin,
        ))
        .run();
}
