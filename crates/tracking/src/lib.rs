//! Live map reconciliation engine.
//!
//! Headless core of the convoy command view: polls collaborator endpoints
//! for entity snapshots, decides which visual layers to rebuild, partitions
//! assets into clustered/static vs individually-rendered/moving groups,
//! applies the zoom-dependent checkpoint visibility policy, tracks the
//! single-route selection, and manages draft route endpoint editing. A
//! rendering backend (or a test) attaches to the layer entities this crate
//! maintains; nothing here requires a window or a GPU.
//!
//! The hosting view must insert a [`feed::FeedHandle`] (and usually a
//! [`view_config::ViewConfig`]) before adding [`TrackingPlugin`].

use bevy::prelude::*;
use bevy::time::common_conditions::on_timer;
use std::time::Duration;

pub mod app_state;
pub mod config;
pub mod differ;
pub mod draft;
pub mod entities;
pub mod feed;
pub mod geo;
pub mod layers;
pub mod partition;
pub mod poller;
pub mod selection;
pub mod snapshot;
pub mod view_config;
pub mod viewport;
pub mod visibility;

#[cfg(test)]
pub mod test_harness;

use app_state::ViewState;
use draft::{DraftEndpoints, EndpointMoved, HandleDragEnded};
use layers::ClusterLayerState;
use poller::{
    poll_timer, CheckpointPollTimer, ConvoyPollTimer, FetchGenerations, ViewHalted,
    StationAssetsPollTimer, ViewTeardown,
};
use selection::{MapClicked, MarkerClicked, SelectedRoute};
use snapshot::LiveSnapshot;
use view_config::ViewConfig;
use viewport::MapViewport;

/// Cadence of the defensive orphan-layer sweep.
const ORPHAN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewConfig>()
            .init_resource::<ViewState>()
            .init_resource::<LiveSnapshot>()
            .init_resource::<SelectedRoute>()
            .init_resource::<DraftEndpoints>()
            .init_resource::<FetchGenerations>()
            .init_resource::<ViewHalted>()
            .init_resource::<ClusterLayerState>()
            .add_event::<MarkerClicked>()
            .add_event::<MapClicked>()
            .add_event::<HandleDragEnded>()
            .add_event::<EndpointMoved>()
            .add_event::<ViewTeardown>()
            .add_systems(Startup, (init_view, selection::init_selection).chain())
            .add_systems(
                Update,
                (
                    layers::handle_view_teardown,
                    poller::dispatch_convoy_poll,
                    poller::dispatch_checkpoint_poll,
                    poller::dispatch_station_assets_poll,
                    poller::apply_poll_results,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    selection::handle_marker_clicks,
                    selection::handle_empty_clicks,
                    selection::clear_missing_selection,
                    draft::settle_handle_drags,
                )
                    .chain()
                    .after(poller::apply_poll_results),
            )
            .add_systems(
                Update,
                (
                    layers::sync_moving_markers,
                    layers::sync_cluster_layer,
                    layers::sync_checkpoint_markers,
                    layers::sync_route_polyline,
                    layers::sync_draft_handles,
                    visibility::apply_visibility_policy,
                )
                    .chain()
                    .run_if(poller::view_running)
                    .after(draft::settle_handle_drags),
            )
            .add_systems(
                Update,
                layers::cleanup_orphan_layers
                    .run_if(on_timer(ORPHAN_SWEEP_INTERVAL))
                    .after(layers::sync_draft_handles),
            );
    }
}

/// One-time view setup: the map viewport and the poll timers, all derived
/// from the construction-time [`ViewConfig`]. The map surface is initialized
/// exactly once per view lifetime; later reconciliation passes never touch
/// it.
fn init_view(mut commands: Commands, config: Res<ViewConfig>) {
    commands.insert_resource(MapViewport::new(config.center, config.zoom));
    commands.insert_resource(ConvoyPollTimer(poll_timer(config.convoy_poll)));
    commands.insert_resource(CheckpointPollTimer(poll_timer(config.checkpoint_poll)));
    commands.insert_resource(StationAssetsPollTimer(poll_timer(config.station_poll)));
    info!(
        "live map view initialized for convoy {} (zoom {:.1})",
        config.convoy_id, config.zoom
    );
}
