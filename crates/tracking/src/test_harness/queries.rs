//! Query and assertion helpers for `TestView`.

use bevy::prelude::*;

use crate::app_state::ViewState;
use crate::draft::EndpointMoved;
use crate::layers::{
    AssetMarker, CheckpointMarker, ClusterBadge, ClusterLayerState, DraftHandle, LayerEntity,
    RoutePolyline, StaticMarker,
};
use crate::selection::SelectedRoute;
use crate::snapshot::LiveSnapshot;

use super::TestView;

impl TestView {
    /// Access the ECS world mutably (Bevy queries need `&mut World`).
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn snapshot(&self) -> &LiveSnapshot {
        self.app.world().resource::<LiveSnapshot>()
    }

    pub fn view_state(&self) -> ViewState {
        *self.app.world().resource::<ViewState>()
    }

    pub fn selected_route(&self) -> Option<i64> {
        self.app.world().resource::<SelectedRoute>().0
    }

    /// Number of actual cluster-layer reconstructions performed so far.
    pub fn cluster_rebuilds(&self) -> u64 {
        self.app.world().resource::<ClusterLayerState>().rebuilds
    }

    /// Ids of individually rendered moving-asset markers.
    pub fn moving_marker_ids(&mut self) -> Vec<i64> {
        let world = self.app.world_mut();
        let mut ids: Vec<i64> = world
            .query::<&AssetMarker>()
            .iter(world)
            .map(|m| m.asset_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn moving_marker_count(&mut self) -> usize {
        self.moving_marker_ids().len()
    }

    pub fn static_marker_ids(&mut self) -> Vec<i64> {
        let world = self.app.world_mut();
        let mut ids: Vec<i64> = world
            .query::<&StaticMarker>()
            .iter(world)
            .map(|m| m.asset_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Member counts of the rendered cluster badges.
    pub fn cluster_badge_counts(&mut self) -> Vec<usize> {
        let world = self.app.world_mut();
        let mut counts: Vec<usize> = world
            .query::<&ClusterBadge>()
            .iter(world)
            .map(|b| b.count)
            .collect();
        counts.sort_unstable();
        counts
    }

    pub fn polyline_route_ids(&mut self) -> Vec<i64> {
        let world = self.app.world_mut();
        world
            .query::<&RoutePolyline>()
            .iter(world)
            .map(|p| p.route_id)
            .collect()
    }

    /// (entity, checkpoint id, currently visible) for every checkpoint marker.
    pub fn checkpoint_markers(&mut self) -> Vec<(Entity, i64, bool)> {
        let world = self.app.world_mut();
        let mut rows: Vec<(Entity, i64, bool)> = world
            .query::<(Entity, &CheckpointMarker, &Visibility)>()
            .iter(world)
            .map(|(e, m, v)| (e, m.checkpoint_id, *v == Visibility::Visible))
            .collect();
        rows.sort_by_key(|(_, id, _)| *id);
        rows
    }

    pub fn checkpoint_visible(&mut self, checkpoint_id: i64) -> bool {
        self.checkpoint_markers()
            .iter()
            .any(|(_, id, visible)| *id == checkpoint_id && *visible)
    }

    pub fn draft_handle_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world
            .query_filtered::<Entity, With<DraftHandle>>()
            .iter(world)
            .count()
    }

    pub fn layer_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world
            .query_filtered::<Entity, With<LayerEntity>>()
            .iter(world)
            .count()
    }

    /// Drain every `EndpointMoved` event emitted since the last call.
    pub fn drain_endpoint_moved(&mut self) -> Vec<EndpointMoved> {
        self.app
            .world_mut()
            .resource_mut::<Events<EndpointMoved>>()
            .drain()
            .collect()
    }
}
