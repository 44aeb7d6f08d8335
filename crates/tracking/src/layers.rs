//! Layer reconciliation: the render surface contract.
//!
//! Every visual layer is an entity owned by the engine, carrying a
//! [`LayerEntity`] marker plus one kind component. A rendering backend
//! attaches whatever visuals it wants to these entities; the engine only
//! guarantees that after each reconciliation pass the set of layer entities
//! is exactly the set implied by (snapshot, selection, visibility policy,
//! draft endpoints) — layers no longer implied are removed before new ones
//! are added, and nothing orphaned survives across cycles.
//!
//! Rebuild asymmetry: moving-asset markers and the selected route polyline
//! are cheap and rebuilt on every snapshot change; the clustered static
//! layer can be large and rebuilds only when its fingerprint (or the integer
//! zoom, which changes the screen-space radius) changes.

use bevy::prelude::*;

use crate::differ::fingerprint;
use crate::draft::{DraftEndpoints, EndpointKind};
use crate::entities::RiskLevel;
use crate::geo::LatLng;
use crate::partition::cluster_static_assets;
use crate::poller::{InFlightFetch, ViewHalted, ViewTeardown};
use crate::selection::SelectedRoute;
use crate::snapshot::LiveSnapshot;
use crate::viewport::MapViewport;
use crate::visibility::CheckpointCategory;

/// Common marker on every layer entity the engine owns.
#[derive(Component)]
pub struct LayerEntity;

/// Geographic anchor of a layer entity. The rendering backend projects this
/// through the viewport into a `Transform` each frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct GeoPosition(pub LatLng);

/// Individually rendered marker for a convoy-attached asset.
#[derive(Component, Debug, Clone)]
pub struct AssetMarker {
    pub asset_id: i64,
    pub bearing: f64,
    pub is_available: bool,
}

/// Individual marker for an unclustered static asset.
#[derive(Component, Debug, Clone)]
pub struct StaticMarker {
    pub asset_id: i64,
    pub is_available: bool,
}

/// Collapsed badge over two or more static assets.
#[derive(Component, Debug, Clone)]
pub struct ClusterBadge {
    pub count: usize,
}

/// Checkpoint pin; visibility is toggled by the zoom policy, the entity
/// itself survives zoom sweeps.
#[derive(Component, Debug, Clone)]
pub struct CheckpointMarker {
    pub checkpoint_id: i64,
    pub category: CheckpointCategory,
    pub has_warning: bool,
}

/// The single highlighted route polyline.
#[derive(Component, Debug, Clone)]
pub struct RoutePolyline {
    pub route_id: i64,
    pub waypoints: Vec<LatLng>,
    pub risk: RiskLevel,
}

/// Draggable draft endpoint handle.
#[derive(Component, Debug, Clone, Copy)]
pub struct DraftHandle {
    pub kind: EndpointKind,
}

/// Bookkeeping for the gated cluster rebuild. `rebuilds` exists for tests
/// and diagnostics; it counts actual layer reconstructions, not passes.
#[derive(Resource, Debug, Default)]
pub struct ClusterLayerState {
    key: Option<(u32, i32)>,
    pub rebuilds: u64,
}

/// Rebuild the moving-asset marker layer from a fresh snapshot.
///
/// Moving assets are few and reposition every tick, so this layer is rebuilt
/// wholesale on every snapshot change — remove first, then add.
pub fn sync_moving_markers(
    mut commands: Commands,
    snapshot: Res<LiveSnapshot>,
    existing: Query<Entity, With<AssetMarker>>,
) {
    if !snapshot.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    for asset in snapshot.moving_assets() {
        let Some(pos) = asset.position() else {
            continue;
        };
        commands.spawn((
            LayerEntity,
            AssetMarker {
                asset_id: asset.id,
                bearing: asset.bearing,
                is_available: asset.is_available,
            },
            GeoPosition(pos),
            Transform::default(),
            Visibility::default(),
        ));
    }
}

/// Rebuild the clustered static layer only when its rebuild key changes.
pub fn sync_cluster_layer(
    mut commands: Commands,
    snapshot: Res<LiveSnapshot>,
    viewport: Res<MapViewport>,
    mut state: ResMut<ClusterLayerState>,
    stale: Query<Entity, Or<(With<StaticMarker>, With<ClusterBadge>)>>,
) {
    let static_assets: Vec<_> = snapshot.static_assets().collect();
    let key = (fingerprint(&static_assets), viewport.zoom_bucket());
    if state.key == Some(key) {
        return;
    }
    state.key = Some(key);
    state.rebuilds += 1;

    for entity in &stale {
        commands.entity(entity).despawn_recursive();
    }

    for cluster in cluster_static_assets(&static_assets, viewport.zoom) {
        if cluster.is_singleton() {
            let asset_id = cluster.members[0];
            let Some(asset) = snapshot.asset(asset_id) else {
                continue;
            };
            commands.spawn((
                LayerEntity,
                StaticMarker {
                    asset_id,
                    is_available: asset.is_available,
                },
                GeoPosition(cluster.center),
                Transform::default(),
                Visibility::default(),
            ));
        } else {
            commands.spawn((
                LayerEntity,
                ClusterBadge {
                    count: cluster.count(),
                },
                GeoPosition(cluster.center),
                Transform::default(),
                Visibility::default(),
            ));
        }
    }
}

/// Spawn checkpoint markers once per checkpoint id and despawn the vanished.
///
/// Survivors are left untouched: the zoom policy flips their `Visibility`
/// in place, and recreating them would lose popup state and flicker.
pub fn sync_checkpoint_markers(
    mut commands: Commands,
    snapshot: Res<LiveSnapshot>,
    existing: Query<(Entity, &CheckpointMarker)>,
) {
    if !snapshot.is_changed() {
        return;
    }

    for (entity, marker) in &existing {
        if !snapshot
            .checkpoints
            .iter()
            .any(|cp| cp.id == marker.checkpoint_id)
        {
            commands.entity(entity).despawn_recursive();
        }
    }

    for checkpoint in &snapshot.checkpoints {
        if existing
            .iter()
            .any(|(_, m)| m.checkpoint_id == checkpoint.id)
        {
            continue;
        }
        commands.spawn((
            LayerEntity,
            CheckpointMarker {
                checkpoint_id: checkpoint.id,
                category: CheckpointCategory::classify(&checkpoint.checkpoint_type),
                has_warning: checkpoint.has_upcoming_traffic(),
            },
            GeoPosition(checkpoint.position()),
            Transform::default(),
            // Hidden until the first visibility-policy evaluation.
            Visibility::Hidden,
        ));
    }
}

/// Keep exactly 0 or 1 route polylines: the selected, renderable one.
pub fn sync_route_polyline(
    mut commands: Commands,
    snapshot: Res<LiveSnapshot>,
    selected: Res<SelectedRoute>,
    existing: Query<Entity, With<RoutePolyline>>,
) {
    if !snapshot.is_changed() && !selected.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    let Some(route_id) = selected.0 else {
        return;
    };
    let Some(route) = snapshot.route(route_id) else {
        return;
    };
    if !route.is_renderable() {
        return;
    }

    let waypoints: Vec<LatLng> = route.waypoint_coords().collect();
    let anchor = waypoints[0];
    commands.spawn((
        LayerEntity,
        RoutePolyline {
            route_id: route.id,
            waypoints,
            risk: route.risk_level,
        },
        GeoPosition(anchor),
        Transform::default(),
        Visibility::default(),
    ));
}

/// Mirror the draft endpoint pair as 0–2 handle entities.
pub fn sync_draft_handles(
    mut commands: Commands,
    draft: Res<DraftEndpoints>,
    existing: Query<Entity, With<DraftHandle>>,
) {
    if !draft.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    for kind in [EndpointKind::Start, EndpointKind::End] {
        if let Some(pos) = draft.get(kind) {
            commands.spawn((
                LayerEntity,
                DraftHandle { kind },
                GeoPosition(pos),
                Transform::default(),
                Visibility::default(),
            ));
        }
    }
}

/// Defensive orphan sweep: despawn any layer whose backing entity vanished
/// between the event-driven syncs. Runs on a coarse timer.
pub fn cleanup_orphan_layers(
    mut commands: Commands,
    snapshot: Res<LiveSnapshot>,
    selected: Res<SelectedRoute>,
    asset_markers: Query<(Entity, &AssetMarker)>,
    static_markers: Query<(Entity, &StaticMarker)>,
    checkpoint_markers: Query<(Entity, &CheckpointMarker)>,
    polylines: Query<(Entity, &RoutePolyline)>,
) {
    for (entity, marker) in &asset_markers {
        let alive = snapshot
            .asset(marker.asset_id)
            .is_some_and(|a| a.is_moving() && a.position().is_some());
        if !alive {
            commands.entity(entity).despawn_recursive();
        }
    }
    for (entity, marker) in &static_markers {
        let alive = snapshot
            .asset(marker.asset_id)
            .is_some_and(|a| !a.is_moving() && a.position().is_some());
        if !alive {
            commands.entity(entity).despawn_recursive();
        }
    }
    for (entity, marker) in &checkpoint_markers {
        if !snapshot
            .checkpoints
            .iter()
            .any(|cp| cp.id == marker.checkpoint_id)
        {
            commands.entity(entity).despawn_recursive();
        }
    }
    for (entity, polyline) in &polylines {
        if selected.0 != Some(polyline.route_id) || snapshot.route(polyline.route_id).is_none() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Teardown: stop the pollers, cancel in-flight fetches, release every layer.
///
/// Dropping an in-flight `Task` cancels it, so no fetch callback can fire
/// after this system has run; `ViewHalted` keeps the dispatch and apply
/// systems inert for the rest of the view's life.
pub fn handle_view_teardown(
    mut commands: Commands,
    mut events: EventReader<ViewTeardown>,
    mut paused: ResMut<ViewHalted>,
    in_flight: Query<Entity, With<InFlightFetch>>,
    layers: Query<Entity, With<LayerEntity>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    paused.0 = true;

    for entity in &in_flight {
        commands.entity(entity).despawn();
    }
    for entity in &layers {
        commands.entity(entity).despawn_recursive();
    }
    info!("view teardown: pollers halted, layers released");
}
