//! Visual attachment for marker layer entities.
//!
//! The tracking engine owns the layer entities; this module decorates them
//! with 2D meshes when they appear. Shared mesh/material handles live in
//! [`MarkerAssets`] so marker churn never allocates new GPU resources.

use bevy::prelude::*;

use tracking::layers::{AssetMarker, CheckpointMarker, ClusterBadge, DraftHandle, StaticMarker};

/// Marker fill for an available asset (emerald).
const AVAILABLE_COLOR: Color = Color::srgb(0.063, 0.725, 0.506);
/// Marker fill for a busy asset (amber).
const BUSY_COLOR: Color = Color::srgb(0.961, 0.620, 0.043);
/// Cluster badge fill (blue).
const CLUSTER_COLOR: Color = Color::srgb(0.231, 0.510, 0.965);
/// Checkpoint pin fill (slate).
const CHECKPOINT_COLOR: Color = Color::srgb(0.580, 0.639, 0.722);
/// Warning ring for checkpoints with inbound convoys (red).
const WARNING_COLOR: Color = Color::srgb(0.937, 0.267, 0.267);
/// Draft endpoint handle fill.
const HANDLE_COLOR: Color = Color::srgb(0.851, 0.275, 0.937);

// Z layering: route gizmos draw at 0, markers stack above.
const Z_CHECKPOINT: f32 = 4.0;
const Z_CLUSTER: f32 = 5.0;
const Z_STATIC: f32 = 6.0;
const Z_ASSET: f32 = 10.0;
const Z_HANDLE: f32 = 20.0;

/// Shared mesh and material handles for every marker kind.
#[derive(Resource)]
pub struct MarkerAssets {
    pub arrow: Handle<Mesh>,
    pub dot: Handle<Mesh>,
    pub badge: Handle<Mesh>,
    pub ring: Handle<Mesh>,
    pub handle_box: Handle<Mesh>,
    pub available: Handle<ColorMaterial>,
    pub busy: Handle<ColorMaterial>,
    pub cluster: Handle<ColorMaterial>,
    pub checkpoint: Handle<ColorMaterial>,
    pub warning: Handle<ColorMaterial>,
    pub handle: Handle<ColorMaterial>,
}

pub fn setup_marker_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(MarkerAssets {
        // North-pointing arrow, rotated per-asset by bearing.
        arrow: meshes.add(Triangle2d::new(
            Vec2::new(0.0, 10.0),
            Vec2::new(-7.0, -6.0),
            Vec2::new(7.0, -6.0),
        )),
        dot: meshes.add(Circle::new(6.0)),
        badge: meshes.add(Circle::new(16.0)),
        ring: meshes.add(Circle::new(9.0)),
        handle_box: meshes.add(Rectangle::new(12.0, 12.0)),
        available: materials.add(ColorMaterial::from_color(AVAILABLE_COLOR)),
        busy: materials.add(ColorMaterial::from_color(BUSY_COLOR)),
        cluster: materials.add(ColorMaterial::from_color(CLUSTER_COLOR)),
        checkpoint: materials.add(ColorMaterial::from_color(CHECKPOINT_COLOR)),
        warning: materials.add(ColorMaterial::from_color(WARNING_COLOR)),
        handle: materials.add(ColorMaterial::from_color(HANDLE_COLOR)),
    });
}

fn availability_material(assets: &MarkerAssets, is_available: bool) -> Handle<ColorMaterial> {
    if is_available {
        assets.available.clone()
    } else {
        assets.busy.clone()
    }
}

/// Decorate freshly spawned moving-asset markers: arrow mesh rotated to the
/// asset's bearing, colored by availability.
pub fn attach_asset_visuals(
    mut commands: Commands,
    assets: Res<MarkerAssets>,
    markers: Query<(Entity, &AssetMarker, &Transform), Added<AssetMarker>>,
) {
    for (entity, marker, transform) in &markers {
        let mut transform = *transform;
        transform.translation.z = Z_ASSET;
        transform.rotation = Quat::from_rotation_z(-(marker.bearing.to_radians()) as f32);
        commands.entity(entity).insert((
            Mesh2d(assets.arrow.clone()),
            MeshMaterial2d(availability_material(&assets, marker.is_available)),
            transform,
        ));
    }
}

pub fn attach_static_visuals(
    mut commands: Commands,
    assets: Res<MarkerAssets>,
    markers: Query<(Entity, &StaticMarker, &Transform), Added<StaticMarker>>,
) {
    for (entity, marker, transform) in &markers {
        let mut transform = *transform;
        transform.translation.z = Z_STATIC;
        commands.entity(entity).insert((
            Mesh2d(assets.dot.clone()),
            MeshMaterial2d(availability_material(&assets, marker.is_available)),
            transform,
        ));
    }
}

/// Cluster badges get the count as a text child.
pub fn attach_cluster_visuals(
    mut commands: Commands,
    assets: Res<MarkerAssets>,
    badges: Query<(Entity, &ClusterBadge, &Transform), Added<ClusterBadge>>,
) {
    for (entity, badge, transform) in &badges {
        let mut transform = *transform;
        transform.translation.z = Z_CLUSTER;
        commands
            .entity(entity)
            .insert((
                Mesh2d(assets.badge.clone()),
                MeshMaterial2d(assets.cluster.clone()),
                transform,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(badge.count.to_string()),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            });
    }
}

/// Checkpoint pins; a red ring underneath flags inbound convoy traffic.
pub fn attach_checkpoint_visuals(
    mut commands: Commands,
    assets: Res<MarkerAssets>,
    markers: Query<(Entity, &CheckpointMarker, &Transform), Added<CheckpointMarker>>,
) {
    for (entity, marker, transform) in &markers {
        let mut transform = *transform;
        transform.translation.z = Z_CHECKPOINT;
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert((
            Mesh2d(assets.dot.clone()),
            MeshMaterial2d(assets.checkpoint.clone()),
            transform,
        ));
        if marker.has_warning {
            entity_commands.with_children(|parent| {
                parent.spawn((
                    Mesh2d(assets.ring.clone()),
                    MeshMaterial2d(assets.warning.clone()),
                    Transform::from_xyz(0.0, 0.0, -0.1),
                ));
            });
        }
    }
}

pub fn attach_handle_visuals(
    mut commands: Commands,
    assets: Res<MarkerAssets>,
    handles: Query<(Entity, &Transform), (Added<DraftHandle>, Without<Mesh2d>)>,
) {
    for (entity, transform) in &handles {
        let mut transform = *transform;
        transform.translation.z = Z_HANDLE;
        commands.entity(entity).insert((
            Mesh2d(assets.handle_box.clone()),
            MeshMaterial2d(assets.handle.clone()),
            transform,
        ));
    }
}
