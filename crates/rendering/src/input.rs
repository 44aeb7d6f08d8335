//! Cursor interaction: marker picking and draft handle dragging.
//!
//! Clicks resolve against the layer entities the engine owns; the nearest
//! marker within the pick radius wins, otherwise the click lands on empty
//! map space. Both outcomes are forwarded to the core as events — the
//! rendering backend decides nothing about selection itself.

use bevy::prelude::*;

use tracking::config::PICK_RADIUS_PX;
use tracking::draft::{EndpointKind, HandleDragEnded};
use tracking::layers::{AssetMarker, DraftHandle, GeoPosition, StaticMarker};
use tracking::selection::{MapClicked, MarkerClicked};
use tracking::viewport::MapViewport;

use crate::camera::{cursor_world_pos, world_to_latlng, MapPan, DRAG_THRESHOLD};

/// The handle currently being dragged, if any. `just_released` marks the
/// release frame so the click resolver doesn't treat a finished drag as a
/// map click.
#[derive(Resource, Default)]
pub struct HandleDrag {
    pub active: Option<ActiveDrag>,
    pub just_released: bool,
}

pub struct ActiveDrag {
    pub entity: Entity,
    pub kind: EndpointKind,
    pub moved: bool,
}

/// Press on a draft handle begins a drag and suppresses map panning for the
/// gesture; release ends it and reports the raw (unrounded) drop point.
pub fn drag_draft_handles(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    viewport: Res<MapViewport>,
    mut drag: ResMut<HandleDrag>,
    mut handles: Query<(Entity, &DraftHandle, &mut GeoPosition)>,
    mut drag_ended: EventWriter<HandleDragEnded>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(world) = cursor_world_pos(window) else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && drag.active.is_none() {
        for (entity, handle, geo) in &handles {
            let handle_world = crate::camera::latlng_to_world(geo.0, &viewport);
            if handle_world.distance(world) <= PICK_RADIUS_PX as f32 {
                drag.active = Some(ActiveDrag {
                    entity,
                    kind: handle.kind,
                    moved: false,
                });
                break;
            }
        }
        return;
    }

    let Some(active) = &mut drag.active else {
        return;
    };

    if buttons.pressed(MouseButton::Left) {
        if let Ok((_, _, mut geo)) = handles.get_mut(active.entity) {
            let target = world_to_latlng(world, &viewport);
            if geo.0 != target {
                geo.0 = target;
                active.moved = true;
            }
        }
        return;
    }

    if buttons.just_released(MouseButton::Left) {
        if active.moved {
            if let Ok((_, _, geo)) = handles.get(active.entity) {
                drag_ended.send(HandleDragEnded {
                    kind: active.kind,
                    raw: geo.0,
                });
            }
        }
        drag.active = None;
        drag.just_released = true;
    }
}

/// Resolve a completed (non-pan, non-handle) left click against the marker
/// layers.
#[allow(clippy::too_many_arguments)]
pub fn pick_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    viewport: Res<MapViewport>,
    pan: Res<MapPan>,
    mut drag: ResMut<HandleDrag>,
    moving: Query<(&AssetMarker, &GeoPosition)>,
    parked: Query<(&StaticMarker, &GeoPosition)>,
    mut marker_clicked: EventWriter<MarkerClicked>,
    mut map_clicked: EventWriter<MapClicked>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    let drag_just_ended = drag.just_released;
    drag.just_released = false;
    if pan.is_dragging || drag.active.is_some() || drag_just_ended {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if cursor.distance(pan.start_pos) > DRAG_THRESHOLD {
        return;
    }
    let Some(world) = cursor_world_pos(window) else {
        return;
    };

    let mut best: Option<(i64, f32)> = None;
    for (marker, geo) in &moving {
        let d = crate::camera::latlng_to_world(geo.0, &viewport).distance(world);
        if d <= PICK_RADIUS_PX as f32 && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((marker.asset_id, d));
        }
    }
    for (marker, geo) in &parked {
        let d = crate::camera::latlng_to_world(geo.0, &viewport).distance(world);
        if d <= PICK_RADIUS_PX as f32 && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((marker.asset_id, d));
        }
    }

    match best {
        Some((asset_id, _)) => {
            marker_clicked.send(MarkerClicked { asset_id });
        }
        None => {
            map_clicked.send(MapClicked);
        }
    }
}
