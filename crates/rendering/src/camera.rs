//! Flat map camera.
//!
//! The 2D camera itself never moves: panning and zooming mutate the
//! [`MapViewport`] resource, and every geo-anchored layer entity is
//! reprojected relative to the viewport center each frame. World units equal
//! Web-Mercator pixels at the current zoom, so screen-space radii (cluster,
//! pick) need no extra conversion.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use tracking::geo::{project, unproject, LatLng, PixelPoint};
use tracking::layers::GeoPosition;
use tracking::viewport::MapViewport;

/// Wheel zoom increment per scroll line.
const ZOOM_STEP: f64 = 0.25;

/// Pixels of cursor travel before a press becomes a pan instead of a click.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Tracks an in-progress right/left-button map pan.
#[derive(Resource, Default)]
pub struct MapPan {
    pub pressed: bool,
    pub start_pos: Vec2,
    pub last_pos: Vec2,
    /// True once the cursor traveled beyond [`DRAG_THRESHOLD`]; suppresses
    /// the click that would otherwise fire on release.
    pub is_dragging: bool,
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Convert a world-space point (camera plane) to geographic coordinates.
pub fn world_to_latlng(world: Vec2, viewport: &MapViewport) -> LatLng {
    let center = project(viewport.center, viewport.zoom);
    unproject(
        PixelPoint {
            x: center.x + world.x as f64,
            y: center.y - world.y as f64,
        },
        viewport.zoom,
    )
}

/// Convert geographic coordinates to world space around the viewport center.
pub fn latlng_to_world(pos: LatLng, viewport: &MapViewport) -> Vec2 {
    let center = project(viewport.center, viewport.zoom);
    let px = project(pos, viewport.zoom);
    Vec2::new((px.x - center.x) as f32, (center.y - px.y) as f32)
}

/// Cursor position in world space (origin at window center, y up).
pub fn cursor_world_pos(window: &Window) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    Some(Vec2::new(
        cursor.x - window.width() / 2.0,
        window.height() / 2.0 - cursor.y,
    ))
}

pub fn map_zoom_wheel(
    mut wheel: EventReader<MouseWheel>,
    mut viewport: ResMut<MapViewport>,
) {
    for event in wheel.read() {
        let lines = match event.unit {
            MouseScrollUnit::Line => event.y as f64,
            MouseScrollUnit::Pixel => event.y as f64 / 32.0,
        };
        if lines != 0.0 {
            let zoom = viewport.zoom + lines * ZOOM_STEP;
            viewport.set_zoom(zoom);
        }
    }
}

pub fn map_zoom_keyboard(keys: Res<ButtonInput<KeyCode>>, mut viewport: ResMut<MapViewport>) {
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        let zoom = viewport.zoom + 1.0;
        viewport.set_zoom(zoom);
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        let zoom = viewport.zoom - 1.0;
        viewport.set_zoom(zoom);
    }
}

/// Left-button drag pans the map by shifting the viewport center in the
/// Mercator pixel plane. Inert while a draft handle is being dragged.
pub fn map_pan_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    handle_drag: Res<crate::input::HandleDrag>,
    mut pan: ResMut<MapPan>,
    mut viewport: ResMut<MapViewport>,
) {
    if handle_drag.active.is_some() {
        pan.pressed = false;
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        pan.pressed = true;
        pan.start_pos = cursor;
        pan.last_pos = cursor;
        pan.is_dragging = false;
        return;
    }

    if !pan.pressed {
        return;
    }

    if buttons.pressed(MouseButton::Left) {
        if !pan.is_dragging && cursor.distance(pan.start_pos) > DRAG_THRESHOLD {
            pan.is_dragging = true;
        }
        if pan.is_dragging {
            let delta = cursor - pan.last_pos;
            let center = project(viewport.center, viewport.zoom);
            viewport.center = unproject(
                PixelPoint {
                    x: center.x - delta.x as f64,
                    y: center.y - delta.y as f64,
                },
                viewport.zoom,
            );
        }
        pan.last_pos = cursor;
    }

    if buttons.just_released(MouseButton::Left) {
        pan.pressed = false;
    }
}

/// Reproject every geo-anchored layer entity into world space. Z is owned by
/// whoever attached the visuals; only x/y move with the viewport.
pub fn sync_layer_transforms(
    viewport: Res<MapViewport>,
    mut layers: Query<(&GeoPosition, &mut Transform)>,
) {
    for (geo, mut transform) in &mut layers {
        let world = latlng_to_world(geo.0, &viewport);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}
