//! 2D rendering backend for the live map engine.
//!
//! Attaches meshes, text, and gizmo polylines to the layer entities the
//! `tracking` crate maintains, and feeds cursor interaction (picks, pans,
//! zooms, handle drags) back into it. The reconciliation logic itself never
//! depends on anything in this crate.

use bevy::prelude::*;

pub mod camera;
pub mod input;
pub mod marker_render;
pub mod route_render;

use camera::MapPan;
use input::HandleDrag;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapPan>()
            .init_resource::<HandleDrag>()
            .add_systems(
                Startup,
                (camera::setup_camera, marker_render::setup_marker_assets),
            )
            .add_systems(
                Update,
                (
                    input::drag_draft_handles,
                    camera::map_pan_drag.after(input::drag_draft_handles),
                    camera::map_zoom_wheel,
                    camera::map_zoom_keyboard,
                    input::pick_on_click
                        .after(camera::map_pan_drag)
                        .after(input::drag_draft_handles),
                ),
            )
            .add_systems(
                Update,
                (
                    marker_render::attach_asset_visuals,
                    marker_render::attach_static_visuals,
                    marker_render::attach_cluster_visuals,
                    marker_render::attach_checkpoint_visuals,
                    marker_render::attach_handle_visuals,
                    camera::sync_layer_transforms,
                    route_render::draw_route_polylines,
                )
                    .chain(),
            );
    }
}
