//! Zoom-dependent checkpoint visibility policy.
//!
//! Airbase-like checkpoints appear at a much lower zoom than the generic
//! checkpoint layer. The policy toggles the `Visibility` component on the
//! existing marker entities instead of despawning them, so popup state and
//! entity identity survive a zoom sweep without flicker.

use bevy::prelude::*;

use crate::config::{AIRBASE_MIN_ZOOM, CHECKPOINT_MIN_ZOOM};
use crate::layers::CheckpointMarker;
use crate::viewport::MapViewport;

/// Checkpoint visibility category, classified from the wire-format
/// `checkpoint_type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointCategory {
    /// Airbase / airport / airstrip: strategic, sparse, visible early.
    Airbase,
    /// Everything else: TCPs, toll gates, police posts, rest stops.
    Standard,
}

impl CheckpointCategory {
    pub fn classify(checkpoint_type: &str) -> Self {
        if checkpoint_type.to_ascii_uppercase().contains("AIR") {
            CheckpointCategory::Airbase
        } else {
            CheckpointCategory::Standard
        }
    }

    /// Minimum zoom at which markers of this category are drawn.
    pub fn min_zoom(self) -> f64 {
        match self {
            CheckpointCategory::Airbase => AIRBASE_MIN_ZOOM,
            CheckpointCategory::Standard => CHECKPOINT_MIN_ZOOM,
        }
    }

    pub fn visible_at(self, zoom: f64) -> bool {
        zoom >= self.min_zoom()
    }
}

/// Re-evaluate checkpoint layer membership whenever the viewport moves.
///
/// Runs on viewport change and on marker spawn (markers spawn hidden until
/// the first evaluation).
pub fn apply_visibility_policy(
    viewport: Res<MapViewport>,
    mut markers: Query<(&CheckpointMarker, &mut Visibility)>,
) {
    for (marker, mut visibility) in &mut markers {
        let target = if marker.category.visible_at(viewport.zoom) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != target {
            *visibility = target;
        }
    }
}
