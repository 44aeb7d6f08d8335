//! The map viewport: one camera/center/zoom per view.
//!
//! The rendering backend mutates this resource from user input; the core
//! reads it for screen-space clustering and the checkpoint visibility policy.
//! Zoom is continuous; systems that only care about discrete zoom levels use
//! [`MapViewport::zoom_bucket`].

use bevy::prelude::*;

use crate::config::{MAX_ZOOM, MIN_ZOOM};
use crate::geo::LatLng;

#[derive(Resource, Debug, Clone, Copy)]
pub struct MapViewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl MapViewport {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Integer zoom level, the granularity at which screen-space cluster
    /// geometry meaningfully changes.
    pub fn zoom_bucket(&self) -> i32 {
        self.zoom.floor() as i32
    }
}
