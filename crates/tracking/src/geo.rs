//! Geographic primitives shared by the reconciliation engine.
//!
//! Coordinates are WGS84 latitude/longitude in degrees. Screen-space math
//! uses the Web-Mercator pixel plane at a given zoom level (world size
//! `256 * 2^zoom`, the slippy-map convention), which is what makes the
//! cluster radius and pick radius zoom-adaptive.

use std::f64::consts::PI;

/// Mean Earth radius in kilometers, used by [`haversine_km`].
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Pixel size of the Web-Mercator world at zoom 0.
const TILE_SIZE: f64 = 256.0;

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Round both coordinates to 6 decimal places (~0.11 m at the equator).
    /// This is the precision contract for every coordinate the engine emits.
    pub fn rounded(self) -> Self {
        Self {
            lat: round6(self.lat),
            lng: round6(self.lng),
        }
    }
}

/// A point on the Web-Mercator pixel plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn distance_to(self, other: PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Round a coordinate to exactly 6 decimal places.
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Project a coordinate onto the Web-Mercator pixel plane at `zoom`.
///
/// Latitude is clamped to the Mercator singularity bounds (±85.05°) so the
/// projection stays finite even for out-of-range input, which the engine
/// passes through rather than rejecting.
pub fn project(pos: LatLng, zoom: f64) -> PixelPoint {
    let scale = TILE_SIZE * zoom.exp2();
    let lat = pos.lat.clamp(-85.051_128, 85.051_128);
    let lat_rad = lat.to_radians();

    let x = (pos.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - ((lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI)) / 2.0 * scale;
    PixelPoint { x, y }
}

/// Inverse of [`project`]: pixel-plane point back to latitude/longitude.
pub fn unproject(point: PixelPoint, zoom: f64) -> LatLng {
    let scale = TILE_SIZE * zoom.exp2();
    let lng = point.x / scale * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * point.y / scale);
    let lat = n.sinh().atan().to_degrees();
    LatLng { lat, lng }
}

/// Great-circle distance between two coordinates in kilometers.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial great-circle bearing from `a` to `b` in compass degrees (0–360).
pub fn bearing_deg(a: LatLng, b: LatLng) -> f64 {
    let dlng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let x = dlng.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    (x.atan2(y).to_degrees() + 360.0) % 360.0
}
