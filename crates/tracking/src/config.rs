use std::time::Duration;

use crate::geo::LatLng;

/// Default map center (Jammu) used when the host view supplies none.
pub const DEFAULT_CENTER: LatLng = LatLng::new(32.7266, 74.857);
pub const DEFAULT_ZOOM: f64 = 8.0;

pub const MIN_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Screen-space radius within which static assets collapse into one cluster.
pub const CLUSTER_RADIUS_PX: f64 = 80.0;

/// Minimum zoom at which airbase-like checkpoints become visible. Airbases are
/// few and matter at a strategic viewing scale, so they appear much earlier
/// than the dense generic checkpoint layer.
pub const AIRBASE_MIN_ZOOM: f64 = 6.0;

/// Minimum zoom at which generic checkpoints become visible.
pub const CHECKPOINT_MIN_ZOOM: f64 = 10.0;

/// Live convoy state refresh cadence.
pub const CONVOY_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Checkpoint layer refresh cadence. Checkpoints are near-static.
pub const CHECKPOINT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Unattached (clusterable) asset population refresh cadence.
pub const STATION_ASSETS_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Screen-space radius for marker hit-testing on click.
pub const PICK_RADIUS_PX: f64 = 18.0;

/// A route needs at least this many waypoints to be drawable.
pub const MIN_ROUTE_WAYPOINTS: usize = 2;
