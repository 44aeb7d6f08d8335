//! Wire-format entity types exchanged with the data collaborators.
//!
//! Field names and optionality match the collaborator JSON contract exactly;
//! serde defaults implement the partial-payload policy: missing optional
//! numerics fall back to harmless defaults, and an asset missing either
//! coordinate is simply excluded from rendering rather than failing the
//! reconciliation pass.

use serde::{Deserialize, Serialize};

use crate::config::MIN_ROUTE_WAYPOINTS;
use crate::geo::LatLng;

/// A mobile (or parked) transport asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub asset_type: String,
    #[serde(default)]
    pub current_lat: Option<f64>,
    #[serde(default)]
    pub current_long: Option<f64>,
    #[serde(default)]
    pub bearing: f64,
    pub is_available: bool,
    #[serde(default)]
    pub convoy_id: Option<i64>,

    // Manifest detail; only the info panel reads these.
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default = "default_fuel")]
    pub fuel_status: f64,
    #[serde(default)]
    pub personnel_count: i64,
    #[serde(default)]
    pub capacity_tons: f64,
}

fn default_role() -> String {
    "CARGO".to_string()
}

fn default_fuel() -> f64 {
    100.0
}

impl Asset {
    /// Position, or `None` when the asset has no fix. An asset without both
    /// coordinates is never rendered.
    pub fn position(&self) -> Option<LatLng> {
        match (self.current_lat, self.current_long) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }

    /// Assets attached to a convoy are rendered individually and never
    /// clustered; unattached assets are the clusterable static population.
    pub fn is_moving(&self) -> bool {
        self.convoy_id.is_some()
    }
}

/// Convoy lifecycle status. Unknown strings are preserved, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConvoyStatus {
    Planned,
    InTransit,
    Other(String),
}

impl From<String> for ConvoyStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PLANNED" => ConvoyStatus::Planned,
            "IN_TRANSIT" => ConvoyStatus::InTransit,
            _ => ConvoyStatus::Other(s),
        }
    }
}

impl From<ConvoyStatus> for String {
    fn from(status: ConvoyStatus) -> Self {
        match status {
            ConvoyStatus::Planned => "PLANNED".to_string(),
            ConvoyStatus::InTransit => "IN_TRANSIT".to_string(),
            ConvoyStatus::Other(s) => s,
        }
    }
}

impl ConvoyStatus {
    pub fn label(&self) -> &str {
        match self {
            ConvoyStatus::Planned => "PLANNED",
            ConvoyStatus::InTransit => "IN_TRANSIT",
            ConvoyStatus::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Convoy {
    pub id: i64,
    pub name: String,
    pub status: ConvoyStatus,
    #[serde(default)]
    pub route_id: Option<i64>,
    #[serde(default)]
    pub start_location: String,
    #[serde(default)]
    pub end_location: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub route: Option<Route>,
}

/// Route risk classification driving polyline styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub name: String,
    /// Ordered `[lat, lng]` pairs.
    pub waypoints: Vec<[f64; 2]>,
    pub risk_level: RiskLevel,
    pub status: String,
}

impl Route {
    /// A route with fewer than 2 waypoints is never drawn.
    pub fn is_renderable(&self) -> bool {
        self.waypoints.len() >= MIN_ROUTE_WAYPOINTS
    }

    pub fn waypoint_coords(&self) -> impl Iterator<Item = LatLng> + '_ {
        self.waypoints.iter().map(|w| LatLng::new(w[0], w[1]))
    }
}

/// A convoy expected to pass a checkpoint soon; any non-empty list puts a
/// warning indicator on the checkpoint marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingConvoy {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub eta: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub long: f64,
    pub checkpoint_type: String,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub tcp_incharge: Option<String>,
    #[serde(default)]
    pub upcoming_convoys: Vec<UpcomingConvoy>,
}

impl Checkpoint {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.long)
    }

    pub fn has_upcoming_traffic(&self) -> bool {
        !self.upcoming_convoys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_minimal_payload_defaults() {
        let asset: Asset = serde_json::from_str(
            r#"{"id": 3, "name": "TATRA-03", "asset_type": "TRUCK", "is_available": true}"#,
        )
        .unwrap();
        assert_eq!(asset.bearing, 0.0);
        assert_eq!(asset.convoy_id, None);
        assert_eq!(asset.position(), None);
        assert_eq!(asset.role, "CARGO");
        assert_eq!(asset.fuel_status, 100.0);
        assert_eq!(asset.personnel_count, 0);
    }

    #[test]
    fn test_asset_with_one_coordinate_has_no_position() {
        let asset: Asset = serde_json::from_str(
            r#"{"id": 1, "name": "A", "asset_type": "JEEP", "current_lat": 32.7,
                "is_available": false}"#,
        )
        .unwrap();
        assert_eq!(asset.position(), None);
    }

    #[test]
    fn test_moving_flag_follows_convoy_reference() {
        let mut asset: Asset = serde_json::from_str(
            r#"{"id": 1, "name": "A", "asset_type": "JEEP", "is_available": true}"#,
        )
        .unwrap();
        assert!(!asset.is_moving());
        asset.convoy_id = Some(5);
        assert!(asset.is_moving());
    }

    #[test]
    fn test_convoy_status_round_trips_unknown_values() {
        let convoy: Convoy = serde_json::from_str(
            r#"{"id": 5, "name": "CVY-Alpha", "status": "STAGING"}"#,
        )
        .unwrap();
        assert_eq!(convoy.status, ConvoyStatus::Other("STAGING".to_string()));
        let json = serde_json::to_string(&convoy).unwrap();
        assert!(json.contains(r#""status":"STAGING""#));
    }

    #[test]
    fn test_route_renderable_requires_two_waypoints() {
        let mut route: Route = serde_json::from_str(
            r#"{"id": 9, "name": "NH44", "waypoints": [[32.8, 74.9], [33.0, 75.0]],
                "risk_level": "HIGH", "status": "ACTIVE"}"#,
        )
        .unwrap();
        assert!(route.is_renderable());
        assert_eq!(route.risk_level, RiskLevel::High);
        route.waypoints.truncate(1);
        assert!(!route.is_renderable());
    }

    #[test]
    fn test_checkpoint_optional_fields_default() {
        let cp: Checkpoint = serde_json::from_str(
            r#"{"id": 2, "name": "TCP Nagrota", "lat": 32.76, "long": 74.93,
                "checkpoint_type": "TCP"}"#,
        )
        .unwrap();
        assert_eq!(cp.capacity, None);
        assert!(!cp.has_upcoming_traffic());
    }

    #[test]
    fn test_checkpoint_upcoming_convoys_flag() {
        let cp: Checkpoint = serde_json::from_str(
            r#"{"id": 2, "name": "Toll", "lat": 32.7, "long": 74.8,
                "checkpoint_type": "Toll Gate",
                "upcoming_convoys": [{"id": 101, "name": "CVY-Alpha", "eta": "14:30"}]}"#,
        )
        .unwrap();
        assert!(cp.has_upcoming_traffic());
    }
}
