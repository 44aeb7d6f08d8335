//! Entity constructors for integration tests.

use crate::entities::{Asset, Checkpoint, Convoy, ConvoyStatus, RiskLevel, Route};

pub fn asset(id: i64, convoy_id: Option<i64>, lat: f64, lng: f64) -> Asset {
    Asset {
        id,
        name: format!("A-{id}"),
        asset_type: "TRUCK".to_string(),
        current_lat: Some(lat),
        current_long: Some(lng),
        bearing: 0.0,
        is_available: true,
        convoy_id,
        role: "CARGO".to_string(),
        driver_name: None,
        fuel_status: 100.0,
        personnel_count: 0,
        capacity_tons: 0.0,
    }
}

pub fn convoy(id: i64, route_id: Option<i64>, assets: Vec<Asset>) -> Convoy {
    Convoy {
        id,
        name: format!("CVY-{id}"),
        status: ConvoyStatus::InTransit,
        route_id,
        start_location: "Jammu".to_string(),
        end_location: "Srinagar".to_string(),
        assets,
        route: None,
    }
}

pub fn route(id: i64, waypoints: Vec<[f64; 2]>) -> Route {
    Route {
        id,
        name: format!("RT-{id}"),
        waypoints,
        risk_level: RiskLevel::Medium,
        status: "ACTIVE".to_string(),
    }
}

pub fn checkpoint(id: i64, checkpoint_type: &str, lat: f64, lng: f64) -> Checkpoint {
    Checkpoint {
        id,
        name: format!("CP-{id}"),
        lat,
        long: lng,
        checkpoint_type: checkpoint_type.to_string(),
        location_name: None,
        capacity: None,
        tcp_incharge: None,
        upcoming_convoys: Vec::new(),
    }
}
