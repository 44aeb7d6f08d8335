//! In-process telemetry feed for live demos.
//!
//! Stands in for the backend collaborators: advances convoy assets along the
//! route waypoints at per-asset speeds, computes the bearing toward the next
//! waypoint, and occasionally flips a depot asset's availability so the
//! cluster layer has something to react to. Deterministic for a given seed.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tracking::entities::{
    Asset, Checkpoint, Convoy, ConvoyStatus, RiskLevel, Route, UpcomingConvoy,
};
use tracking::feed::{FeedError, TelemetryFeed};
use tracking::geo::{bearing_deg, haversine_km, LatLng};

/// Convoy cruise speed band, km/h.
const MIN_SPEED_KMH: f64 = 40.0;
const MAX_SPEED_KMH: f64 = 90.0;

/// Spacing between consecutive convoy vehicles along the route, km.
const FORMATION_GAP_KM: f64 = 0.05;

/// Per-fetch probability that one depot asset flips availability.
const AVAILABILITY_FLIP_CHANCE: f64 = 0.05;

/// Convoy formation order, lead to rear.
const FORMATION_ROLES: [&str; 8] = [
    "ROP", "QRT", "TECH", "CARGO", "AMBULANCE", "COMMS", "COMMANDER", "QRT",
];

/// Progress of one vehicle along the route polyline.
struct RouteCursor {
    index: usize,
    progress_km: f64,
    speed_kmh: f64,
}

struct SimState {
    rng: ChaCha8Rng,
    convoy: Convoy,
    route: Route,
    checkpoints: Vec<Checkpoint>,
    station_assets: Vec<Asset>,
    cursors: HashMap<i64, RouteCursor>,
    last_advance: Instant,
}

pub struct SimulatedFeed {
    state: Mutex<SimState>,
}

impl SimulatedFeed {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let route = demo_route();
        let convoy = demo_convoy(&route);
        let speed = rng.gen_range(MIN_SPEED_KMH..MAX_SPEED_KMH);

        // Stagger the column: each vehicle starts a fixed gap behind the one
        // ahead, all at the leader's speed so the formation holds.
        let cursors = convoy
            .assets
            .iter()
            .enumerate()
            .map(|(i, asset)| {
                (
                    asset.id,
                    RouteCursor {
                        index: 0,
                        progress_km: -(i as f64) * FORMATION_GAP_KM,
                        speed_kmh: speed,
                    },
                )
            })
            .collect();

        Self {
            state: Mutex::new(SimState {
                rng,
                convoy,
                route,
                checkpoints: demo_checkpoints(),
                station_assets: demo_station_assets(),
                cursors,
                last_advance: Instant::now(),
            }),
        }
    }

    fn advance(state: &mut SimState) {
        let elapsed_hours = state.last_advance.elapsed().as_secs_f64() / 3600.0;
        state.last_advance = Instant::now();

        let waypoints: Vec<LatLng> = state.route.waypoint_coords().collect();
        if waypoints.len() < 2 {
            return;
        }

        for asset in &mut state.convoy.assets {
            let Some(cursor) = state.cursors.get_mut(&asset.id) else {
                continue;
            };
            let mut remaining_km = cursor.speed_kmh * elapsed_hours;

            let mut safety = 0;
            while remaining_km > 0.0 && safety < 50 {
                safety += 1;
                if cursor.index >= waypoints.len() - 1 {
                    // Loop back to the route start.
                    cursor.index = 0;
                    cursor.progress_km = 0.0;
                }
                let curr = waypoints[cursor.index];
                let next = waypoints[cursor.index + 1];
                let seg_km = haversine_km(curr, next);
                if seg_km < 1e-4 {
                    cursor.index += 1;
                    continue;
                }

                let left_on_seg = seg_km - cursor.progress_km;
                if remaining_km >= left_on_seg {
                    remaining_km -= left_on_seg;
                    cursor.index += 1;
                    cursor.progress_km = 0.0;
                } else {
                    cursor.progress_km += remaining_km;
                    remaining_km = 0.0;
                    let frac = (cursor.progress_km / seg_km).max(0.0);
                    asset.current_lat = Some(curr.lat + (next.lat - curr.lat) * frac);
                    asset.current_long = Some(curr.lng + (next.lng - curr.lng) * frac);
                    asset.bearing = bearing_deg(curr, next);
                }
            }
        }

        if state.rng.gen_bool(AVAILABILITY_FLIP_CHANCE) && !state.station_assets.is_empty() {
            let idx = state.rng.gen_range(0..state.station_assets.len());
            let asset = &mut state.station_assets[idx];
            asset.is_available = !asset.is_available;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl TelemetryFeed for SimulatedFeed {
    fn fetch_convoy(&self, id: i64) -> Result<Convoy, FeedError> {
        let mut state = self.lock();
        if id != state.convoy.id {
            return Err(FeedError::NotFound);
        }
        Self::advance(&mut state);
        let mut convoy = state.convoy.clone();
        convoy.route = Some(state.route.clone());
        Ok(convoy)
    }

    fn fetch_checkpoints(&self) -> Result<Vec<Checkpoint>, FeedError> {
        Ok(self.lock().checkpoints.clone())
    }

    fn fetch_routes(&self) -> Result<Vec<Route>, FeedError> {
        Ok(vec![self.lock().route.clone()])
    }

    fn fetch_assets(&self, _station_id: Option<i64>) -> Result<Vec<Asset>, FeedError> {
        Ok(self.lock().station_assets.clone())
    }
}

// ---------------------------------------------------------------------------
// Demo data
// ---------------------------------------------------------------------------

fn demo_route() -> Route {
    Route {
        id: 9,
        name: "NH44 Jammu – Srinagar".to_string(),
        waypoints: vec![
            [32.7266, 74.857],
            [32.857, 74.95],
            [33.03, 74.96],
            [33.25, 74.89],
            [33.45, 75.02],
            [33.65, 75.15],
            [33.8, 75.05],
            [34.0837, 74.7973],
        ],
        risk_level: RiskLevel::Medium,
        status: "ACTIVE".to_string(),
    }
}

fn demo_convoy(route: &Route) -> Convoy {
    let start = route.waypoints[0];
    let assets = (0..8)
        .map(|i| Asset {
            id: 100 + i as i64,
            name: format!("TATRA-{:02}", i + 1),
            asset_type: "TRUCK".to_string(),
            current_lat: Some(start[0]),
            current_long: Some(start[1]),
            bearing: 0.0,
            is_available: true,
            convoy_id: Some(5),
            role: FORMATION_ROLES[i].to_string(),
            driver_name: Some(format!("Driver {}", i + 1)),
            fuel_status: 100.0 - i as f64 * 3.0,
            personnel_count: 2,
            capacity_tons: 8.0,
        })
        .collect();

    Convoy {
        id: 5,
        name: "CVY-Alpha".to_string(),
        status: ConvoyStatus::InTransit,
        route_id: Some(route.id),
        start_location: "Jammu".to_string(),
        end_location: "Srinagar".to_string(),
        assets,
        route: None,
    }
}

fn demo_checkpoints() -> Vec<Checkpoint> {
    vec![
        Checkpoint {
            id: 1,
            name: "Lakhanpur Toll".to_string(),
            lat: 32.5534,
            long: 75.4617,
            checkpoint_type: "Toll Gate".to_string(),
            location_name: Some("Lakhanpur".to_string()),
            capacity: Some(50),
            tcp_incharge: Some("Maj. Sharma".to_string()),
            upcoming_convoys: vec![UpcomingConvoy {
                id: 101,
                name: "CVY-Alpha".to_string(),
                eta: Some("14:30".to_string()),
            }],
        },
        Checkpoint {
            id: 2,
            name: "TCP Nagrota".to_string(),
            lat: 32.759,
            long: 74.9377,
            checkpoint_type: "TCP".to_string(),
            location_name: Some("Nagrota".to_string()),
            capacity: Some(30),
            tcp_incharge: Some("Capt. Verma".to_string()),
            upcoming_convoys: Vec::new(),
        },
        Checkpoint {
            id: 3,
            name: "Udhampur Police Post".to_string(),
            lat: 32.9241,
            long: 75.1416,
            checkpoint_type: "Police Post".to_string(),
            location_name: Some("Udhampur".to_string()),
            capacity: None,
            tcp_incharge: None,
            upcoming_convoys: Vec::new(),
        },
        Checkpoint {
            id: 4,
            name: "Ramban Rest Stop".to_string(),
            lat: 33.2429,
            long: 75.2367,
            checkpoint_type: "Rest Stop".to_string(),
            location_name: Some("Ramban".to_string()),
            capacity: Some(20),
            tcp_incharge: None,
            upcoming_convoys: Vec::new(),
        },
        Checkpoint {
            id: 5,
            name: "Jammu Airbase".to_string(),
            lat: 32.689,
            long: 74.8374,
            checkpoint_type: "AIRBASE".to_string(),
            location_name: Some("Satwari".to_string()),
            capacity: Some(120),
            tcp_incharge: Some("Wg Cdr. Singh".to_string()),
            upcoming_convoys: Vec::new(),
        },
        Checkpoint {
            id: 6,
            name: "Awantipora Airbase".to_string(),
            lat: 33.8766,
            long: 74.9759,
            checkpoint_type: "AIRBASE".to_string(),
            location_name: Some("Awantipora".to_string()),
            capacity: Some(90),
            tcp_incharge: None,
            upcoming_convoys: Vec::new(),
        },
    ]
}

fn demo_station_assets() -> Vec<Asset> {
    // Parked pool around the Jammu depot; close enough to cluster at the
    // default zoom.
    let depot = [
        (200, 32.7312, 74.8601, true),
        (201, 32.7321, 74.8617, true),
        (202, 32.7305, 74.8629, false),
        (203, 32.7334, 74.8588, true),
        (204, 32.7298, 74.8575, true),
    ];
    depot
        .iter()
        .map(|&(id, lat, lng, available)| Asset {
            id,
            name: format!("DEPOT-{}", id - 199),
            asset_type: "TRUCK".to_string(),
            current_lat: Some(lat),
            current_long: Some(lng),
            bearing: 0.0,
            is_available: available,
            convoy_id: None,
            role: "CARGO".to_string(),
            driver_name: None,
            fuel_status: 100.0,
            personnel_count: 0,
            capacity_tons: 10.0,
        })
        .collect()
}
