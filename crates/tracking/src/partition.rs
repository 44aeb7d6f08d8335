//! Screen-space clustering of the static-asset population.
//!
//! The proximity radius is expressed in Web-Mercator pixels at the current
//! zoom, so cluster granularity adapts as the operator zooms: wide views
//! collapse whole depots into one badge, close views dissolve them back into
//! individual markers. Clusters carry no identity across rebuilds — they are
//! a pure rendering artifact of the current membership.

use crate::config::CLUSTER_RADIUS_PX;
use crate::entities::Asset;
use crate::geo::{project, LatLng};

/// One cluster of static assets. `members` holds asset ids in ascending
/// order; a singleton dissolves into an individual marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub center: LatLng,
    pub members: Vec<i64>,
}

impl Cluster {
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// Greedy screen-space clustering.
///
/// Assets are seeded in ascending id order, which makes the result
/// deterministic for a given (set, zoom) input. Each unassigned asset founds
/// a cluster and absorbs every other unassigned asset within
/// [`CLUSTER_RADIUS_PX`] of its projected position; the badge centroid is the
/// mean of the member coordinates.
pub fn cluster_static_assets(static_assets: &[&Asset], zoom: f64) -> Vec<Cluster> {
    let mut positioned: Vec<(i64, LatLng)> = static_assets
        .iter()
        .filter_map(|a| a.position().map(|p| (a.id, p)))
        .collect();
    positioned.sort_unstable_by_key(|(id, _)| *id);

    let pixels: Vec<_> = positioned
        .iter()
        .map(|(_, pos)| project(*pos, zoom))
        .collect();

    let mut assigned = vec![false; positioned.len()];
    let mut clusters = Vec::new();

    for seed in 0..positioned.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;

        let mut members = vec![seed];
        for other in seed + 1..positioned.len() {
            if assigned[other] {
                continue;
            }
            if pixels[seed].distance_to(pixels[other]) <= CLUSTER_RADIUS_PX {
                assigned[other] = true;
                members.push(other);
            }
        }

        let lat = members.iter().map(|&i| positioned[i].1.lat).sum::<f64>() / members.len() as f64;
        let lng = members.iter().map(|&i| positioned[i].1.lng).sum::<f64>() / members.len() as f64;
        clusters.push(Cluster {
            center: LatLng::new(lat, lng),
            members: members.into_iter().map(|i| positioned[i].0).collect(),
        });
    }

    clusters
}
