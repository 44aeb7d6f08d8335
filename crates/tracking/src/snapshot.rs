//! The authoritative entity snapshot for one view.
//!
//! One `LiveSnapshot` holds the most recently applied poll results. The
//! reconciliation systems read it through Bevy change detection, so a failed
//! poll (which never writes here) causes no layer churn at all.

use bevy::prelude::*;

use crate::entities::{Asset, Checkpoint, Convoy, Route};

#[derive(Resource, Debug, Default)]
pub struct LiveSnapshot {
    pub convoys: Vec<Convoy>,
    pub routes: Vec<Route>,
    pub assets: Vec<Asset>,
    pub checkpoints: Vec<Checkpoint>,
}

impl LiveSnapshot {
    /// Merge a freshly fetched convoy payload: the convoy, its member assets,
    /// and its route replace any prior entries with the same ids. A route the
    /// previous payload carried but the fresh one no longer references is
    /// dropped — routes live only as long as a convoy points at them.
    pub fn apply_convoy(&mut self, convoy: Convoy) {
        let fresh_route = route_ref(&convoy);
        if let Some(prev) = self.convoys.iter().find(|c| c.id == convoy.id) {
            if let Some(prev_route) = route_ref(prev) {
                if fresh_route != Some(prev_route) {
                    self.routes.retain(|r| r.id != prev_route);
                }
            }
        }

        self.assets.retain(|a| a.convoy_id != Some(convoy.id));
        self.assets.extend(convoy.assets.iter().cloned());

        if let Some(route) = &convoy.route {
            self.routes.retain(|r| r.id != route.id);
            self.routes.push(route.clone());
        }

        self.convoys.retain(|c| c.id != convoy.id);
        self.convoys.push(convoy);
    }

    pub fn apply_checkpoints(&mut self, checkpoints: Vec<Checkpoint>) {
        self.checkpoints = checkpoints;
    }

    /// Replace the unattached (clusterable) asset population.
    pub fn apply_station_assets(&mut self, assets: Vec<Asset>) {
        self.assets.retain(|a| a.convoy_id.is_some());
        self.assets
            .extend(assets.into_iter().filter(|a| a.convoy_id.is_none()));
    }

    /// Assets attached to a convoy with a usable fix, rendered individually.
    pub fn moving_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets
            .iter()
            .filter(|a| a.is_moving() && a.position().is_some())
    }

    /// Unattached assets with a usable fix, eligible for clustering.
    pub fn static_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets
            .iter()
            .filter(|a| !a.is_moving() && a.position().is_some())
    }

    pub fn route(&self, id: i64) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn asset(&self, id: i64) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn convoy(&self, id: i64) -> Option<&Convoy> {
        self.convoys.iter().find(|c| c.id == id)
    }

    /// The route an asset's owning convoy is following, if any.
    pub fn route_for_asset(&self, asset_id: i64) -> Option<i64> {
        let asset = self.asset(asset_id)?;
        route_ref(self.convoy(asset.convoy_id?)?)
    }
}

/// The route a convoy payload references, via id or embedded body.
fn route_ref(convoy: &Convoy) -> Option<i64> {
    convoy.route_id.or(convoy.route.as_ref().map(|r| r.id))
}
