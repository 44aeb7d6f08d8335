//! Per-view construction-time configuration.
//!
//! Everything a hosting view used to smuggle in through ambient state (the
//! operator role, the convoy scope, the initial selection) is passed
//! explicitly here, inserted as a resource before the plugin builds.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::{
    CHECKPOINT_POLL_INTERVAL, CONVOY_POLL_INTERVAL, DEFAULT_CENTER, DEFAULT_ZOOM,
    STATION_ASSETS_POLL_INTERVAL,
};
use crate::geo::LatLng;

/// The operator role the view was entered with. The core does not branch on
/// it; it is carried for the hosting UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatorRole {
    #[default]
    Commander,
    TcpIncharge,
}

/// Deselection is not part of the observed behavior, so both clearing paths
/// are opt-in policy rather than hardcoded transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeselectPolicy {
    /// Clear selection when a fresh snapshot no longer contains the selected
    /// route.
    pub clear_on_missing_route: bool,
    /// Clear selection when empty map space is clicked.
    pub clear_on_empty_click: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct ViewConfig {
    /// The convoy this view is scoped to.
    pub convoy_id: i64,
    /// Route highlighted when the view opens, if any.
    pub initial_route_id: Option<i64>,
    pub role: OperatorRole,
    pub deselect: DeselectPolicy,
    pub convoy_poll: Duration,
    pub checkpoint_poll: Duration,
    pub station_poll: Duration,
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            convoy_id: 1,
            initial_route_id: None,
            role: OperatorRole::default(),
            deselect: DeselectPolicy::default(),
            convoy_poll: CONVOY_POLL_INTERVAL,
            checkpoint_poll: CHECKPOINT_POLL_INTERVAL,
            station_poll: STATION_ASSETS_POLL_INTERVAL,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl ViewConfig {
    pub fn for_convoy(convoy_id: i64) -> Self {
        Self {
            convoy_id,
            ..Default::default()
        }
    }
}
