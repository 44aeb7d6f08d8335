//! Route selection state machine.
//!
//! At most one route is ever highlighted. Clicking a moving-asset marker
//! whose owning convoy has an associated route selects that route; clicking a
//! different qualifying asset switches the selection. Deselection paths are
//! policy-gated (see [`DeselectPolicy`](crate::view_config::DeselectPolicy))
//! because the observed behavior has none.

use bevy::prelude::*;

use crate::snapshot::LiveSnapshot;
use crate::view_config::ViewConfig;

/// At most one highlighted route id, or none.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectedRoute(pub Option<i64>);

/// An asset marker was clicked.
#[derive(Event, Debug, Clone, Copy)]
pub struct MarkerClicked {
    pub asset_id: i64,
}

/// Empty map space was clicked (no marker within pick radius).
#[derive(Event, Debug, Clone, Copy)]
pub struct MapClicked;

/// Seed the selection from the view configuration, once at startup.
pub fn init_selection(config: Res<ViewConfig>, mut selected: ResMut<SelectedRoute>) {
    if let Some(route_id) = config.initial_route_id {
        selected.0 = Some(route_id);
    }
}

/// Marker clicks drive the selection transition.
///
/// A click on an asset with no convoy, or whose convoy has no route, is not a
/// transition — the current selection stays.
pub fn handle_marker_clicks(
    mut clicks: EventReader<MarkerClicked>,
    snapshot: Res<LiveSnapshot>,
    mut selected: ResMut<SelectedRoute>,
) {
    for click in clicks.read() {
        if let Some(route_id) = snapshot.route_for_asset(click.asset_id) {
            if selected.0 != Some(route_id) {
                selected.0 = Some(route_id);
            }
        }
    }
}

/// Policy-gated: clear selection on empty-space clicks.
pub fn handle_empty_clicks(
    mut clicks: EventReader<MapClicked>,
    config: Res<ViewConfig>,
    mut selected: ResMut<SelectedRoute>,
) {
    if clicks.is_empty() {
        return;
    }
    clicks.clear();
    if config.deselect.clear_on_empty_click && selected.0.is_some() {
        selected.0 = None;
    }
}

/// Policy-gated: clear selection when the selected route vanished from a
/// fresh snapshot.
pub fn clear_missing_selection(
    snapshot: Res<LiveSnapshot>,
    config: Res<ViewConfig>,
    mut selected: ResMut<SelectedRoute>,
) {
    if !snapshot.is_changed() || !config.deselect.clear_on_missing_route {
        return;
    }
    if let Some(route_id) = selected.0 {
        if snapshot.route(route_id).is_none() {
            selected.0 = None;
        }
    }
}
