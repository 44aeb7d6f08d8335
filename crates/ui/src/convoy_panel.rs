//! Convoy info side panel and terminal view-state overlays.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use tracking::app_state::ViewState;
use tracking::entities::Asset;
use tracking::snapshot::LiveSnapshot;
use tracking::view_config::{OperatorRole, ViewConfig};

fn role_color(role: &str) -> egui::Color32 {
    match role {
        "ROP" => egui::Color32::from_rgb(250, 204, 21),
        "QRT" => egui::Color32::from_rgb(239, 68, 68),
        "TECH" => egui::Color32::from_rgb(59, 130, 246),
        "AMBULANCE" => egui::Color32::from_rgb(217, 70, 239),
        "COMMS" => egui::Color32::from_rgb(6, 182, 212),
        "COMMANDER" => egui::Color32::from_rgb(245, 158, 11),
        _ => egui::Color32::from_rgb(16, 185, 129), // CARGO and unknown roles
    }
}

fn manifest_row(ui: &mut egui::Ui, asset: &Asset) {
    let color = role_color(&asset.role);
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.colored_label(color, &asset.name);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(color, &asset.role);
            });
        });
        ui.label(format!(
            "{} • {}",
            asset.asset_type,
            asset.driver_name.as_deref().unwrap_or("No Pilot")
        ));
        ui.small(format!(
            "crew {}  fuel {:.0}%  load {:.0}t",
            asset.personnel_count, asset.fuel_status, asset.capacity_tons
        ));
    });
}

pub fn convoy_panel_ui(
    mut contexts: EguiContexts,
    snapshot: Res<LiveSnapshot>,
    config: Res<ViewConfig>,
    view_state: Res<ViewState>,
) {
    if !view_state.is_live() {
        return;
    }
    let Some(convoy) = snapshot.convoy(config.convoy_id) else {
        return;
    };

    let role_label = match config.role {
        OperatorRole::Commander => "COMMANDER",
        OperatorRole::TcpIncharge => "TCP INCHARGE",
    };

    egui::SidePanel::left("convoy_panel")
        .default_width(280.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(&convoy.name);
            ui.label(format!(
                "{} → {}",
                convoy.start_location, convoy.end_location
            ));
            ui.small(format!("operator: {role_label}"));
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Status:");
                ui.colored_label(egui::Color32::from_rgb(245, 158, 11), convoy.status.label());
            });
            ui.label(format!("Assets: {} units", convoy.assets.len()));
            if let Some(route_id) = convoy.route_id {
                if let Some(route) = snapshot.route(route_id) {
                    ui.label(format!("Route: {} ({:?} risk)", route.name, route.risk_level));
                }
            }

            ui.separator();
            ui.heading("Manifest");
            egui::ScrollArea::vertical().show(ui, |ui| {
                for asset in &convoy.assets {
                    manifest_row(ui, asset);
                }

                if !snapshot.checkpoints.is_empty() {
                    ui.separator();
                    ui.heading("Checkpoints");
                    for cp in &snapshot.checkpoints {
                        ui.horizontal(|ui| {
                            ui.label(&cp.name);
                            if cp.has_upcoming_traffic() {
                                ui.colored_label(
                                    egui::Color32::from_rgb(239, 68, 68),
                                    "⚠ inbound",
                                );
                            }
                        });
                        let mut detail = cp.checkpoint_type.clone();
                        if let Some(capacity) = cp.capacity {
                            detail.push_str(&format!(" • cap {capacity}"));
                        }
                        if let Some(incharge) = &cp.tcp_incharge {
                            detail.push_str(&format!(" • {incharge}"));
                        }
                        ui.small(detail);
                    }
                }
            });
        });
}

/// Full-screen LOADING / NOT FOUND states shown before the first snapshot.
pub fn view_state_ui(
    mut contexts: EguiContexts,
    config: Res<ViewConfig>,
    view_state: Res<ViewState>,
) {
    let (text, color) = match *view_state {
        ViewState::Live => return,
        ViewState::Loading => (
            format!("LOADING CONVOY {}...", config.convoy_id),
            egui::Color32::from_rgb(16, 185, 129),
        ),
        ViewState::NotFound => (
            "CONVOY NOT FOUND".to_string(),
            egui::Color32::from_rgb(245, 158, 11),
        ),
    };

    egui::Area::new(egui::Id::new("view_state_overlay"))
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(egui::RichText::new(text).color(color).monospace().size(20.0));
        });
}
