//! Selected-route polyline drawing.
//!
//! Polylines are immediate-mode gizmo lines redrawn every frame from the
//! single `RoutePolyline` layer entity. Styling follows the risk level:
//! HIGH is a solid red line, MEDIUM a dashed amber one, LOW a dashed,
//! fainter emerald one.

use bevy::prelude::*;

use tracking::entities::RiskLevel;
use tracking::layers::RoutePolyline;
use tracking::viewport::MapViewport;

use crate::camera::latlng_to_world;

const HIGH_COLOR: Color = Color::srgb(0.937, 0.267, 0.267);
const MEDIUM_COLOR: Color = Color::srgb(0.961, 0.620, 0.043);
const LOW_COLOR: Color = Color::srgb(0.063, 0.725, 0.506);

const DASH_LEN: f32 = 8.0;
const GAP_LEN: f32 = 10.0;

fn risk_style(risk: RiskLevel) -> (Color, bool) {
    match risk {
        RiskLevel::High => (HIGH_COLOR.with_alpha(0.8), false),
        RiskLevel::Medium => (MEDIUM_COLOR.with_alpha(0.7), true),
        RiskLevel::Low => (LOW_COLOR.with_alpha(0.4), true),
    }
}

pub fn draw_route_polylines(
    viewport: Res<MapViewport>,
    polylines: Query<&RoutePolyline>,
    mut gizmos: Gizmos,
) {
    for polyline in &polylines {
        let (color, dashed) = risk_style(polyline.risk);
        let points: Vec<Vec2> = polyline
            .waypoints
            .iter()
            .map(|wp| latlng_to_world(*wp, &viewport))
            .collect();

        for pair in points.windows(2) {
            if dashed {
                draw_dashed_segment(&mut gizmos, pair[0], pair[1], color);
            } else {
                gizmos.line_2d(pair[0], pair[1], color);
            }
        }
    }
}

fn draw_dashed_segment(gizmos: &mut Gizmos, from: Vec2, to: Vec2, color: Color) {
    let length = from.distance(to);
    if length < f32::EPSILON {
        return;
    }
    let dir = (to - from) / length;
    let step = DASH_LEN + GAP_LEN;

    let mut offset = 0.0;
    while offset < length {
        let end = (offset + DASH_LEN).min(length);
        gizmos.line_2d(from + dir * offset, from + dir * end, color);
        offset += step;
    }
}
