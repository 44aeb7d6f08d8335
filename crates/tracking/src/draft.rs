//! Draft route endpoint editing.
//!
//! While authoring a new route the host places up to two draggable handles
//! (start, end). A finished drag emits [`EndpointMoved`] with coordinates
//! rounded to 6 decimal places. Out-of-range coordinates are passed through
//! unchanged — clamping, if wanted, belongs to the consumer.

use bevy::prelude::*;

use crate::geo::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Start,
    End,
}

/// The candidate endpoints, not yet persisted anywhere.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DraftEndpoints {
    pub start: Option<LatLng>,
    pub end: Option<LatLng>,
}

impl DraftEndpoints {
    pub fn get(&self, kind: EndpointKind) -> Option<LatLng> {
        match kind {
            EndpointKind::Start => self.start,
            EndpointKind::End => self.end,
        }
    }

    pub fn set(&mut self, kind: EndpointKind, pos: Option<LatLng>) {
        match kind {
            EndpointKind::Start => self.start = pos,
            EndpointKind::End => self.end = pos,
        }
    }
}

/// Raw drag-gesture completion, produced by the input backend with
/// unrounded coordinates.
#[derive(Event, Debug, Clone, Copy)]
pub struct HandleDragEnded {
    pub kind: EndpointKind,
    pub raw: LatLng,
}

/// The outbound contract: a handle settled at a rounded coordinate.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EndpointMoved {
    pub kind: EndpointKind,
    pub lat: f64,
    pub lng: f64,
}

/// Round finished drags and fold them back into the draft pair.
pub fn settle_handle_drags(
    mut drags: EventReader<HandleDragEnded>,
    mut draft: ResMut<DraftEndpoints>,
    mut moved: EventWriter<EndpointMoved>,
) {
    for drag in drags.read() {
        let settled = drag.raw.rounded();
        draft.set(drag.kind, Some(settled));
        moved.send(EndpointMoved {
            kind: drag.kind,
            lat: settled.lat,
            lng: settled.lng,
        });
    }
}
