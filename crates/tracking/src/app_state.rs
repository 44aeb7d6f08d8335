//! View entry lifecycle.
//!
//! `Loading` covers the window between view entry and the first successful
//! snapshot. `NotFound` is terminal: the scoped convoy id has no match, which
//! is a different condition from a retryable transient failure and is
//! surfaced to the host instead of being retried forever.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Live,
    NotFound,
}

impl ViewState {
    pub fn is_live(self) -> bool {
        self == ViewState::Live
    }

    pub fn is_terminal(self) -> bool {
        self == ViewState::NotFound
    }
}
