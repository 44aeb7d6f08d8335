//! The read-only collaborator boundary that produces entity snapshots.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

use crate::entities::{Asset, Checkpoint, Convoy, Route};

/// Fetch failure taxonomy.
///
/// `Transient` failures keep the previous snapshot authoritative and the
/// polling cadence unchanged. `NotFound` is terminal only at view entry
/// (before any first successful snapshot); afterwards it degrades to a
/// transient condition, since a convoy that existed a moment ago is more
/// likely mid-write than gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    Transient(String),
    NotFound,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Transient(msg) => write!(f, "transient fetch failure: {msg}"),
            FeedError::NotFound => write!(f, "entity not found"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Collaborator endpoints consumed by the pollers.
///
/// Implementations run on the async compute pool, so blocking I/O inside a
/// method is acceptable; it never blocks the schedule.
pub trait TelemetryFeed: Send + Sync + 'static {
    /// Fetch one convoy by id, including its member assets and route.
    fn fetch_convoy(&self, id: i64) -> Result<Convoy, FeedError>;

    /// Fetch all checkpoints.
    fn fetch_checkpoints(&self) -> Result<Vec<Checkpoint>, FeedError>;

    /// Fetch all routes.
    fn fetch_routes(&self) -> Result<Vec<Route>, FeedError>;

    /// Fetch assets, optionally filtered by a checkpoint/station id.
    fn fetch_assets(&self, station_id: Option<i64>) -> Result<Vec<Asset>, FeedError>;
}

/// Shared handle to the feed, cloneable into fetch tasks.
#[derive(Resource, Clone)]
pub struct FeedHandle(pub Arc<dyn TelemetryFeed>);

impl FeedHandle {
    pub fn new<F: TelemetryFeed>(feed: F) -> Self {
        Self(Arc::new(feed))
    }
}
