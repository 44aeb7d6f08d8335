//! Telemetry pollers.
//!
//! Independent pollers (convoy live state, checkpoint layer, unattached
//! station assets) dispatch fetches onto the [`AsyncComputeTaskPool`] on
//! their own timers; there is no cross-poller ordering guarantee. Every
//! dispatched fetch carries a monotonically increasing generation number per
//! poller, and a resolved response is applied only if its generation is newer
//! than the last applied one — so two overlapping in-flight fetches resolving
//! out of order can never let a stale response overwrite a fresher snapshot.
//!
//! Failure policy: a transient failure is logged and the previous snapshot
//! stays authoritative. `NotFound` before the first successful snapshot is
//! the terminal view-entry failure; afterwards it degrades to transient.

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};

use crate::app_state::ViewState;
use crate::entities::{Asset, Checkpoint, Convoy};
use crate::feed::{FeedError, FeedHandle};
use crate::snapshot::LiveSnapshot;
use crate::view_config::ViewConfig;

/// Which poller a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollKind {
    Convoy,
    Checkpoints,
    StationAssets,
}

/// Payload variants a fetch can resolve to.
pub enum FeedPayload {
    Convoy(Convoy),
    Checkpoints(Vec<Checkpoint>),
    StationAssets(Vec<Asset>),
}

/// One poller's request-generation bookkeeping.
///
/// `issue()` tags a new fetch; `should_apply()` rejects any response that is
/// not strictly newer than the last applied one.
#[derive(Debug, Default)]
pub struct GenerationWindow {
    issued: u64,
    last_applied: u64,
}

impl GenerationWindow {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn should_apply(&self, generation: u64) -> bool {
        generation > self.last_applied
    }

    pub fn mark_applied(&mut self, generation: u64) {
        self.last_applied = generation;
    }

    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }
}

#[derive(Resource, Default)]
pub struct FetchGenerations {
    pub convoy: GenerationWindow,
    pub checkpoints: GenerationWindow,
    pub station_assets: GenerationWindow,
}

impl FetchGenerations {
    fn window_mut(&mut self, kind: PollKind) -> &mut GenerationWindow {
        match kind {
            PollKind::Convoy => &mut self.convoy,
            PollKind::Checkpoints => &mut self.checkpoints,
            PollKind::StationAssets => &mut self.station_assets,
        }
    }
}

/// An in-flight fetch. Despawning the entity drops the task, which cancels
/// the fetch — nothing can be delivered from it afterwards.
#[derive(Component)]
pub struct InFlightFetch {
    pub kind: PollKind,
    pub generation: u64,
    task: Task<Result<FeedPayload, FeedError>>,
}

#[derive(Resource)]
pub struct ConvoyPollTimer(pub Timer);

#[derive(Resource)]
pub struct CheckpointPollTimer(pub Timer);

#[derive(Resource)]
pub struct StationAssetsPollTimer(pub Timer);

/// The stop handle for the whole view: once set, no fetch is dispatched, no
/// response is applied (even for tasks that already resolved), and no layer
/// entity is created.
#[derive(Resource, Default)]
pub struct ViewHalted(pub bool);

/// Run condition for everything that must stop at teardown.
pub fn view_running(halted: Res<ViewHalted>) -> bool {
    !halted.0
}

/// Host request to tear the view down: halts polling, cancels in-flight
/// fetches, and releases every layer entity.
#[derive(Event)]
pub struct ViewTeardown;

/// Build a repeating poll timer that fires immediately on the first tick.
pub(crate) fn poll_timer(interval: std::time::Duration) -> Timer {
    let mut timer = Timer::new(interval, TimerMode::Repeating);
    timer.set_elapsed(interval);
    timer
}

pub fn dispatch_convoy_poll(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<ConvoyPollTimer>,
    feed: Res<FeedHandle>,
    config: Res<ViewConfig>,
    mut generations: ResMut<FetchGenerations>,
    paused: Res<ViewHalted>,
    view_state: Res<ViewState>,
) {
    if paused.0 || view_state.is_terminal() {
        return;
    }
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let generation = generations.convoy.issue();
    let feed = feed.0.clone();
    let convoy_id = config.convoy_id;
    let task = AsyncComputeTaskPool::get()
        .spawn(async move { feed.fetch_convoy(convoy_id).map(FeedPayload::Convoy) });
    commands.spawn(InFlightFetch {
        kind: PollKind::Convoy,
        generation,
        task,
    });
}

pub fn dispatch_checkpoint_poll(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<CheckpointPollTimer>,
    feed: Res<FeedHandle>,
    mut generations: ResMut<FetchGenerations>,
    paused: Res<ViewHalted>,
    view_state: Res<ViewState>,
) {
    if paused.0 || view_state.is_terminal() {
        return;
    }
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let generation = generations.checkpoints.issue();
    let feed = feed.0.clone();
    let task = AsyncComputeTaskPool::get()
        .spawn(async move { feed.fetch_checkpoints().map(FeedPayload::Checkpoints) });
    commands.spawn(InFlightFetch {
        kind: PollKind::Checkpoints,
        generation,
        task,
    });
}

pub fn dispatch_station_assets_poll(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<StationAssetsPollTimer>,
    feed: Res<FeedHandle>,
    mut generations: ResMut<FetchGenerations>,
    paused: Res<ViewHalted>,
    view_state: Res<ViewState>,
) {
    if paused.0 || view_state.is_terminal() {
        return;
    }
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let generation = generations.station_assets.issue();
    let feed = feed.0.clone();
    let task = AsyncComputeTaskPool::get()
        .spawn(async move { feed.fetch_assets(None).map(FeedPayload::StationAssets) });
    commands.spawn(InFlightFetch {
        kind: PollKind::StationAssets,
        generation,
        task,
    });
}

/// Drain resolved fetches and fold them into the snapshot.
pub fn apply_poll_results(
    mut commands: Commands,
    mut in_flight: Query<(Entity, &mut InFlightFetch)>,
    mut snapshot: ResMut<LiveSnapshot>,
    mut generations: ResMut<FetchGenerations>,
    mut view_state: ResMut<ViewState>,
    paused: Res<ViewHalted>,
) {
    if paused.0 {
        return;
    }

    for (entity, mut fetch) in &mut in_flight {
        let Some(result) = block_on(futures_lite::future::poll_once(&mut fetch.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        let kind = fetch.kind;
        let generation = fetch.generation;
        let window = generations.window_mut(kind);
        if !window.should_apply(generation) {
            debug!(
                "discarding stale {:?} response (generation {} <= {})",
                kind,
                generation,
                window.last_applied()
            );
            continue;
        }

        match result {
            Ok(FeedPayload::Convoy(convoy)) => {
                window.mark_applied(generation);
                snapshot.apply_convoy(convoy);
                if *view_state == ViewState::Loading {
                    *view_state = ViewState::Live;
                }
            }
            Ok(FeedPayload::Checkpoints(checkpoints)) => {
                window.mark_applied(generation);
                snapshot.apply_checkpoints(checkpoints);
            }
            Ok(FeedPayload::StationAssets(assets)) => {
                window.mark_applied(generation);
                snapshot.apply_station_assets(assets);
            }
            Err(FeedError::NotFound)
                if kind == PollKind::Convoy && *view_state == ViewState::Loading =>
            {
                warn!("convoy not found at view entry; surfacing terminal state");
                *view_state = ViewState::NotFound;
            }
            Err(err) => {
                warn!("{:?} poll failed, keeping previous snapshot: {}", kind, err);
            }
        }
    }
}
