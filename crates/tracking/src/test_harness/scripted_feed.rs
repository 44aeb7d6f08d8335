//! Scripted [`TelemetryFeed`] used by `TestView`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::entities::{Asset, Checkpoint, Convoy, Route};
use crate::feed::{FeedError, TelemetryFeed};

type Scripted<T> = VecDeque<(Result<T, FeedError>, Option<Duration>)>;

#[derive(Default)]
struct Queues {
    convoys: Scripted<Convoy>,
    checkpoints: Scripted<Vec<Checkpoint>>,
    station_assets: Scripted<Vec<Asset>>,
}

/// Cloneable handle to a queue of scripted fetch results. Each fetch pops the
/// next entry (optionally stalling first, to simulate a slow network); an
/// exhausted queue yields transient failures, which the engine must tolerate
/// without state changes.
#[derive(Clone, Default)]
pub struct ScriptedFeed {
    queues: Arc<Mutex<Queues>>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_convoy(&self, convoy: Convoy) {
        self.push_convoy_result(Ok(convoy), None);
    }

    /// Enqueue a convoy response that stalls for `delay` before resolving,
    /// letting a later instant response overtake it.
    pub fn push_convoy_delayed(&self, convoy: Convoy, delay: Duration) {
        self.push_convoy_result(Ok(convoy), Some(delay));
    }

    pub fn push_convoy_error(&self, error: FeedError) {
        self.push_convoy_result(Err(error), None);
    }

    fn push_convoy_result(&self, result: Result<Convoy, FeedError>, delay: Option<Duration>) {
        self.queues
            .lock()
            .unwrap()
            .convoys
            .push_back((result, delay));
    }

    pub fn push_checkpoints(&self, checkpoints: Vec<Checkpoint>) {
        self.queues
            .lock()
            .unwrap()
            .checkpoints
            .push_back((Ok(checkpoints), None));
    }

    pub fn push_station_assets(&self, assets: Vec<Asset>) {
        self.queues
            .lock()
            .unwrap()
            .station_assets
            .push_back((Ok(assets), None));
    }

    pub fn pending_convoy_responses(&self) -> usize {
        self.queues.lock().unwrap().convoys.len()
    }

    pub fn pending_station_responses(&self) -> usize {
        self.queues.lock().unwrap().station_assets.len()
    }
}

fn exhausted<T>() -> Result<T, FeedError> {
    Err(FeedError::Transient("scripted feed exhausted".to_string()))
}

impl TelemetryFeed for ScriptedFeed {
    fn fetch_convoy(&self, _id: i64) -> Result<Convoy, FeedError> {
        let entry = self.queues.lock().unwrap().convoys.pop_front();
        match entry {
            Some((result, delay)) => {
                if let Some(delay) = delay {
                    std::thread::sleep(delay);
                }
                result
            }
            None => exhausted(),
        }
    }

    fn fetch_checkpoints(&self) -> Result<Vec<Checkpoint>, FeedError> {
        let entry = self.queues.lock().unwrap().checkpoints.pop_front();
        match entry {
            Some((result, delay)) => {
                if let Some(delay) = delay {
                    std::thread::sleep(delay);
                }
                result
            }
            None => exhausted(),
        }
    }

    fn fetch_routes(&self) -> Result<Vec<Route>, FeedError> {
        Ok(Vec::new())
    }

    fn fetch_assets(&self, _station_id: Option<i64>) -> Result<Vec<Asset>, FeedError> {
        let entry = self.queues.lock().unwrap().station_assets.pop_front();
        match entry {
            Some((result, delay)) => {
                if let Some(delay) = delay {
                    std::thread::sleep(delay);
                }
                result
            }
            None => exhausted(),
        }
    }
}
