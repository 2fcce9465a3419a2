//! Background persistence with one save in flight and one pending.
//!
//! Every committed snapshot is submitted here. While a save is running, a
//! newer submission replaces the pending snapshot instead of queueing behind
//! it, so at most two snapshots are ever held and the last one submitted is
//! the last one written. Save failures are logged by the worker and never
//! reach the submitter.

use crate::storage::{save_state, BlobStore};
use crate::{AppState, Result};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

#[derive(Default)]
struct Slot {
    pending: Option<AppState>,
    in_flight: bool,
    shutdown: bool,
    attempts: u64,
}

#[derive(Default)]
struct Shared {
    slot: Mutex<Slot>,
    changed: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, Slot>) -> MutexGuard<'a, Slot> {
        self.changed
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to the background save worker
///
/// Dropping the queue writes any pending snapshot, then stops the worker.
pub struct SaveQueue {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl SaveQueue {
    /// Start a worker that saves into `store`
    pub fn spawn<S>(store: Arc<S>) -> Result<Self>
    where
        S: BlobStore + 'static,
    {
        let shared = Arc::new(Shared::default());
        let worker_shared = Arc::clone(&shared);

        let worker = thread::Builder::new()
            .name("state-saver".into())
            .spawn(move || run_worker(store, worker_shared))?;

        tracing::debug!("Started save worker");
        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Queue `state` for saving, replacing any snapshot not yet started
    pub fn submit(&self, state: AppState) {
        let mut slot = self.shared.lock();
        if slot.pending.replace(state).is_some() {
            tracing::debug!("Replaced pending snapshot with a newer one");
        }
        drop(slot);
        self.shared.changed.notify_all();
    }

    /// Block until nothing is pending or in flight
    pub fn flush(&self) {
        let mut slot = self.shared.lock();
        while slot.pending.is_some() || slot.in_flight {
            slot = self.shared.wait(slot);
        }
    }

    /// Number of saves the worker has finished, successful or not
    pub fn attempts(&self) -> u64 {
        self.shared.lock().attempts
    }
}

impl Drop for SaveQueue {
    fn drop(&mut self) {
        self.shared.lock().shutdown = true;
        self.shared.changed.notify_all();

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("Save worker panicked");
            }
        }
    }
}

fn run_worker<S: BlobStore>(store: Arc<S>, shared: Arc<Shared>) {
    loop {
        let state = {
            let mut slot = shared.lock();
            loop {
                if let Some(state) = slot.pending.take() {
                    slot.in_flight = true;
                    break state;
                }
                if slot.shutdown {
                    tracing::debug!("Save worker stopping");
                    return;
                }
                slot = shared.wait(slot);
            }
        };

        save_state(&*store, &state);

        {
            let mut slot = shared.lock();
            slot.in_flight = false;
            slot.attempts += 1;
        }
        shared.changed.notify_all();
    }
}
