//! # Toast Driver
//!
//! Runs a [`ToastQueue`] on the tokio clock.
//!
//! ## Timer Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Task per Toast                                │
//! │                                                                         │
//! │  spawn() ──► queue.spawn(now) ──► tokio::spawn(run_toast(id))          │
//! │                                          │                              │
//! │                    ┌─────────────────────┘                              │
//! │                    ▼                                                    │
//! │          ┌───────────────────────┐                                      │
//! │          │ next_transition(id)?  │── None ──► task exits               │
//! │          └──────────┬────────────┘                                      │
//! │                     │ Some(at)                                          │
//! │                     ▼                                                   │
//! │          sleep_until(at) ──► queue.tick(now) ──► loop                  │
//! │                                                                         │
//! │  Each JoinHandle lives in a ToastTimer. Dropping the timer aborts the  │
//! │  task, so dropping the driver (screen teardown) stops every pending    │
//! │  timer before it can touch the queue again.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The clock is `tokio::time::Instant`, converted to `std` for the core
//! queue, so paused-time tests drive the whole lifecycle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{ToastFrame, ToastId, ToastQueue, ToastTimings};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

/// Text every toast shows.
pub const ADDED_TO_CART: &str = "Added to cart!";

type SharedQueue = Arc<Mutex<ToastQueue>>;

fn lock(queue: &Mutex<ToastQueue>) -> MutexGuard<'_, ToastQueue> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns one toast's timer task; aborts it on drop.
#[derive(Debug)]
pub struct ToastTimer {
    id: ToastId,
    handle: JoinHandle<()>,
}

impl ToastTimer {
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ToastTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A screen's toast queue plus the timers advancing it.
///
/// Must be used from inside a tokio runtime.
#[derive(Debug)]
pub struct ToastDriver {
    queue: SharedQueue,
    timers: Vec<ToastTimer>,
}

impl ToastDriver {
    pub fn new(timings: ToastTimings) -> Self {
        ToastDriver {
            queue: Arc::new(Mutex::new(ToastQueue::new(timings))),
            timers: Vec::new(),
        }
    }

    /// Starts a new toast now and schedules its transitions.
    pub fn spawn(&mut self) -> ToastId {
        self.timers.retain(|timer| !timer.is_finished());

        let now = Instant::now().into_std();
        let id = lock(&self.queue).spawn(now);
        let handle = tokio::spawn(run_toast(Arc::clone(&self.queue), id));

        debug!(%id, pending = self.timers.len() + 1, "toast spawned");
        self.timers.push(ToastTimer { id, handle });
        id
    }

    /// Render values for every toast on screen right now.
    pub fn frames(&self) -> Vec<ToastFrame> {
        lock(&self.queue).frames(Instant::now().into_std())
    }

    /// Number of toasts still in the queue.
    pub fn active(&self) -> usize {
        lock(&self.queue).len()
    }

    /// Timers whose task has not finished yet.
    pub fn pending_timers(&self) -> usize {
        self.timers.iter().filter(|timer| !timer.is_finished()).count()
    }

    #[cfg(test)]
    fn shared_queue(&self) -> SharedQueue {
        Arc::clone(&self.queue)
    }
}

/// Sleeps to each of `id`'s phase boundaries until it leaves the queue.
async fn run_toast(queue: SharedQueue, id: ToastId) {
    loop {
        let next = lock(&queue).next_transition(id);
        let Some(at) = next else {
            break;
        };

        sleep_until(Instant::from_std(at)).await;

        let removed = lock(&queue).tick(Instant::now().into_std());
        if !removed.is_empty() {
            trace!(?removed, "toasts removed");
        }
    }
    trace!(%id, "toast timer finished");
}
