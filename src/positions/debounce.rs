//! Debounced write-back of dragged node positions
//!
//! Dropping a node schedules a save after a fixed delay. Another drop of the
//! same node before the delay elapses cancels the pending save and starts the
//! timer again, so a burst of moves produces a single write carrying the last
//! coordinates. Writes of different nodes are independent and unordered.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::model::NodePosition;
use crate::notify::{self, Notification, NotificationSender};

use super::PositionStore;

/// Delay between the last drop of a node and its write
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct Schedule {
    /// Generation of the write still waiting on its timer, per component
    waiting: HashMap<String, u64>,
    /// Every spawned write task that has not finished yet
    tasks: HashMap<u64, JoinHandle<()>>,
}

/// Saves node positions for one (view, user) pair with per-node debouncing
///
/// Must be used from within a tokio runtime. Dropping the writer cancels every
/// write still waiting on its timer; writes already sent to the store run to
/// completion.
pub struct DebouncedPositionWriter<S: PositionStore + ?Sized> {
    store: Arc<S>,
    view_type: String,
    user_id: String,
    delay: Duration,
    notifier: Option<NotificationSender>,
    schedule: Arc<Mutex<Schedule>>,
    next_generation: AtomicU64,
}

impl<S: PositionStore + ?Sized> DebouncedPositionWriter<S> {
    pub fn new(store: Arc<S>, view_type: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            store,
            view_type: view_type.into(),
            user_id: user_id.into(),
            delay: DEFAULT_SAVE_DELAY,
            notifier: None,
            schedule: Arc::new(Mutex::new(Schedule::default())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Set the debounce delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Report save failures on a notification channel
    pub fn with_notifier(mut self, notifier: NotificationSender) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Schedule a save of `component_id` at (x, y)
    ///
    /// Returns immediately. Any write of the same component still waiting on
    /// its timer is cancelled and replaced by this one.
    pub fn save_position(&self, component_id: &str, x: f64, y: f64) {
        let position = NodePosition {
            component_id: component_id.to_string(),
            view_type: self.view_type.clone(),
            user_id: self.user_id.clone(),
            x_position: x,
            y_position: y,
        };
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let mut schedule = self.schedule.lock();
        if let Some(previous) = schedule.waiting.insert(component_id.to_string(), generation) {
            if let Some(handle) = schedule.tasks.remove(&previous) {
                handle.abort();
            }
            log::trace!(component = component_id; "debounce timer reset");
        }

        let handle = tokio::spawn(write_after_delay(
            Arc::clone(&self.store),
            Arc::clone(&self.schedule),
            self.notifier.clone(),
            self.delay,
            generation,
            position,
        ));
        schedule.tasks.insert(generation, handle);
    }

    /// Number of writes still waiting on their timer
    pub fn pending_count(&self) -> usize {
        self.schedule.lock().waiting.len()
    }

    /// Whether a write of `component_id` is waiting on its timer
    pub fn is_pending(&self, component_id: &str) -> bool {
        self.schedule.lock().waiting.contains_key(component_id)
    }

    /// Wait until every scheduled write has been issued and finished
    pub async fn settle(&self) {
        loop {
            let handles: Vec<JoinHandle<()>> = {
                let mut schedule = self.schedule.lock();
                schedule.tasks.drain().map(|(_, handle)| handle).collect()
            };
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    if e.is_panic() {
                        log::error!("position save task panicked");
                    }
                }
            }
        }
    }

    /// Cancel every write still waiting on its timer
    pub fn cancel_all(&self) {
        let mut schedule = self.schedule.lock();
        let waiting: Vec<u64> = schedule.waiting.drain().map(|(_, generation)| generation).collect();
        for generation in waiting {
            if let Some(handle) = schedule.tasks.remove(&generation) {
                handle.abort();
            }
        }
    }
}

impl<S: PositionStore + ?Sized> Drop for DebouncedPositionWriter<S> {
    fn drop(&mut self) {
        let pending = self.pending_count();
        if pending > 0 {
            log::debug!(pending; "discarding unsaved node positions");
        }
        self.cancel_all();
    }
}

async fn write_after_delay<S: PositionStore + ?Sized>(
    store: Arc<S>,
    schedule: Arc<Mutex<Schedule>>,
    notifier: Option<NotificationSender>,
    delay: Duration,
    generation: u64,
    position: NodePosition,
) {
    tokio::time::sleep(delay).await;

    // Claim the write; a superseded or cancelled generation is dropped here
    let claimed = {
        let mut schedule = schedule.lock();
        let current = schedule.waiting.get(&position.component_id) == Some(&generation);
        if current {
            schedule.waiting.remove(&position.component_id);
        }
        current
    };
    if !claimed {
        return;
    }

    let component = position.component_id.clone();
    match store.upsert(position).await {
        Ok(()) => log::debug!(component = component.as_str(); "node position saved"),
        Err(e) => {
            log::warn!(component = component.as_str(), error:% = e; "failed to save node position");
            notify::emit(
                &notifier,
                Notification::error("Failed to save position", e.to_string()),
            );
        }
    }

    schedule.lock().tasks.remove(&generation);
}
