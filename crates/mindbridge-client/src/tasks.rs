//! Holders for spawned deferred effects.

use std::future::Future;
use std::sync::Mutex;

use tokio::task::JoinHandle;

use crate::state::lock;

/// At most one live task. Spawning into the slot aborts the previous
/// occupant, as does dropping the slot.
#[derive(Default)]
pub struct TaskSlot {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        if let Some(previous) = lock(&self.handle).replace(handle) {
            previous.abort();
        }
    }

    /// Abort the current task. Returns `true` if one was still running.
    pub fn cancel(&self) -> bool {
        match lock(&self.handle).take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        lock(&self.handle)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.handle).take() {
            handle.abort();
        }
    }
}

/// Independent tasks that must all run to completion unless cancelled
/// together.
#[derive(Default)]
pub struct TaskSet {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskSet {
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut handles = lock(&self.handles);
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    pub fn cancel_all(&self) {
        for handle in lock(&self.handles).drain(..) {
            handle.abort();
        }
    }

    pub fn pending(&self) -> usize {
        lock(&self.handles)
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }
}

impl Drop for TaskSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_slot_replaces_previous_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let slot = TaskSlot::new();

        for _ in 0..3 {
            let fired = fired.clone();
            slot.spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_cancel() {
        let fired = Arc::new(AtomicUsize::new(0));
        let slot = TaskSlot::new();
        let f = fired.clone();
        slot.spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            f.fetch_add(1, Ordering::SeqCst);
        });
        tokio::task::yield_now().await;
        assert!(slot.is_active());
        assert!(slot.cancel());
        assert!(!slot.cancel());
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_runs_every_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let set = TaskSet::default();
        for delay in [1, 2] {
            let f = fired.clone();
            set.spawn(async move {
                tokio::time::sleep(Duration::from_secs(delay)).await;
                f.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(set.pending(), 2);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert_eq!(set.pending(), 0);
    }
}
