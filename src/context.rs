//! Single-slot store for the application's active snapshot.
//!
//! The core operations are stateless and take a `FileTree` explicitly. Applications that
//! track "the current document" keep it here: replacement is atomic at the reference level
//! (last writer wins) and subscribers hear about every replacement.

use crate::block::FileTree;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::sync::Arc;

type Subscriber = Box<dyn Fn(Option<&Arc<FileTree>>) + Send + Sync>;

/// Handle returned by [`ActiveTree::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

#[derive(Default)]
/// Holds at most one active `FileTree` and notifies subscribers when it changes.
pub struct ActiveTree {
    current: ArcSwapOption<FileTree>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_id: Mutex<u64>,
}

impl ActiveTree {
    #[must_use]
    /// Empty slot with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// The active snapshot, if any. Readers keep their `Arc` even after a replacement.
    pub fn current(&self) -> Option<Arc<FileTree>> {
        self.current.load_full()
    }

    /// Install `tree` as the active snapshot (or clear it with `None`) and notify.
    pub fn replace(&self, tree: Option<FileTree>) {
        let tree = tree.map(Arc::new);
        self.current.store(tree.clone());
        tracing::debug!(
            snapshot = ?tree.as_ref().map(|t| t.snapshot()),
            "Active tree replaced"
        );
        for (_, subscriber) in self.subscribers.lock().iter() {
            subscriber(tree.as_ref());
        }
    }

    /// Drop the active snapshot, e.g. when the document closes or no parser is available.
    pub fn clear(&self) {
        self.replace(None);
    }

    #[must_use]
    /// Call `subscriber` after every replacement, with the new tree or `None`.
    pub fn subscribe(
        &self,
        subscriber: impl Fn(Option<&Arc<FileTree>>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            SubscriptionId(*next)
        };
        self.subscribers.lock().push((id, Box::new(subscriber)));
        id
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }
}

#[cfg(test)]
#[path = "tests/context.rs"]
mod tests;
