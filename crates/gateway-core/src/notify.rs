//! Deferred auth-change notification queue
//!
//! Listener callbacks must never run inside the call that triggered them; the
//! real client delivers auth events on a later turn, and UI code is written
//! against that. All notifications here go through one queue drained by a
//! dedicated dispatcher task, which gives two guarantees:
//!
//! - A notification enqueued by `sign_in`/`sign_out` is delivered strictly
//!   after the triggering call has returned to its caller.
//! - Notifications are delivered in enqueue order, to listeners in
//!   registration order.
//!
//! The listener snapshot is taken at delivery time, so a listener that
//! unsubscribes before its queued notification is dispatched is not called.

use crate::auth::{AuthListener, AuthSubscription};
use crate::types::{AuthEvent, Session};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug)]
enum Notification {
    /// Deliver to every registered listener
    Broadcast(AuthEvent, Option<Session>),
    /// Replay current state to one late subscriber
    Replay(u64, AuthEvent, Option<Session>),
}

#[derive(Default)]
struct Registry {
    listeners: Mutex<Vec<(u64, AuthListener)>>,
    next_id: AtomicU64,
}

impl Registry {
    fn add(&self, listener: AuthListener) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, listener));
        id
    }

    fn remove(&self, id: u64) {
        self.listeners.lock().retain(|(entry_id, _)| *entry_id != id);
    }

    fn snapshot(&self) -> Vec<(u64, AuthListener)> {
        self.listeners.lock().clone()
    }

    fn len(&self) -> usize {
        self.listeners.lock().len()
    }
}

/// Listener registry plus the dispatcher feeding it.
///
/// Must be created inside a tokio runtime; the dispatcher task ends when the
/// notifier is dropped.
pub struct AuthNotifier {
    registry: Arc<Registry>,
    tx: mpsc::UnboundedSender<Notification>,
}

impl AuthNotifier {
    /// Create the notifier and spawn its dispatcher task
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(Registry::default());
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(dispatch_task(Arc::clone(&registry), rx));
        Self { registry, tx }
    }

    /// Register `listener`; the subscription removes it again. If `current`
    /// is a live session, it is replayed to this listener alone on a later
    /// turn.
    pub fn subscribe(&self, listener: AuthListener, current: Option<Session>) -> AuthSubscription {
        let id = self.registry.add(listener);
        if let Some(session) = current {
            // Late subscriber: converge on current state without waiting for
            // the next real event.
            let _ = self
                .tx
                .send(Notification::Replay(id, AuthEvent::SignedIn, Some(session)));
        }
        let registry = Arc::clone(&self.registry);
        AuthSubscription::new(move || registry.remove(id))
    }

    /// Queue `event` for every registered listener. Returns immediately;
    /// delivery happens on the dispatcher task.
    pub fn broadcast(&self, event: AuthEvent, session: Option<Session>) {
        tracing::debug!(event = %event, "queueing auth notification");
        let _ = self.tx.send(Notification::Broadcast(event, session));
    }

    /// How many listeners are currently registered
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }
}

impl Default for AuthNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AuthNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthNotifier")
            .field("listeners", &self.registry.len())
            .finish()
    }
}

async fn dispatch_task(registry: Arc<Registry>, mut rx: mpsc::UnboundedReceiver<Notification>) {
    while let Some(notification) = rx.recv().await {
        match notification {
            Notification::Broadcast(event, session) => {
                for (_, listener) in registry.snapshot() {
                    listener(event, session.clone());
                }
            }
            Notification::Replay(id, event, session) => {
                let target = registry
                    .snapshot()
                    .into_iter()
                    .find(|(entry_id, _)| *entry_id == id);
                if let Some((_, listener)) = target {
                    listener(event, session);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;
    use std::sync::atomic::AtomicUsize;

    fn counting_listener(calls: &Arc<AtomicUsize>) -> AuthListener {
        let calls = Arc::clone(calls);
        Arc::new(move |_, _| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn session() -> Session {
        Session::new("tok", "refresh", User::new("u1", "a@b.c"))
    }

    #[tokio::test]
    async fn broadcast_is_deferred() {
        let notifier = AuthNotifier::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let _sub = notifier.subscribe(counting_listener(&calls), None);

        notifier.broadcast(AuthEvent::SignedIn, Some(session()));
        // Not yet delivered: the dispatcher has not had a turn.
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn late_subscriber_gets_replay() {
        let notifier = AuthNotifier::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let _sub = notifier.subscribe(counting_listener(&calls), Some(session()));

        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unsubscribe_before_delivery_suppresses_call() {
        let notifier = AuthNotifier::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let sub = notifier.subscribe(counting_listener(&calls), None);

        notifier.broadcast(AuthEvent::SignedOut, None);
        sub.unsubscribe();

        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[tokio::test]
    async fn delivery_in_registration_order() {
        let notifier = AuthNotifier::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let order = Arc::clone(&order);
            // Dropping the handle does not unsubscribe; removal is explicit.
            let _sub = notifier.subscribe(Arc::new(move |_, _| order.lock().push(tag)), None);
        }

        notifier.broadcast(AuthEvent::SignedIn, None);
        tokio::task::yield_now().await;

        assert_eq!(*order.lock(), vec!["first", "second"]);
    }
}
