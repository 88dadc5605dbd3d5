//! Hub — broadcast of changed identifiers.
//!
//! Writers call [`ChangeNotifier::notify_change`] after mutating the table.
//! The provider calls [`ChangeNotifier::register`] for every identifier it
//! hands a cursor out for. Observers hold a [`ChangeSubscription`] on one
//! identifier and wake up when a related identifier changes.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::uri::ContentUri;

#[cfg_attr(test, mockall::automock)]
pub trait ChangeNotifier: Send + Sync {
    /// Record that a cursor for `uri` is being observed.
    fn register(&self, uri: &ContentUri);

    /// Announce that data under `uri` changed.
    fn notify_change(&self, uri: &ContentUri);
}

/// Distinct identifiers whose registrations are counted individually.
pub const DEFAULT_REGISTRATION_LIMIT: usize = 1024;

#[derive(Default)]
struct Registrations {
    counts: HashMap<String, usize>,
    /// Registrations for identifiers that arrived after the map was full.
    untracked: usize,
}

pub struct NotificationHub {
    sender: broadcast::Sender<ContentUri>,
    registrations: Mutex<Registrations>,
    registration_limit: usize,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        Self::with_registration_limit(capacity, DEFAULT_REGISTRATION_LIMIT)
    }

    /// At most `limit` distinct identifiers get their own count; any
    /// further identifier only bumps [`untracked_registrations`](Self::untracked_registrations).
    pub fn with_registration_limit(capacity: usize, limit: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            registrations: Mutex::new(Registrations::default()),
            registration_limit: limit,
        }
    }

    /// Watch `uri`. With `notify_for_descendants`, changes to identifiers
    /// below it are delivered too.
    pub fn subscribe(&self, uri: ContentUri, notify_for_descendants: bool) -> ChangeSubscription {
        ChangeSubscription {
            uri,
            notify_for_descendants,
            receiver: self.sender.subscribe(),
        }
    }

    /// How many cursors were handed out for `uri`.
    pub fn registrations(&self, uri: &ContentUri) -> usize {
        self.registrations
            .lock()
            .counts
            .get(uri.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn tracked_uris(&self) -> usize {
        self.registrations.lock().counts.len()
    }

    pub fn untracked_registrations(&self) -> usize {
        self.registrations.lock().untracked
    }

    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ChangeNotifier for NotificationHub {
    fn register(&self, uri: &ContentUri) {
        let mut registrations = self.registrations.lock();
        if let Some(count) = registrations.counts.get_mut(uri.as_str()) {
            *count += 1;
        } else if registrations.counts.len() < self.registration_limit {
            registrations.counts.insert(uri.as_str().to_string(), 1);
        } else {
            registrations.untracked += 1;
            debug!(%uri, "registration map full, not tracking identifier");
        }
    }

    fn notify_change(&self, uri: &ContentUri) {
        // An error only means nobody is subscribed right now.
        match self.sender.send(uri.clone()) {
            Ok(observers) => debug!(%uri, observers, "change notified"),
            Err(_) => debug!(%uri, "change notified with no observers"),
        }
    }
}

pub struct ChangeSubscription {
    uri: ContentUri,
    notify_for_descendants: bool,
    receiver: broadcast::Receiver<ContentUri>,
}

impl ChangeSubscription {
    pub fn uri(&self) -> &ContentUri {
        &self.uri
    }

    fn concerns(&self, changed: &ContentUri) -> bool {
        changed.authority() == self.uri.authority()
            && (changed.path_segments() == self.uri.path_segments()
                || changed.is_ancestor_of(&self.uri)
                || (self.notify_for_descendants && self.uri.is_ancestor_of(changed)))
    }

    /// Wait for the next change relevant to this subscription. Returns
    /// `None` once the hub is gone.
    pub async fn changed(&mut self) -> Option<ContentUri> {
        loop {
            match self.receiver.recv().await {
                Ok(changed) if self.concerns(&changed) => return Some(changed),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(uri = %self.uri, skipped, "observer lagged behind change notifications");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`changed`](Self::changed).
    pub fn try_changed(&mut self) -> Option<ContentUri> {
        loop {
            match self.receiver.try_recv() {
                Ok(changed) if self.concerns(&changed) => return Some(changed),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn logs() -> ContentUri {
        ContentUri::parse("content://com.example.android.hilt.provider/logs").unwrap()
    }

    #[test]
    fn test_register_counts_per_uri() {
        let hub = NotificationHub::new(8);
        let item = logs().with_appended_id(1);
        hub.register(&logs());
        hub.register(&logs());
        hub.register(&item);

        assert_eq!(hub.registrations(&logs()), 2);
        assert_eq!(hub.registrations(&item), 1);
        assert_eq!(hub.registrations(&logs().with_appended_id(2)), 0);
    }

    #[test]
    fn test_registrations_stop_growing_at_limit() {
        let hub = NotificationHub::with_registration_limit(8, 2);
        for id in 0..100 {
            hub.register(&logs().with_appended_id(id));
        }
        assert_eq!(hub.tracked_uris(), 2);
        assert_eq!(hub.untracked_registrations(), 98);

        // Already tracked identifiers keep counting.
        hub.register(&logs().with_appended_id(0));
        assert_eq!(hub.registrations(&logs().with_appended_id(0)), 2);
        assert_eq!(hub.registrations(&logs().with_appended_id(50)), 0);
        assert_eq!(hub.tracked_uris(), 2);
    }

    #[test]
    fn test_notify_without_observers_is_harmless() {
        let hub = NotificationHub::new(8);
        hub.notify_change(&logs());
        assert_eq!(hub.observer_count(), 0);
    }

    #[tokio::test]
    async fn test_exact_uri_is_delivered() {
        let hub = NotificationHub::new(8);
        let mut sub = hub.subscribe(logs(), false);
        hub.notify_change(&logs());

        let changed = tokio::time::timeout(Duration::from_secs(1), sub.changed())
            .await
            .unwrap();
        assert_eq!(changed, Some(logs()));
    }

    #[tokio::test]
    async fn test_collection_change_reaches_item_observer() {
        let hub = NotificationHub::new(8);
        let item = logs().with_appended_id(4);
        let mut sub = hub.subscribe(item, false);
        hub.notify_change(&logs());

        assert_eq!(sub.changed().await, Some(logs()));
    }

    #[test]
    fn test_descendants_only_when_requested() {
        let hub = NotificationHub::new(8);
        let item = logs().with_appended_id(4);
        let mut plain = hub.subscribe(logs(), false);
        let mut deep = hub.subscribe(logs(), true);

        hub.notify_change(&item);

        assert_eq!(plain.try_changed(), None);
        assert_eq!(deep.try_changed(), Some(item));
    }

    #[test]
    fn test_other_authority_is_ignored() {
        let hub = NotificationHub::new(8);
        let mut sub = hub.subscribe(logs(), true);
        hub.notify_change(&ContentUri::parse("content://other.provider/logs").unwrap());
        assert_eq!(sub.try_changed(), None);
    }

    #[test]
    fn test_lagged_observer_keeps_listening() {
        let hub = NotificationHub::new(2);
        let mut sub = hub.subscribe(logs(), false);
        for _ in 0..5 {
            hub.notify_change(&logs());
        }
        assert_eq!(sub.try_changed(), Some(logs()));
    }

    #[tokio::test]
    async fn test_subscription_ends_when_hub_dropped() {
        let hub = NotificationHub::new(8);
        let mut sub = hub.subscribe(logs(), false);
        drop(hub);
        assert_eq!(sub.changed().await, None);
    }
}
