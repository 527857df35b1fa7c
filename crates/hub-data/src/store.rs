//! Entity caches fed by the gateway.
//!
//! Each collection is an `Arc` snapshot replaced wholesale on refresh.
//! Readers clone the `Arc` and never observe a partial update.
//!
//! Refreshes are not deduplicated. Every request takes a ticket when it is
//! issued, and a result is dropped if a later-issued request already landed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use futures_util::future::join_all;
use gamepal_hub_settings::{Notification, NotificationQueue};
use gamepal_protocol::{
    AppEvent, DataKind, EventMessage, InstalledGameMap, LocalModMap, ModLoaderMap, OwnedGameMap,
    RemoteModMap,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::DataError;
use crate::gateway::{CommandGateway, GatewayCommand, GatewayFuture};

/// Called with the kind whose snapshot was just replaced.
pub type ChangeHandler = Arc<dyn Fn(DataKind) + Send + Sync>;

/// Handle returned by [`DataStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of a single refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A request issued later had already been applied.
    Superseded,
}

struct Slot<T> {
    value: Option<Arc<T>>,
    ticket: u64,
}

struct Cache<T> {
    slot: RwLock<Slot<T>>,
}

impl<T> Cache<T> {
    fn new() -> Self {
        Self {
            slot: RwLock::new(Slot {
                value: None,
                ticket: 0,
            }),
        }
    }

    fn snapshot(&self) -> Option<Arc<T>> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.value.clone()
    }

    /// Stores `value` unless a newer ticket is already in place.
    fn apply(&self, ticket: u64, value: T) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if ticket <= slot.ticket {
            return false;
        }
        slot.ticket = ticket;
        slot.value = Some(Arc::new(value));
        true
    }
}

/// Owner of every entity cache.
///
/// Construct once and share through `Arc`.
pub struct DataStore {
    gateway: Arc<dyn CommandGateway>,
    notifications: Mutex<NotificationQueue>,
    installed_games: Cache<InstalledGameMap>,
    owned_games: Cache<OwnedGameMap>,
    mod_loaders: Cache<ModLoaderMap>,
    local_mods: Cache<LocalModMap>,
    remote_mods: Cache<RemoteModMap>,
    next_ticket: AtomicU64,
    subscribers: Mutex<HashMap<SubscriptionId, (DataKind, ChangeHandler)>>,
    next_subscription: AtomicU64,
}

impl DataStore {
    pub fn new(gateway: Arc<dyn CommandGateway>) -> Self {
        Self {
            gateway,
            notifications: Mutex::new(NotificationQueue::new()),
            installed_games: Cache::new(),
            owned_games: Cache::new(),
            mod_loaders: Cache::new(),
            local_mods: Cache::new(),
            remote_mods: Cache::new(),
            next_ticket: AtomicU64::new(0),
            subscribers: Mutex::new(HashMap::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    pub fn gateway(&self) -> &Arc<dyn CommandGateway> {
        &self.gateway
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Current snapshot, `None` until the first successful fetch.
    pub fn installed_games(&self) -> Option<Arc<InstalledGameMap>> {
        self.installed_games.snapshot()
    }

    pub fn owned_games(&self) -> Option<Arc<OwnedGameMap>> {
        self.owned_games.snapshot()
    }

    pub fn mod_loaders(&self) -> Option<Arc<ModLoaderMap>> {
        self.mod_loaders.snapshot()
    }

    pub fn local_mods(&self) -> Option<Arc<LocalModMap>> {
        self.local_mods.snapshot()
    }

    pub fn remote_mods(&self) -> Option<Arc<RemoteModMap>> {
        self.remote_mods.snapshot()
    }

    /// Whether `kind` has been fetched at least once.
    pub fn is_loaded(&self, kind: DataKind) -> bool {
        match kind {
            DataKind::InstalledGames => self.installed_games.snapshot().is_some(),
            DataKind::OwnedGames => self.owned_games.snapshot().is_some(),
            DataKind::ModLoaders => self.mod_loaders.snapshot().is_some(),
            DataKind::LocalMods => self.local_mods.snapshot().is_some(),
            DataKind::RemoteMods => self.remote_mods.snapshot().is_some(),
        }
    }

    // -----------------------------------------------------------------------
    // Load on first access
    // -----------------------------------------------------------------------

    /// Snapshot of installed games, fetching it first if never loaded.
    /// Falls back to an empty map when the fetch fails.
    pub async fn load_installed_games(&self) -> Arc<InstalledGameMap> {
        self.ensure_loaded(DataKind::InstalledGames).await;
        self.installed_games().unwrap_or_default()
    }

    pub async fn load_owned_games(&self) -> Arc<OwnedGameMap> {
        self.ensure_loaded(DataKind::OwnedGames).await;
        self.owned_games().unwrap_or_default()
    }

    pub async fn load_mod_loaders(&self) -> Arc<ModLoaderMap> {
        self.ensure_loaded(DataKind::ModLoaders).await;
        self.mod_loaders().unwrap_or_default()
    }

    pub async fn load_local_mods(&self) -> Arc<LocalModMap> {
        self.ensure_loaded(DataKind::LocalMods).await;
        self.local_mods().unwrap_or_default()
    }

    pub async fn load_remote_mods(&self) -> Arc<RemoteModMap> {
        self.ensure_loaded(DataKind::RemoteMods).await;
        self.remote_mods().unwrap_or_default()
    }

    async fn ensure_loaded(&self, kind: DataKind) {
        if !self.is_loaded(kind) {
            // Failure is already logged and reported as a notification.
            let _ = self.refresh(kind).await;
        }
    }

    // -----------------------------------------------------------------------
    // Refresh
    // -----------------------------------------------------------------------

    /// Fetches `kind` from the gateway and replaces its snapshot.
    ///
    /// On failure the previous snapshot is kept and an error notification
    /// is queued.
    pub async fn refresh(&self, kind: DataKind) -> Result<RefreshOutcome, DataError> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        match kind {
            DataKind::InstalledGames => {
                let fetch = self.gateway.fetch_installed_games();
                self.refresh_cache(kind, ticket, &self.installed_games, fetch)
                    .await
            }
            DataKind::OwnedGames => {
                let fetch = self.gateway.fetch_owned_games();
                self.refresh_cache(kind, ticket, &self.owned_games, fetch)
                    .await
            }
            DataKind::ModLoaders => {
                let fetch = self.gateway.fetch_mod_loaders();
                self.refresh_cache(kind, ticket, &self.mod_loaders, fetch)
                    .await
            }
            DataKind::LocalMods => {
                let fetch = self.gateway.fetch_local_mods();
                self.refresh_cache(kind, ticket, &self.local_mods, fetch)
                    .await
            }
            DataKind::RemoteMods => {
                let fetch = self.gateway.fetch_remote_mods();
                self.refresh_cache(kind, ticket, &self.remote_mods, fetch)
                    .await
            }
        }
    }

    /// Refreshes several kinds concurrently.
    pub async fn refresh_many(&self, kinds: &[DataKind]) {
        join_all(kinds.iter().map(|&kind| self.refresh(kind))).await;
    }

    /// Refreshes every collection concurrently.
    pub async fn refresh_all(&self) {
        self.refresh_many(&DataKind::ALL).await;
    }

    async fn refresh_cache<T>(
        &self,
        kind: DataKind,
        ticket: u64,
        cache: &Cache<T>,
        fetch: GatewayFuture<'_, T>,
    ) -> Result<RefreshOutcome, DataError> {
        match fetch.await {
            Ok(value) => {
                if cache.apply(ticket, value) {
                    debug!(kind = ?kind, ticket, "snapshot replaced");
                    self.notify_subscribers(kind);
                    Ok(RefreshOutcome::Applied)
                } else {
                    debug!(kind = ?kind, ticket, "discarding superseded fetch result");
                    Ok(RefreshOutcome::Superseded)
                }
            }
            Err(e) => {
                warn!(kind = ?kind, error = %e, "fetch failed, keeping previous snapshot");
                self.push_error(format!("Failed to load {kind}"), e.to_string());
                Err(e)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Subscriptions
    // -----------------------------------------------------------------------

    /// Calls `handler` every time the `kind` snapshot is replaced.
    pub fn subscribe(
        &self,
        kind: DataKind,
        handler: impl Fn(DataKind) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.insert(id, (kind, Arc::new(handler)));
        id
    }

    /// Removes a subscription. Returns `true` if it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.remove(&id).is_some()
    }

    fn notify_subscribers(&self, kind: DataKind) {
        let handlers: Vec<ChangeHandler> = {
            let subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subs.values()
                .filter(|(k, _)| *k == kind)
                .map(|(_, h)| h.clone())
                .collect()
        };
        for handler in handlers {
            handler(kind);
        }
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Applies one backend event: refetches what it invalidates and queues
    /// a notification for the informational ones.
    pub async fn handle_event(&self, message: &EventMessage) {
        debug!(event = ?message.event, "backend event");
        match message.event {
            AppEvent::GameAdded => {
                let name = message.payload_text().unwrap_or_default();
                self.push_info(format!("Added game {name}"));
            }
            AppEvent::GameRemoved => {
                let name = message.payload_text().unwrap_or_default();
                self.push_info(format!("Removed game {name}"));
            }
            AppEvent::Error => {
                let text = message
                    .payload_text()
                    .unwrap_or_else(|| "unknown error".into());
                warn!(error = %text, "backend reported an error");
                self.push_error("Backend error".into(), text);
            }
            _ => {}
        }
        self.refresh_many(message.event.invalidates()).await;
    }

    /// Subscribes to gateway events and applies them until `cancel` fires
    /// or the event channel closes.
    ///
    /// The subscription is taken before this returns, so no event sent
    /// afterwards is missed.
    pub fn listen(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let mut rx = self.gateway.subscribe_events();
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!("event listener cancelled");
                        break;
                    }
                    received = rx.recv() => match received {
                        Ok(message) => store.handle_event(&message).await,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "event listener lagged, refreshing everything");
                            store.refresh_all().await;
                        }
                        Err(RecvError::Closed) => {
                            info!("event channel closed");
                            break;
                        }
                    },
                }
            }
        })
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Runs a backend command. Failures are logged and queued as a
    /// notification before being returned.
    pub async fn execute(&self, command: GatewayCommand) -> Result<(), DataError> {
        let name = command.name();
        debug!(command = name, "executing backend command");
        if let Err(e) = self.gateway.execute(command).await {
            warn!(command = name, error = %e, "backend command failed");
            self.push_error(format!("Failed to {name}"), e.to_string());
            return Err(e);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Removes and returns all queued notifications.
    pub fn take_notifications(&self) -> Vec<Notification> {
        let mut queue = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        queue.drain()
    }

    /// Dismisses one notification by ID.
    pub fn dismiss_notification(&self, id: u64) -> bool {
        let mut queue = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        queue.dismiss(id)
    }

    /// Copy of the queued notifications, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        let queue = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        queue.iter().cloned().collect()
    }

    /// Queues a success notification for an outcome the caller observed.
    pub fn notify_success(&self, title: impl Into<String>) -> u64 {
        let mut queue = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        queue.success(title)
    }

    /// Queues a warning notification.
    pub fn notify_warning(&self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        let mut queue = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        queue.warning_with(title, message)
    }

    /// Whether any queued notification is an error.
    pub fn has_error_notifications(&self) -> bool {
        let queue = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        queue.has_errors()
    }

    fn push_error(&self, title: String, message: String) {
        let mut queue = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        queue.error_with(title, message);
    }

    fn push_info(&self, title: String) {
        let mut queue = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        queue.info(title);
    }
}
