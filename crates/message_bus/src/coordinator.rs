//! The bus coordinator: single coarse mutex over the log and both registries.

use crate::config::BusConfig;
use crate::egress;
use crate::ingress;
use crate::log::MessageLog;
use crate::reaper;
use crate::record::MessageRecord;
use crate::registry::{ConsumerEntry, ProducerEntry};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::info;

/// Shared state guarded by the bus's single coarse mutex (spec §5, §9).
pub(crate) struct BusState {
    pub(crate) log: MessageLog,
    pub(crate) producers: HashMap<String, ProducerEntry>,
    pub(crate) consumers: HashMap<String, ConsumerEntry>,
    pub(crate) reclaimed: u64,
}

impl BusState {
    fn new() -> Self {
        Self {
            log: MessageLog::new(),
            producers: HashMap::new(),
            consumers: HashMap::new(),
            reclaimed: 0,
        }
    }
}

/// Handle to a running bus: registration API plus lifecycle control.
///
/// Cloning shares the same underlying coordinator (log, registries, and
/// the three pump tasks spawned by [`BusCoordinator::spawn`]).
pub struct BusCoordinator {
    state: Arc<Mutex<BusState>>,
    config: BusConfig,
    shutdown_tx: watch::Sender<bool>,
}

impl Clone for BusCoordinator {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: self.config.clone(),
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }
}

/// Join handles for the three pump tasks, returned by [`BusCoordinator::spawn`].
pub struct BusTasks {
    pub ingress: JoinHandle<()>,
    pub egress: JoinHandle<()>,
    pub reaper: JoinHandle<()>,
}

impl BusCoordinator {
    /// Creates a new, un-started bus coordinator.
    pub fn new(config: BusConfig) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            state: Arc::new(Mutex::new(BusState::new())),
            config,
            shutdown_tx,
        }
    }

    /// Spawns the ingress, egress, and reaper pump tasks.
    pub fn spawn(&self) -> BusTasks {
        let shutdown_rx = self.shutdown_tx.subscribe();
        let ingress = tokio::spawn(ingress::run(
            Arc::clone(&self.state),
            self.config.clone(),
            shutdown_rx.clone(),
        ));
        let egress = tokio::spawn(egress::run(
            Arc::clone(&self.state),
            self.config.clone(),
            shutdown_rx.clone(),
        ));
        let reaper = tokio::spawn(reaper::run(
            Arc::clone(&self.state),
            self.config.clone(),
            shutdown_rx,
        ));
        BusTasks {
            ingress,
            egress,
            reaper,
        }
    }

    /// Signals all pump tasks to stop after their current cycle.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Registers a new producer, returning the channel it should send
    /// records on. Returns `None` if `id` is already registered.
    pub async fn register_producer(&self, id: impl Into<String>) -> Option<mpsc::Sender<MessageRecord>> {
        let id = id.into();
        let mut state = self.state.lock().await;
        if state.producers.contains_key(&id) {
            tracing::warn!(producer = %id, "producer already registered");
            return None;
        }
        // Unbounded: the original Go channel has no capacity limit either
        // (`mch chan MsgNode` in `InMemProducer`); ingress polls it non-blocking.
        let (tx, rx) = mpsc::channel(1024);
        state
            .producers
            .insert(id.clone(), ProducerEntry { rx, received: 0 });
        info!(producer = %id, "producer registration successful");
        Some(tx)
    }

    /// Unregisters a producer. A no-op if `id` is not registered.
    pub async fn unregister_producer(&self, id: &str) {
        let mut state = self.state.lock().await;
        if state.producers.remove(id).is_some() {
            info!(producer = %id, "producer unregistration successful");
        }
    }

    /// Registers a new consumer, returning the channel it should receive
    /// records from. Returns `None` if `id` is already registered.
    pub async fn register_consumer(&self, id: impl Into<String>) -> Option<mpsc::Receiver<MessageRecord>> {
        let id = id.into();
        let mut state = self.state.lock().await;
        if state.consumers.contains_key(&id) {
            tracing::warn!(consumer = %id, "consumer already registered");
            return None;
        }
        let (tx, rx) = mpsc::channel(self.config.consumer_channel_capacity);
        state.consumers.insert(
            id.clone(),
            ConsumerEntry {
                tx,
                cursor: None,
                delivered: 0,
            },
        );
        info!(consumer = %id, "consumer registration successful");
        Some(rx)
    }

    /// Unregisters a consumer, closing its outbound channel. A no-op if
    /// `id` is not registered.
    pub async fn unregister_consumer(&self, id: &str) {
        let mut state = self.state.lock().await;
        if state.consumers.remove(id).is_some() {
            info!(consumer = %id, "consumer unregistration successful");
        }
    }

    /// Logs the bus's current status (`PrintStats` in the original).
    pub async fn print_stats(&self) {
        let state = self.state.lock().await;
        info!(
            total = state.log.seqid(),
            current = state.log.currcnt(),
            reclaimed = state.reclaimed,
            consumers = state.consumers.len(),
            producers = state.producers.len(),
            "bus status",
        );
    }

    /// Total records ever appended.
    pub async fn seqid(&self) -> u64 {
        self.state.lock().await.log.seqid()
    }

    /// Records currently live in the log.
    pub async fn currcnt(&self) -> u64 {
        self.state.lock().await.log.currcnt()
    }

    /// Records reclaimed by the reaper so far.
    pub async fn reclaimed(&self) -> u64 {
        self.state.lock().await.reclaimed
    }
}
