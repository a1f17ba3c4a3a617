//! Matcher coordinator: owns the book, drains the inbound order channel,
//! and periodically sweeps timeouts (grounded on `matcherService` /
//! `ExecuteOrders`'s `select{}` loop).

use crate::book::OrderBook;
use crate::completion::CompletionSink;
use crate::config::MatcherConfig;
use crate::executor;
use crate::order::Order;
use crate::sweeper;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::info;

/// Handle to a running matcher: the inbound order sender plus lifecycle
/// control. Cloning shares the same book and completion sink.
#[derive(Clone)]
pub struct MatcherCoordinator {
    book: Arc<Mutex<OrderBook>>,
    orders_tx: mpsc::Sender<Order>,
    completions: CompletionSink,
    shutdown_tx: watch::Sender<bool>,
}

impl MatcherCoordinator {
    /// Builds a coordinator and spawns its processing task
    /// (`go match.ExecuteOrders()` in the original).
    pub fn spawn(config: MatcherConfig, completions: CompletionSink) -> (Self, JoinHandle<()>) {
        let (orders_tx, orders_rx) = mpsc::channel(config.order_channel_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let book = Arc::new(Mutex::new(OrderBook::new()));

        let handle = tokio::spawn(run(
            Arc::clone(&book),
            orders_rx,
            completions.clone(),
            config,
            shutdown_rx,
        ));

        (
            Self {
                book,
                orders_tx,
                completions,
                shutdown_tx,
            },
            handle,
        )
    }

    /// Submits an order for matching. Blocks if the inbound channel is
    /// at capacity, mirroring the original's unbuffered `orders` channel.
    pub async fn submit(&self, order: Order) {
        // ignore: a closed receiver means the coordinator has already
        // shut down, nothing left to deliver to.
        let _ = self.orders_tx.send(order).await;
    }

    /// Signals the processing task to stop after its current cycle.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn completions(&self) -> &CompletionSink {
        &self.completions
    }

    #[cfg(test)]
    pub(crate) async fn book_snapshot_len(&self, transaction: crate::order::Transaction, price: i64) -> usize {
        self.book.lock().await.resting_at(transaction, price).len()
    }
}

async fn run(
    book: Arc<Mutex<OrderBook>>,
    mut orders_rx: mpsc::Receiver<Order>,
    completions: CompletionSink,
    config: MatcherConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!(order_timeout_seconds = config.order_timeout_seconds, "starting to execute orders");
    let mut sweep_interval = tokio::time::interval(config.sweep_period);
    sweep_interval.tick().await; // first tick fires immediately

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
            maybe_order = orders_rx.recv() => {
                let Some(order) = maybe_order else { break };
                let completed = {
                    let mut book = book.lock().await;
                    executor::process_order(&mut book, order)
                };
                completions.record_all(completed).await;
            }
            _ = sweep_interval.tick() => {
                info!("clean timed out orders");
                let timed_out = {
                    let mut book = book.lock().await;
                    sweeper::sweep(&mut book, config.order_timeout_seconds)
                };
                completions.record_all(timed_out).await;
            }
        }
    }
}
