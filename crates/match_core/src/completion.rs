//! Completion sink: durable-in-memory store for finished orders
//! (grounded on `store.go`'s `storageService`, whose `store` map was
//! declared but never populated — this upgrades it to an actual
//! queryable store).

use crate::order::{Order, OrderId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Receives completed and timed-out orders and keeps them queryable by
/// id for as long as the process runs.
///
/// `BTreeMap` (keyed by id, same deterministic-iteration rationale as
/// `OrderBook`) rather than `HashMap`, so `listing_lines` produces a
/// stable order run over run as spec §4.7 requires.
#[derive(Clone, Default)]
pub struct CompletionSink {
    store: Arc<Mutex<BTreeMap<OrderId, Order>>>,
}

impl CompletionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished order (`StoreCompletedOrders`'s per-item log,
    /// persisted rather than discarded).
    pub async fn record(&self, order: Order) {
        info!(
            id = %order.id,
            transaction = %order.transaction,
            order_type = %order.order_type,
            executed = order.executed,
            remaining = order.remaining,
            price = order.price,
            status = %order.status,
            "persisting completed order"
        );
        self.store.lock().await.insert(order.id, order);
    }

    /// Records a whole batch in submission order.
    pub async fn record_all(&self, orders: Vec<Order>) {
        for order in orders {
            self.record(order).await;
        }
    }

    /// Looks up a single finished order by id (`RetrieveExecutedOrders`,
    /// made queryable instead of logging-only).
    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.store.lock().await.get(&id).cloned()
    }

    /// All finished orders, rendered as listing lines.
    pub async fn listing_lines(&self) -> Vec<String> {
        self.store
            .lock()
            .await
            .values()
            .map(Order::listing_line)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderType, Status, Transaction};

    #[tokio::test]
    async fn recorded_orders_are_retrievable_by_id() {
        let sink = CompletionSink::new();
        let mut order = Order::new(Transaction::Buy, OrderType::Limit, 10, 100);
        order.status = Status::Completed;
        let id = order.id;
        sink.record(order).await;

        let fetched = sink.get(id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(sink.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_returns_none() {
        let sink = CompletionSink::new();
        assert!(sink.get(uuid::Uuid::new_v4()).await.is_none());
    }
}
