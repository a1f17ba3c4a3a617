//! Price-indexed order book (spec §3, §4.5 invariants).

use crate::order::{Order, Transaction};
use std::collections::{BTreeMap, VecDeque};

/// Two independent price -> FIFO order-list mappings, one per side.
///
/// `BTreeMap` is used in place of the original's unordered Go `map` so
/// that price-level iteration (live-order listings, tests) is
/// deterministic; spec.md never requires a particular iteration order
/// over price levels, so this is a value-preserving substitution (see
/// DESIGN.md).
#[derive(Debug, Default)]
pub struct OrderBook {
    buy: BTreeMap<i64, VecDeque<Order>>,
    sell: BTreeMap<i64, VecDeque<Order>>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn side_mut(&mut self, transaction: Transaction) -> &mut BTreeMap<i64, VecDeque<Order>> {
        match transaction {
            Transaction::Buy => &mut self.buy,
            Transaction::Sell => &mut self.sell,
        }
    }

    fn opposite_mut(&mut self, transaction: Transaction) -> &mut BTreeMap<i64, VecDeque<Order>> {
        match transaction {
            Transaction::Buy => &mut self.sell,
            Transaction::Sell => &mut self.buy,
        }
    }

    /// Resting orders on `transaction`'s side at `price`, oldest first.
    pub fn resting_at(&self, transaction: Transaction, price: i64) -> &[Order] {
        let side = match transaction {
            Transaction::Buy => &self.buy,
            Transaction::Sell => &self.sell,
        };
        side.get(&price).map_or(&[], |q| q.as_slices().0)
    }

    /// Appends a resting order to its own side at its price.
    pub(crate) fn rest(&mut self, order: Order) {
        let price = order.price;
        self.side_mut(order.transaction).entry(price).or_default().push_back(order);
    }

    /// The opposite side's resting queue at `price`, if any price-level
    /// matches `transaction` (i.e. the opposite side of the trade).
    pub(crate) fn opposite_queue_mut(
        &mut self,
        transaction: Transaction,
        price: i64,
    ) -> Option<&mut VecDeque<Order>> {
        self.opposite_mut(transaction).get_mut(&price)
    }

    /// Drops the opposite-side price entry if its queue is now empty.
    pub(crate) fn prune_opposite_if_empty(&mut self, transaction: Transaction, price: i64) {
        let side = self.opposite_mut(transaction);
        if side.get(&price).is_some_and(VecDeque::is_empty) {
            side.remove(&price);
        }
    }

    /// Removes every order whose age has reached `timeout_seconds`,
    /// returning them. Rebuilds each touched price level from scratch
    /// (spec §4.6's "why rebuild per side").
    pub fn sweep_timed_out(&mut self, timeout_seconds: i64) -> Vec<Order> {
        let mut removed = Vec::new();
        for side in [&mut self.buy, &mut self.sell] {
            let mut next = BTreeMap::new();
            for (price, orders) in std::mem::take(side) {
                let mut kept = VecDeque::new();
                for order in orders {
                    if order.age_seconds() >= timeout_seconds {
                        removed.push(order);
                    } else {
                        kept.push_back(order);
                    }
                }
                if !kept.is_empty() {
                    next.insert(price, kept);
                }
            }
            *side = next;
        }
        removed
    }

    /// Invariant check (spec §4.5): at any price, buy and sell are never
    /// both non-empty.
    pub fn no_overlapping_price_levels(&self) -> bool {
        self.buy.keys().all(|p| !self.sell.contains_key(p))
    }

    /// Invariant check (spec §4.5): no resting order has `remaining == 0`.
    pub fn no_fully_filled_resting_orders(&self) -> bool {
        self.buy
            .values()
            .chain(self.sell.values())
            .flat_map(VecDeque::iter)
            .all(|o| o.remaining > 0)
    }

    #[cfg(test)]
    pub(crate) fn buy_levels(&self) -> &BTreeMap<i64, VecDeque<Order>> {
        &self.buy
    }

    #[cfg(test)]
    pub(crate) fn sell_levels(&self) -> &BTreeMap<i64, VecDeque<Order>> {
        &self.sell
    }
}
