//! Per-order matching walk (spec §4, grounded on `processOrder` /
//! `processInputAgainstMatch` / `cleanCompletedOrders`).

use crate::book::OrderBook;
use crate::order::{Order, Status};
use tracing::debug;

/// Matches `incoming` against the resting orders on the opposite side at
/// its price, oldest first, filling both sides until either `incoming`
/// is exhausted or the opposite queue runs dry. Any resting order that
/// reaches zero `remaining` is removed from the book and returned as
/// completed; if `incoming` itself is fully filled it is returned too,
/// otherwise it is left resting on its own side.
pub fn process_order(book: &mut OrderBook, mut incoming: Order) -> Vec<Order> {
    debug!(
        id = %incoming.id,
        transaction = %incoming.transaction,
        price = incoming.price,
        remaining = incoming.remaining,
        "matcher received order"
    );

    let mut completed = Vec::new();
    let transaction = incoming.transaction;
    let price = incoming.price;

    if let Some(queue) = book.opposite_queue_mut(transaction, price) {
        while incoming.remaining > 0 {
            let Some(resting) = queue.front_mut() else {
                break;
            };
            let traded = incoming.remaining.min(resting.remaining);
            incoming.remaining -= traded;
            incoming.executed += traded;
            resting.remaining -= traded;
            resting.executed += traded;

            if resting.remaining == 0 {
                let mut filled = queue.pop_front().expect("front just matched");
                filled.status = Status::Completed;
                completed.push(filled);
            }
        }
        book.prune_opposite_if_empty(transaction, price);
    }

    if incoming.remaining > 0 {
        book.rest(incoming);
    } else {
        incoming.status = Status::Completed;
        completed.push(incoming);
    }

    completed
}
