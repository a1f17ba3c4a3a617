//! Periodic timeout sweep (grounded on `cleanTimedoutOrders`).

use crate::book::OrderBook;
use crate::order::{Order, Status};
use tracing::debug;

/// Removes every resting order older than `timeout_seconds` from `book`,
/// marks it [`Status::TimedOut`], and returns the batch for delivery to
/// the completion sink.
pub fn sweep(book: &mut OrderBook, timeout_seconds: i64) -> Vec<Order> {
    let mut timed_out = book.sweep_timed_out(timeout_seconds);
    for order in &mut timed_out {
        debug!(id = %order.id, age = order.age_seconds(), "timed out order");
        order.status = Status::TimedOut;
    }
    timed_out
}
