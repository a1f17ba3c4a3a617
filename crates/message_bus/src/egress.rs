//! Egress pump (B5): advances each consumer's cursor and delivers records.

use crate::config::BusConfig;
use crate::coordinator::BusState;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// Runs the egress pump until shutdown is signaled.
pub(crate) async fn run(
    state: Arc<Mutex<BusState>>,
    config: BusConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(config.idle_poll_interval);
    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                let mut state = state.lock().await;
                cycle(&mut state).await;
            }
        }
    }
}

/// One egress cycle: for every consumer, deliver its next record (if any).
///
/// Sends block while holding the coordinator's single mutex — spec §4.3's
/// explicit, documented tradeoff: a slow consumer (small channel capacity)
/// stalls delivery to every other consumer for the cycle.
async fn cycle(state: &mut BusState) {
    let BusState { log, consumers, .. } = state;
    for entry in consumers.values_mut() {
        if let Some((cursor, record)) = log.next_after(entry.cursor) {
            if entry.tx.send(record.clone()).await.is_ok() {
                entry.cursor = Some(cursor);
                entry.delivered += 1;
            }
        }
    }
}
