//! Ingress pump (B4): bounded, non-blocking fan-in from producer channels.

use crate::config::BusConfig;
use crate::coordinator::BusState;
use std::sync::Arc;
use tokio::sync::{mpsc::error::TryRecvError, watch, Mutex};
use tracing::trace;

/// Runs the ingress pump until shutdown is signaled.
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
                cycle(&mut state, config.bulk);
            }
        }
    }
}

/// One ingress cycle: up to `bulk` non-blocking receives across every
/// registered producer, appended to the log in round-robin order.
fn cycle(state: &mut BusState, bulk: usize) {
    if state.producers.is_empty() {
        return;
    }

    let BusState { log, producers, .. } = state;
    let mut taken = 0usize;
    loop {
        let mut progressed = false;
        for (pid, entry) in producers.iter_mut() {
            if taken >= bulk {
                return;
            }
            match entry.rx.try_recv() {
                Ok(record) => {
                    log.append(record);
                    entry.received += 1;
                    taken += 1;
                    progressed = true;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    trace!(producer = %pid, "closed producer channel observed, skipping");
                }
            }
        }
        if !progressed {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MessageRecord;
    use crate::registry::ProducerEntry;
    use std::collections::HashMap;

    fn empty_state() -> BusState {
        BusState {
            log: crate::log::MessageLog::new(),
            producers: HashMap::new(),
            consumers: HashMap::new(),
            reclaimed: 0,
        }
    }

    #[tokio::test]
    async fn cycle_respects_bulk_budget_across_producers() {
        let mut state = empty_state();
        for name in ["p1", "p2"] {
            let (tx, rx) = tokio::sync::mpsc::channel(32);
            for i in 0..10 {
                tx.try_send(MessageRecord::new(i, format!("{name}-{i}")))
                    .unwrap();
            }
            state
                .producers
                .insert(name.to_string(), ProducerEntry { rx, received: 0 });
        }

        cycle(&mut state, 10);
        assert_eq!(state.log.currcnt(), 10);

        cycle(&mut state, 10);
        assert_eq!(state.log.currcnt(), 20);
    }

    #[tokio::test]
    async fn closed_producer_channel_is_skipped_not_unregistered() {
        let mut state = empty_state();
        let (tx, rx) = tokio::sync::mpsc::channel::<MessageRecord>(4);
        drop(tx);
        state
            .producers
            .insert("p1".to_string(), ProducerEntry { rx, received: 0 });

        cycle(&mut state, 10);
        assert_eq!(state.log.currcnt(), 0);
        assert!(state.producers.contains_key("p1"));
    }
}
