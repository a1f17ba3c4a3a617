//! Retention reaper (B6): reclaims records every consumer has passed and
//! that have aged out of the retention window.

use crate::config::BusConfig;
use crate::coordinator::BusState;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::{watch, Mutex};
use tracing::debug;

/// Runs the retention reaper until shutdown is signaled.
pub(crate) async fn run(
    state: Arc<Mutex<BusState>>,
    config: BusConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(config.clean_period);
    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                let mut state = state.lock().await;
                let reclaimed = cycle(&mut state, config.retention);
                if reclaimed > 0 {
                    debug!(reclaimed, "reaper reclaimed records");
                }
            }
        }
    }
}

/// One reaper cycle. Returns the number of records reclaimed.
///
/// Two independent stop conditions guard every removal (spec §4.4): the
/// head must be older than the retention window, *and* no consumer's
/// cursor may still reference it.
fn cycle(state: &mut BusState, retention: Duration) -> u64 {
    let now_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_nanos() as i64;
    let rtime = now_ns - retention.as_nanos() as i64;

    let mut reclaimed = 0u64;
    loop {
        let Some((cursor, record)) = state.log.front() else {
            break;
        };
        if record.ts >= rtime {
            break;
        }
        if state.consumers.values().any(|c| c.cursor == Some(cursor)) {
            break;
        }
        state.log.reclaim_front();
        state.reclaimed += 1;
        reclaimed += 1;
    }
    reclaimed
}
