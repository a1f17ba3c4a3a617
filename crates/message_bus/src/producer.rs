//! Demo producer driver (the Rust analogue of `gomsgmuxer/producer.go`'s
//! `InMemProducer`).

use crate::coordinator::BusCoordinator;
use crate::record::MessageRecord;
use std::time::{SystemTime, UNIX_EPOCH};

/// Registers `name` with `bus`, emits `count` records, then closes its
/// channel and unregisters. Returns `false` if `name` was already
/// registered.
pub async fn run_producer(bus: &BusCoordinator, name: impl Into<String>, count: usize) -> bool {
    let name = name.into();
    let Some(tx) = bus.register_producer(name.clone()).await else {
        return false;
    };

    for i in 0..count {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_nanos();
        let payload = format!("hello from {name} [{i}] @ {ts}");
        if tx.send(MessageRecord::new(i as i64, payload)).await.is_err() {
            break;
        }
    }

    drop(tx);
    bus.unregister_producer(&name).await;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BusConfig;

    #[tokio::test]
    async fn emits_exactly_count_records_then_unregisters() {
        let bus = BusCoordinator::new(BusConfig::default());
        let tasks = bus.spawn();

        run_producer(&bus, "p1", 5).await;

        // Give the ingress pump a cycle to drain the producer channel.
        tokio::time::sleep(BusConfig::default().idle_poll_interval * 2).await;
        assert_eq!(bus.seqid().await, 5);

        bus.shutdown();
        let _ = tokio::join!(tasks.ingress, tasks.egress, tasks.reaper);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let bus = BusCoordinator::new(BusConfig::default());
        assert!(bus.register_producer("dup").await.is_some());
        assert!(bus.register_producer("dup").await.is_none());
    }
}
