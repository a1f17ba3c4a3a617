//! End-to-end message bus demo: three producers (25/15/5 records), three
//! file consumers, orderly shutdown. The Rust analogue of
//! `gomsgmuxer/mb.go`.
//!
//! ```bash
//! cargo run -p message_bus --bin demo
//! ```

use message_bus::{run_file_consumer, run_producer, BusConfig, BusCoordinator};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let bus = BusCoordinator::new(BusConfig::default());
    let tasks = bus.spawn();

    info!("starting consumers");
    let dir = std::env::current_dir().expect("current dir");
    let mut consumers = Vec::new();
    for name in ["consumer_1", "consumer_2", "consumer_3"] {
        let bus = bus.clone();
        let dir = dir.clone();
        consumers.push(tokio::spawn(async move {
            run_file_consumer(&bus, name, &dir).await.expect("consumer io");
        }));
    }

    // Give consumers a moment to register before producers start, as the
    // original driver does by starting consumer goroutines first.
    tokio::time::sleep(Duration::from_millis(50)).await;

    info!("starting producers");
    let mut producers = Vec::new();
    for (name, count) in [("producer_1", 25), ("producer_2", 15), ("producer_3", 5)] {
        let bus = bus.clone();
        producers.push(tokio::spawn(
            async move { run_producer(&bus, name, count).await },
        ));
    }

    info!("waiting for producers to finish");
    for p in producers {
        p.await.expect("producer task panicked");
    }

    info!("draining remaining records to consumers");
    tokio::time::sleep(Duration::from_secs(1)).await;

    info!("closing consumers");
    for name in ["consumer_1", "consumer_2", "consumer_3"] {
        bus.unregister_consumer(name).await;
    }
    for c in consumers {
        c.await.expect("consumer task panicked");
    }

    bus.print_stats().await;
    bus.shutdown();
    let _ = tokio::join!(tasks.ingress, tasks.egress, tasks.reaper);
    info!("message bus demo done");
}
