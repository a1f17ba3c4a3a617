//! Demo consumer driver (the Rust analogue of `gomsgmuxer/consumer.go`'s
//! `ConsumerFileWriter`).

use crate::coordinator::BusCoordinator;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Registers `name` with `bus` and drains its outbound channel to a file
/// named `name` inside `dir`, one line per record:
/// `<name>: Id:<id> ts=<ts> msg='<data>'\n`. Returns once the consumer is
/// unregistered (its channel closes) or once `register_consumer` fails
/// because `name` is already taken.
pub async fn run_file_consumer(
    bus: &BusCoordinator,
    name: impl Into<String>,
    dir: impl AsRef<Path>,
) -> std::io::Result<bool> {
    let name = name.into();
    let Some(mut rx) = bus.register_consumer(name.clone()).await else {
        return Ok(false);
    };

    let path = dir.as_ref().join(&name);
    let mut file = tokio::fs::File::create(&path).await?;
    while let Some(record) = rx.recv().await {
        let line = format!("{name}: {}", record.render());
        file.write_all(line.as_bytes()).await?;
    }
    file.flush().await?;
    Ok(true)
}
