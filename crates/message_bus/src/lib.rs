//! Multi-producer / multi-consumer message bus.
//!
//! A single coordinator owns an ordered message log and per-producer /
//! per-consumer registries, all guarded by one mutex (spec §5, §9). Three
//! independent tasks drive it: an ingress pump that fans producer
//! channels into the log, an egress pump that fans the log out to
//! consumer channels, and a retention reaper that reclaims records once
//! every consumer has passed them and they've aged out of the retention
//! window.

mod config;
mod consumer;
mod coordinator;
mod egress;
mod ingress;
mod log;
mod producer;
mod reaper;
mod record;
mod registry;

pub use config::BusConfig;
pub use consumer::run_file_consumer;
pub use coordinator::{BusCoordinator, BusTasks};
pub use producer::run_producer;
pub use record::{Cursor, MessageRecord};
pub use registry::{ConsumerEntry, ProducerEntry};
