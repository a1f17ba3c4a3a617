mod book;
mod completion;
mod config;
mod executor;
mod matcher;
mod order;
mod sweeper;

pub use book::OrderBook;
pub use completion::CompletionSink;
pub use config::MatcherConfig;
pub use matcher::MatcherCoordinator;
pub use order::{InvalidWireValue, Order, OrderId, OrderType, Status, Transaction};
