//! Producer and consumer registries: id -> channel + bookkeeping.

use crate::record::{Cursor, MessageRecord};
use tokio::sync::mpsc;

/// Registry entry for a producer.
pub struct ProducerEntry {
    pub(crate) rx: mpsc::Receiver<MessageRecord>,
    pub(crate) received: u64,
}

/// Registry entry for a consumer.
pub struct ConsumerEntry {
    pub(crate) tx: mpsc::Sender<MessageRecord>,
    pub(crate) cursor: Option<Cursor>,
    pub(crate) delivered: u64,
}

impl ConsumerEntry {
    /// The last record delivered to this consumer, if any.
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Total records delivered to this consumer so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl ProducerEntry {
    /// Total records received from this producer so far.
    pub fn received(&self) -> u64 {
        self.received
    }
}
