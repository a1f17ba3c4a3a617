//! Message records and the cursor handles consumers use to track position.

use std::time::{SystemTime, UNIX_EPOCH};

/// A single `(id, timestamp, payload)` triple. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Producer-provided identifier.
    pub id: i64,
    /// Nanoseconds since the Unix epoch, assigned at construction.
    pub ts: i64,
    /// Opaque payload.
    pub data: String,
}

impl MessageRecord {
    /// Builds a new record, stamping the current wall-clock time.
    pub fn new(id: i64, data: impl Into<String>) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_nanos() as i64;
        Self {
            id,
            ts,
            data: data.into(),
        }
    }

    /// Renders the record the way the bus's consumers print it:
    /// `Id:<id> ts=<ts> msg='<data>'\n`.
    pub fn render(&self) -> String {
        format!("Id:{} ts={} msg='{}'\n", self.id, self.ts, self.data)
    }
}

/// A stable handle identifying the last record delivered to a consumer.
///
/// Backed by a monotonically increasing sequence number assigned at
/// append time rather than a pointer into the log. Because the log only
/// ever grows at the tail and shrinks at the front, a cursor's validity
/// doesn't depend on where in memory the record currently lives — only on
/// whether its sequence number is still >= the log's current front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(pub u64);

impl Cursor {
    /// The cursor immediately following this one.
    pub fn next(self) -> Cursor {
        Cursor(self.0 + 1)
    }
}
