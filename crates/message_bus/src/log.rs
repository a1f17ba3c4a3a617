//! The ordered message log: append at the tail, reclaim at the head.

use crate::record::{Cursor, MessageRecord};
use std::collections::VecDeque;

/// An ordered sequence of message records with stable per-element cursors.
///
/// Internally a `VecDeque` where slot `i` always holds the record whose
/// cursor is `base_seq + i`. Because records are only ever appended at the
/// tail and reclaimed from the front, this invariant makes every lookup
/// by cursor an O(1) index computation — no pointer chasing, no
/// generation counters.
#[derive(Debug, Default)]
pub struct MessageLog {
    records: VecDeque<MessageRecord>,
    /// Cursor value of `records[0]`, if any. Equal to `next_seq` when empty.
    base_seq: u64,
    /// Cursor that will be assigned to the next appended record.
    next_seq: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` at the tail, returning its cursor.
    pub fn append(&mut self, record: MessageRecord) -> Cursor {
        let cursor = Cursor(self.next_seq);
        self.records.push_back(record);
        self.next_seq += 1;
        cursor
    }

    /// Returns the record following `after` (or the head, if `after` is
    /// `None`) along with its cursor, or `None` if there is nothing new.
    pub fn next_after(&self, after: Option<Cursor>) -> Option<(Cursor, &MessageRecord)> {
        let target = match after {
            None => self.base_seq,
            Some(c) => c.0 + 1,
        };
        if target < self.base_seq || target >= self.next_seq {
            return None;
        }
        let idx = (target - self.base_seq) as usize;
        self.records.get(idx).map(|r| (Cursor(target), r))
    }

    /// The cursor and timestamp of the current head, if any.
    pub fn front(&self) -> Option<(Cursor, &MessageRecord)> {
        self.records.front().map(|r| (Cursor(self.base_seq), r))
    }

    /// Removes the current head unconditionally. Callers (the reaper) are
    /// responsible for checking the reclaim precondition first.
    pub fn reclaim_front(&mut self) -> Option<MessageRecord> {
        let removed = self.records.pop_front();
        if removed.is_some() {
            self.base_seq += 1;
        }
        removed
    }

    /// Total records ever appended (`seqid` in the original).
    pub fn seqid(&self) -> u64 {
        self.next_seq
    }

    /// Records currently live in the log (`currcnt` in the original).
    pub fn currcnt(&self) -> u64 {
        self.records.len() as u64
    }

    /// Whether `cursor` still refers to a live element.
    pub fn is_live(&self, cursor: Cursor) -> bool {
        cursor.0 >= self.base_seq && cursor.0 < self.next_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64) -> MessageRecord {
        MessageRecord {
            id,
            ts: id,
            data: format!("msg-{id}"),
        }
    }

    #[test]
    fn append_and_iterate_in_order() {
        let mut log = MessageLog::new();
        let c0 = log.append(rec(1));
        let c1 = log.append(rec(2));
        let c2 = log.append(rec(3));

        let (got0, r0) = log.next_after(None).unwrap();
        assert_eq!(got0, c0);
        assert_eq!(r0.id, 1);

        let (got1, r1) = log.next_after(Some(c0)).unwrap();
        assert_eq!(got1, c1);
        assert_eq!(r1.id, 2);

        let (got2, r2) = log.next_after(Some(c1)).unwrap();
        assert_eq!(got2, c2);
        assert_eq!(r2.id, 3);

        assert!(log.next_after(Some(c2)).is_none());
    }

    #[test]
    fn reclaim_preserves_handles_into_the_remaining_suffix() {
        let mut log = MessageLog::new();
        let c0 = log.append(rec(1));
        let c1 = log.append(rec(2));

        log.reclaim_front();
        assert!(!log.is_live(c0));
        assert!(log.is_live(c1));

        let (got, r) = log.next_after(None).unwrap();
        assert_eq!(got, c1);
        assert_eq!(r.id, 2);
    }

    #[test]
    fn seqid_and_currcnt_track_append_and_reclaim() {
        let mut log = MessageLog::new();
        log.append(rec(1));
        log.append(rec(2));
        log.append(rec(3));
        assert_eq!(log.seqid(), 3);
        assert_eq!(log.currcnt(), 3);

        log.reclaim_front();
        assert_eq!(log.seqid(), 3);
        assert_eq!(log.currcnt(), 2);
    }
}
