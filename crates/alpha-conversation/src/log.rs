// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only message log.

use std::sync::{Mutex, MutexGuard, PoisonError};

use alpha_core::{Message, MessageId};

/// Ordered conversation log. Entries can be appended and read, never edited or removed.
#[derive(Debug, Default)]
pub(crate) struct MessageLog {
    entries: Mutex<Vec<Message>>,
}

impl MessageLog {
    fn entries(&self) -> MutexGuard<'_, Vec<Message>> {
        // The lock is never held across a panic point that leaves the vec
        // half-written, so a poisoned guard is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn append(&self, message: Message) -> MessageId {
        let id = message.id.clone();
        self.entries().push(message);
        id
    }

    pub(crate) fn snapshot(&self) -> Vec<Message> {
        self.entries().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    pub(crate) fn get(&self, id: &MessageId) -> Option<Message> {
        self.entries().iter().find(|m| &m.id == id).cloned()
    }

    /// The newest entry matching `pred`.
    pub(crate) fn find_last(&self, pred: impl Fn(&Message) -> bool) -> Option<Message> {
        self.entries().iter().rev().find(|m| pred(m)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let log = MessageLog::default();
        let a = log.append(Message::user("first"));
        let b = log.append(Message::user("second"));

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, a);
        assert_eq!(snapshot[1].id, b);
        assert_eq!(log.find_last(|_| true).unwrap().content, "second");
    }

    #[test]
    fn get_finds_by_id() {
        let log = MessageLog::default();
        let id = log.append(Message::user("hello"));
        assert_eq!(log.get(&id).unwrap().content, "hello");
        assert!(log.get(&MessageId::new()).is_none());
    }

    #[test]
    fn find_last_scans_newest_first() {
        let log = MessageLog::default();
        log.append(Message::out_of_scope("not sure", "Unknown/OOS", 0.2, "older"));
        log.append(Message::out_of_scope("not sure", "Unknown/OOS", 0.3, "newer"));
        log.append(Message::user("thanks"));

        let offer = log.find_last(Message::offers_search).unwrap();
        assert_eq!(offer.suggested_search_query.as_deref(), Some("newer"));
        assert!(log.find_last(|m| m.content == "missing").is_none());
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let log = MessageLog::default();
        log.append(Message::user("one"));
        let before = log.snapshot();
        log.append(Message::user("two"));
        assert_eq!(before.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
