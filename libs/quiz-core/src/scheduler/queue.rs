//! Retest queue keyed by absolute slot.

use std::collections::{BTreeMap, VecDeque};

/// An item waiting to be asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AskedQuestion {
    /// Index into the scheduler's item list.
    pub item: usize,
    /// Consecutive correct answers since the last miss.
    pub streak: u32,
}

impl AskedQuestion {
    pub fn new(item: usize) -> Self {
        Self { item, streak: 0 }
    }
}

/// Questions grouped by the turn slot at which they become due.
#[derive(Debug, Clone, Default)]
pub struct RetestQueue {
    slots: BTreeMap<u64, VecDeque<AskedQuestion>>,
    len: usize,
}

impl RetestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question to a slot.
    pub fn push(&mut self, slot: u64, question: AskedQuestion) {
        self.slots.entry(slot).or_default().push_back(question);
        self.len += 1;
    }

    /// Remove the first question of a slot.
    pub fn pop_front(&mut self, slot: u64) -> Option<AskedQuestion> {
        let entries = self.slots.get_mut(&slot)?;
        let question = entries.pop_front();
        if entries.is_empty() {
            self.slots.remove(&slot);
        }
        if question.is_some() {
            self.len -= 1;
        }
        question
    }

    /// Remove the earliest question whose item is not `avoid`.
    ///
    /// Slots are scanned in order; within a slot the first entry is skipped
    /// only when it is `avoid`. If `avoid` is the only pending item it is
    /// returned anyway.
    pub fn take_next(&mut self, avoid: Option<usize>) -> Option<(u64, AskedQuestion)> {
        let found = self.slots.iter().find_map(|(&slot, entries)| {
            entries
                .iter()
                .take(2)
                .position(|q| Some(q.item) != avoid)
                .map(|position| (slot, position))
        });
        let (slot, position) = match found {
            Some(found) => found,
            None => (*self.slots.keys().next()?, 0),
        };

        let entries = self.slots.get_mut(&slot)?;
        let question = entries.remove(position)?;
        if entries.is_empty() {
            self.slots.remove(&slot);
        }
        self.len -= 1;
        Some((slot, question))
    }

    /// Slot and entry currently holding `item`.
    pub fn find(&self, item: usize) -> Option<(u64, &AskedQuestion)> {
        self.slots.iter().find_map(|(&slot, entries)| {
            entries.iter().find(|q| q.item == item).map(|q| (slot, q))
        })
    }

    /// Total number of queued questions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
