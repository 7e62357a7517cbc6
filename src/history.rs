use crate::round::Outcome;
use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub round_id: u64,
    pub outcome: Outcome,
    pub resolved_at: DateTime<Utc>,
}

/// Fixed-capacity log of completed rounds, newest first. The oldest entry is evicted
/// once the capacity is reached.
#[derive(Clone, Debug)]
pub struct ResultHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for ResultHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ResultHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, round_id: u64, outcome: Outcome) {
        self.record_at(round_id, outcome, Utc::now());
    }

    pub fn record_at(
        &mut self,
        round_id: u64,
        outcome: Outcome,
        resolved_at: DateTime<Utc>,
    ) {
        self.entries.push_front(HistoryEntry {
            round_id,
            outcome,
            resolved_at,
        });
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
