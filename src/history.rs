use crate::event::{EventHandler, WheelEvent};
use crate::util::time;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Most records kept before the oldest are dropped
pub const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub winner: String,
    /// Seconds since the UNIX epoch
    pub timestamp: u64,
}

/// Past winners, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpinHistory {
    records: VecDeque<SpinRecord>,
}

impl SpinHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, winner: &str, timestamp: u64) {
        if self.records.len() >= HISTORY_LIMIT {
            self.records.pop_front();
        }
        self.records.push_back(SpinRecord {
            winner: winner.to_owned(),
            timestamp,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &SpinRecord> {
        self.records.iter().rev()
    }

    /// How often each name has won, by name
    pub fn win_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.winner.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl EventHandler for SpinHistory {
    fn handle_event(&mut self, event: &WheelEvent) {
        if let Some(entry) = event.winner() {
            self.record(&entry.name, time::timestamp_secs());
        }
    }
}
