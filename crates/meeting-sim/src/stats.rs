//! Statistics Output
//!
//! Aggregates round records across trials, one summary per meeting number.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::runner::RoundRecord;

/// Cross-trial statistics for one meeting number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingSummary {
    pub meeting_num: usize,
    /// Number of trials that held this meeting
    pub trials: usize,
    pub mean_in_person: f64,
    pub min_in_person: usize,
    pub max_in_person: usize,
    pub mean_remote: f64,
    pub min_remote: usize,
    pub max_remote: usize,
    pub mean_utility: f64,
}

/// Running totals while scanning records
#[derive(Debug, Clone)]
struct MeetingAccumulator {
    trials: usize,
    sum_in_person: usize,
    min_in_person: usize,
    max_in_person: usize,
    sum_remote: usize,
    min_remote: usize,
    max_remote: usize,
    sum_utility: f64,
}

impl MeetingAccumulator {
    fn new(record: &RoundRecord) -> Self {
        Self {
            trials: 0,
            sum_in_person: 0,
            min_in_person: record.n_in_person,
            max_in_person: record.n_in_person,
            sum_remote: 0,
            min_remote: record.n_remote,
            max_remote: record.n_remote,
            sum_utility: 0.0,
        }
    }

    fn add(&mut self, record: &RoundRecord) {
        self.trials += 1;
        self.sum_in_person += record.n_in_person;
        self.min_in_person = self.min_in_person.min(record.n_in_person);
        self.max_in_person = self.max_in_person.max(record.n_in_person);
        self.sum_remote += record.n_remote;
        self.min_remote = self.min_remote.min(record.n_remote);
        self.max_remote = self.max_remote.max(record.n_remote);
        self.sum_utility += record.utility;
    }

    fn finish(&self, meeting_num: usize) -> MeetingSummary {
        let n = self.trials as f64;
        MeetingSummary {
            meeting_num,
            trials: self.trials,
            mean_in_person: self.sum_in_person as f64 / n,
            min_in_person: self.min_in_person,
            max_in_person: self.max_in_person,
            mean_remote: self.sum_remote as f64 / n,
            min_remote: self.min_remote,
            max_remote: self.max_remote,
            mean_utility: self.sum_utility / n,
        }
    }
}

/// Summarize records by meeting number, in ascending meeting order.
pub fn summarize(records: &[RoundRecord]) -> Vec<MeetingSummary> {
    let mut by_meeting: BTreeMap<usize, MeetingAccumulator> = BTreeMap::new();

    for record in records {
        by_meeting
            .entry(record.meeting_num)
            .or_insert_with(|| MeetingAccumulator::new(record))
            .add(record);
    }

    by_meeting
        .iter()
        .map(|(&meeting_num, acc)| acc.finish(meeting_num))
        .collect()
}
