/*!
 * Active-cue lookup and navigation.
 *
 * The index owns a shared, immutable `CueList` and a cursor on the last
 * active cue. Lookups run on every playback tick, so the common forward case
 * is answered by checking the cursor and its successor before searching.
 * Small lists are scanned linearly and large ones binary searched on
 * `start_ms`; both strategies return the lowest index whose inclusive range
 * contains the queried time.
 */

use std::sync::Arc;

use serde::Serialize;

use crate::cue::{Cue, CueList};
use crate::errors::SubtitleError;
use crate::timecode;

/// Cue count up to which lookups scan linearly
pub const DEFAULT_LINEAR_SCAN_THRESHOLD: usize = 100;

/// Where a navigation request wants playback to go
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeekTarget {
    pub index: usize,
    pub start_ms: u64,
    /// `start_ms` converted for the playback clock
    pub start_seconds: f64,
}

impl SeekTarget {
    fn new(index: usize, cue: &Cue) -> Self {
        SeekTarget {
            index,
            start_ms: cue.start_ms,
            start_seconds: timecode::ms_to_seconds(cue.start_ms),
        }
    }
}

/// Lookup state over one cue list
#[derive(Debug, Clone)]
pub struct CueIndex {
    cues: Arc<CueList>,
    cursor: Option<usize>,
    linear_scan_threshold: usize,
}

impl Default for CueIndex {
    fn default() -> Self {
        Self::new(CueList::empty())
    }
}

impl CueIndex {
    pub fn new(cues: CueList) -> Self {
        Self::with_threshold(Arc::new(cues), DEFAULT_LINEAR_SCAN_THRESHOLD)
    }

    pub fn with_threshold(cues: Arc<CueList>, linear_scan_threshold: usize) -> Self {
        CueIndex {
            cues,
            cursor: None,
            linear_scan_threshold,
        }
    }

    pub fn cues(&self) -> &CueList {
        &self.cues
    }

    /// Shared handle on the current list, unaffected by later replacements
    pub fn snapshot(&self) -> Arc<CueList> {
        Arc::clone(&self.cues)
    }

    /// Index of the cue that was active at the last lookup
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn active_cue(&self) -> Option<&Cue> {
        self.cursor.and_then(|i| self.cues.get(i))
    }

    /// Swap in a new list and forget the cursor
    pub fn replace(&mut self, cues: CueList) {
        self.replace_shared(Arc::new(cues));
    }

    pub fn replace_shared(&mut self, cues: Arc<CueList>) {
        self.cues = cues;
        self.cursor = None;
    }

    fn uses_binary_search(&self) -> bool {
        self.cues.len() > self.linear_scan_threshold
    }

    /// Cue active at `ms`, updating the cursor
    pub fn active_cue_at(&mut self, ms: u64) -> Option<usize> {
        let found = if self.uses_binary_search() {
            self.cached_hit(ms).or_else(|| find_binary(&self.cues, ms))
        } else {
            find_linear(&self.cues, ms)
        };

        self.cursor = found;
        found
    }

    /// Cursor or its successor, when it is the lowest cue containing `ms`
    fn cached_hit(&self, ms: u64) -> Option<usize> {
        let cursor = self.cursor?;
        [cursor, cursor + 1]
            .into_iter()
            .find(|&i| self.cues.get(i).is_some_and(|cue| cue.contains(ms)) && self.is_lowest_containing(i, ms))
    }

    fn is_lowest_containing(&self, index: usize, ms: u64) -> bool {
        index == 0 || self.cues.reach()[index - 1] < ms
    }

    /// Cue after `from`, or the first cue starting after `ms` when nothing is active; wraps to 0
    pub fn next_cue(&self, from: Option<usize>, ms: u64) -> Option<SeekTarget> {
        let len = self.cues.len();
        if len == 0 {
            return None;
        }

        let index = match from.filter(|&i| i < len) {
            Some(i) => (i + 1) % len,
            None => {
                let after = if self.uses_binary_search() {
                    let i = self.cues.cues().partition_point(|cue| cue.start_ms <= ms);
                    (i < len).then_some(i)
                } else {
                    self.cues.iter().position(|cue| cue.start_ms > ms)
                };
                after.unwrap_or(0)
            }
        };

        self.cues.get(index).map(|cue| SeekTarget::new(index, cue))
    }

    /// Cue before `from`, or the last cue starting before `ms` when nothing is active; clamps to 0
    pub fn previous_cue(&self, from: Option<usize>, ms: u64) -> Option<SeekTarget> {
        let len = self.cues.len();
        if len == 0 {
            return None;
        }

        let index = match from.filter(|&i| i < len) {
            Some(i) => i.saturating_sub(1),
            None => {
                let before = if self.uses_binary_search() {
                    self.cues.cues().partition_point(|cue| cue.start_ms < ms).checked_sub(1)
                } else {
                    self.cues.iter().rposition(|cue| cue.start_ms < ms)
                };
                before.unwrap_or(0)
            }
        };

        self.cues.get(index).map(|cue| SeekTarget::new(index, cue))
    }

    /// Seek target for an explicit index
    pub fn seek_target(&self, index: usize) -> Result<SeekTarget, SubtitleError> {
        self.cues
            .get(index)
            .map(|cue| SeekTarget::new(index, cue))
            .ok_or(SubtitleError::IndexOutOfRange {
                index,
                len: self.cues.len(),
            })
    }
}

/// Lowest index containing `ms`, scanning from the start
pub fn find_linear(cues: &CueList, ms: u64) -> Option<usize> {
    cues.iter().position(|cue| cue.contains(ms))
}

/// Lowest index containing `ms` by binary search
pub fn find_binary(cues: &CueList, ms: u64) -> Option<usize> {
    // cues[..started] begin at or before ms
    let started = cues.cues().partition_point(|cue| cue.start_ms <= ms);
    // the first index whose running max end reaches ms is itself a cue ending at or after ms
    let first = cues.reach()[..started].partition_point(|&end| end < ms);

    (first < started).then_some(first)
}
