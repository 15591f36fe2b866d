//! Repeat playback of a single cue.
//!
//! A locked loop tells the player to jump back to the cue start whenever
//! playback runs past its end, and slows playback down as repetitions pile up.

use log::debug;

use crate::cue::CueList;
use crate::cue_index::CueIndex;
use crate::errors::SubtitleError;

/// Loops at which playback slows to 0.75x
const FIRST_SLOWDOWN_LOOPS: u32 = 5;

/// Loops at which playback slows to 0.5x
const SECOND_SLOWDOWN_LOOPS: u32 = 10;

/// What the player should do after a clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Keep playing
    Hold,
    /// Seek back to the start of the looped cue
    Rewind { to_ms: u64 },
}

/// A cue locked for repeat playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueLoop {
    index: usize,
    start_ms: u64,
    end_ms: u64,
    loops: u32,
}

impl CueLoop {
    /// Lock the cue currently active in `index`
    pub fn lock(index: &CueIndex) -> Result<Self, SubtitleError> {
        let cursor = index.cursor().ok_or(SubtitleError::NoActiveCue)?;
        Self::lock_at(index.cues(), cursor)
    }

    /// Lock an explicit cue
    pub fn lock_at(cues: &CueList, index: usize) -> Result<Self, SubtitleError> {
        let cue = cues.get(index).ok_or(SubtitleError::IndexOutOfRange {
            index,
            len: cues.len(),
        })?;

        debug!("Looping cue {} ({}ms - {}ms)", index, cue.start_ms, cue.end_ms);
        Ok(CueLoop {
            index,
            start_ms: cue.start_ms,
            end_ms: cue.end_ms,
            loops: 0,
        })
    }

    /// Move the loop to the cue now active in `index`, restarting the count
    pub fn relock(&mut self, index: &CueIndex) -> Result<(), SubtitleError> {
        *self = Self::lock(index)?;
        Ok(())
    }

    /// React to the playback clock
    pub fn tick(&mut self, ms: u64) -> LoopAction {
        if ms <= self.end_ms {
            return LoopAction::Hold;
        }

        self.loops = self.loops.saturating_add(1);
        LoopAction::Rewind { to_ms: self.start_ms }
    }

    pub fn cue_index(&self) -> usize {
        self.index
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn loop_count(&self) -> u32 {
        self.loops
    }

    /// Playback speed for the current repetition
    pub fn playback_rate(&self) -> f64 {
        match self.loops {
            n if n >= SECOND_SLOWDOWN_LOOPS => 0.5,
            n if n >= FIRST_SLOWDOWN_LOOPS => 0.75,
            _ => 1.0,
        }
    }
}
