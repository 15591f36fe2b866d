/*!
 * Tests for single-cue loop playback
 */

use subcue::cue::{Cue, CueList, FormatTag};
use subcue::cue_index::CueIndex;
use subcue::cue_loop::{CueLoop, LoopAction};
use subcue::errors::SubtitleError;

fn index() -> CueIndex {
    CueIndex::new(CueList::from_cues(
        vec![Cue::new(1_000, 2_000, "one"), Cue::new(3_000, 4_000, "two")],
        FormatTag::Srt,
    ))
}

#[test]
fn test_lock_withoutActiveCue_shouldFail() {
    let mut index = index();
    assert_eq!(CueLoop::lock(&index), Err(SubtitleError::NoActiveCue));

    index.active_cue_at(2_500);
    assert_eq!(CueLoop::lock(&index), Err(SubtitleError::NoActiveCue));
}

#[test]
fn test_tick_pastEnd_shouldRewindAndCount() {
    let mut index = index();
    index.active_cue_at(1_200);
    let mut cue_loop = CueLoop::lock(&index).expect("active cue");

    assert_eq!(cue_loop.tick(1_900), LoopAction::Hold);
    assert_eq!(cue_loop.tick(2_000), LoopAction::Hold);
    assert_eq!(cue_loop.tick(2_100), LoopAction::Rewind { to_ms: 1_000 });
    assert_eq!(cue_loop.loop_count(), 1);
}

#[test]
fn test_playbackRate_shouldSlowDownWithLoops() {
    let cues = CueList::from_cues(vec![Cue::new(0, 1_000, "x")], FormatTag::Srt);
    let mut cue_loop = CueLoop::lock_at(&cues, 0).expect("cue exists");

    let mut rates = Vec::new();
    for _ in 0..11 {
        rates.push(cue_loop.playback_rate());
        cue_loop.tick(1_001);
    }
    rates.push(cue_loop.playback_rate());

    assert_eq!(rates[4], 1.0);
    assert_eq!(rates[5], 0.75);
    assert_eq!(rates[9], 0.75);
    assert_eq!(rates[10], 0.5);
    assert_eq!(rates[11], 0.5);
}

#[test]
fn test_relock_shouldMoveLoopAndResetCount() {
    let mut index = index();
    index.active_cue_at(1_500);
    let mut cue_loop = CueLoop::lock(&index).expect("active cue");
    cue_loop.tick(5_000);

    index.active_cue_at(3_500);
    cue_loop.relock(&index).expect("active cue");
    assert_eq!(cue_loop.cue_index(), 1);
    assert_eq!(cue_loop.start_ms(), 3_000);
    assert_eq!(cue_loop.end_ms(), 4_000);
    assert_eq!(cue_loop.loop_count(), 0);
}

#[test]
fn test_lockAt_withBadIndex_shouldFail() {
    assert_eq!(
        CueLoop::lock_at(&CueList::empty(), 0),
        Err(SubtitleError::IndexOutOfRange { index: 0, len: 0 })
    );
}
