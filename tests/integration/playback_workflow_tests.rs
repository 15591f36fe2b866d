/*!
 * Integration tests for parsing followed by lookup, navigation and looping
 */

use std::sync::Arc;

use subcue::cue_index::CueIndex;
use subcue::cue_loop::{CueLoop, LoopAction};
use subcue::timecode::seconds_to_ms;
use subcue::{SubtitleEngine, parse_subtitles};

use crate::common;

#[test]
fn test_lookup_withTwoCueSrt_shouldFollowPlaybackScenario() {
    let mut index = CueIndex::new(parse_subtitles(common::SRT_TWO_CUES));

    assert_eq!(index.active_cue_at(1_500), Some(0));
    assert_eq!(index.active_cue_at(2_600), None);
    assert_eq!(index.next_cue(None, 2_600).map(|t| t.index), Some(1));
}

#[test]
fn test_playback_withSecondsClock_shouldTrackCuesForward() {
    let cues = parse_subtitles(&common::generate_srt(400));
    let mut index = CueIndex::new(cues);

    let mut seen = Vec::new();
    let mut clock = 0.0;
    while clock < 30.0 {
        if let Some(i) = index.active_cue_at(seconds_to_ms(clock)) {
            if seen.last() != Some(&i) {
                seen.push(i);
            }
        }
        clock += 0.25;
    }

    assert_eq!(seen, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_navigation_fromActiveCue_shouldStepAndWrap() {
    let cues = parse_subtitles(&common::generate_srt(3));
    let mut index = CueIndex::new(cues);

    let active = index.active_cue_at(3_100);
    assert_eq!(active, Some(1));

    let next = index.next_cue(active, 3_100).expect("next");
    assert_eq!((next.index, next.start_seconds), (2, 6.0));

    let wrapped = index.next_cue(Some(next.index), 6_000).expect("wrapped");
    assert_eq!(wrapped.index, 0);

    let previous = index.previous_cue(active, 3_100).expect("previous");
    assert_eq!(previous.start_ms, 0);
}

#[test]
fn test_replace_withNewDocument_shouldStartFromNoCursor() {
    let mut index = CueIndex::new(parse_subtitles(common::SRT_TWO_CUES));
    index.active_cue_at(3_500);
    assert_eq!(index.cursor(), Some(1));

    index.replace(parse_subtitles(common::ASS_WITH_FORMAT));
    assert_eq!(index.cursor(), None);
    assert_eq!(index.active_cue_at(3_500), None);
    assert_eq!(index.active_cue_at(2_000), Some(0));
}

#[test]
fn test_snapshot_sharedAcrossThreads_shouldStayValidAfterReplace() {
    let mut index = CueIndex::new(parse_subtitles(&common::generate_srt(150)));
    let snapshot = index.snapshot();

    let reader = std::thread::spawn(move || snapshot.iter().filter(|c| c.text.starts_with("Line")).count());
    index.replace(parse_subtitles(common::SRT_TWO_CUES));

    assert_eq!(reader.join().expect("reader thread"), 150);
    assert_eq!(index.cues().len(), 2);
}

#[test]
fn test_loop_withParsedCue_shouldRewindUntilRelocked() {
    let engine = SubtitleEngine::default();
    let mut index = CueIndex::with_threshold(
        Arc::new(engine.parse(common::SRT_TWO_CUES)),
        engine.config().linear_scan_threshold,
    );

    index.active_cue_at(1_200);
    let mut cue_loop = CueLoop::lock(&index).expect("active cue");

    assert_eq!(cue_loop.tick(2_400), LoopAction::Hold);
    assert_eq!(cue_loop.tick(2_600), LoopAction::Rewind { to_ms: 1_000 });
    assert_eq!(cue_loop.tick(1_000), LoopAction::Hold);
    assert_eq!(cue_loop.loop_count(), 1);
    assert_eq!(cue_loop.playback_rate(), 1.0);
}
