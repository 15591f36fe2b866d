/*!
 * Tests for cue normalization
 */

use subcue::cue::{Cue, IntermediateRecord};
use subcue::normalizer::{Normalizer, clean_text};

fn record(start: &str, end: &str, text: &str) -> IntermediateRecord {
    IntermediateRecord::new(start, end, text, 1)
}

#[test]
fn test_normalize_withMixedTimestampNotations_shouldConvertToMillis() {
    let normalized = Normalizer::default().normalize(&[
        record("0:00:01.50", "0:00:02.00", "ass"),
        record("00:00:03,250", "00:00:04,000", "srt"),
        record("00:05.000", "00:06.000", "vtt"),
        record("00:00:07", "00:00:08", "whole seconds"),
    ]);

    let spans: Vec<(u64, u64)> = normalized.cues.iter().map(|c| (c.start_ms, c.end_ms)).collect();
    assert_eq!(spans, vec![(1_500, 2_000), (3_250, 4_000), (5_000, 6_000), (7_000, 8_000)]);
}

#[test]
fn test_normalize_withMarkupOnlyText_shouldDropRecord() {
    let normalized = Normalizer::default().normalize(&[record("00:00:01,000", "00:00:02,000", "<i></i>{\\an8}")]);
    assert!(normalized.cues.is_empty());
    assert_eq!(normalized.dropped, 1);
}

#[test]
fn test_normalize_withEqualStartAndEnd_shouldDropRecord() {
    let normalized = Normalizer::default().normalize(&[record("00:00:01,000", "00:00:01,000", "zero")]);
    assert!(normalized.cues.is_empty());
}

#[test]
fn test_normalize_withCustomMinimum_shouldApplyIt() {
    let records = [record("00:00:01,000", "00:00:01,200", "short")];
    assert_eq!(Normalizer::new(250).normalize(&records).cues.len(), 0);
    assert_eq!(Normalizer::new(200).normalize(&records).cues.len(), 1);
}

#[test]
fn test_normalize_withUnsortedRecords_shouldSortByStart() {
    let normalized = Normalizer::default().normalize(&[
        record("00:00:05,000", "00:00:06,000", "b"),
        record("00:00:01,000", "00:00:02,000", "a"),
    ]);
    assert_eq!(normalized.cues, vec![Cue::new(1_000, 2_000, "a"), Cue::new(5_000, 6_000, "b")]);
}

#[test]
fn test_cleanText_withBreakSpellings_shouldCanonicalize() {
    assert_eq!(clean_text("one<BR>two<br />three\\nfour"), "one<br>two<br>three<br>four");
    assert_eq!(clean_text("  hard\\hspace  "), "hard space");
}
